use crate::model::repo::ResourceTyped;
use crate::model::{Repository, error::DatabaseResult};
use crate::web::UserRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserEntity {
    id: uuid::Uuid,
    username: String,
    role: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserEntityCreate {
    pub username: String,
    pub role: UserRole,
}

impl ResourceTyped for UserEntity {
    fn get_resource_type() -> crate::model::repo::ResourceType {
        crate::model::repo::ResourceType::User
    }
}

impl UserEntity {
    pub fn id(&self) -> uuid::Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

}

#[async_trait::async_trait]
impl Repository<UserEntity, UserEntityCreate, uuid::Uuid> for UserEntity {
    async fn create(db: &mut PgConnection, data: UserEntityCreate) -> DatabaseResult<Self> {
        let user = sqlx::query_as(
            "INSERT INTO users (id, username, role) VALUES ($1,$2,$3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.username)
        .bind(data.role.to_string())
        .fetch_one(&mut *db)
        .await?;

        Ok(user)
    }

    async fn find_by_id(db: &mut PgConnection, id: uuid::Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *db)
            .await?;
        Ok(result)
    }
}

impl UserEntity {
    pub async fn find_by_username(
        db: &mut PgConnection,
        username: &str,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&mut *db)
            .await?;
        Ok(result)
    }
}
