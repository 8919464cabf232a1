use crate::model::repo::ResourceTyped;
use crate::model::{Repository, error::DatabaseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserModule {
    id: Uuid,
    user_id: Uuid,
    module_id: Uuid,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl ResourceTyped for UserModule {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::UserModule
    }
}

impl UserModule {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn module_id(&self) -> Uuid {
        self.module_id
    }
}

#[derive(Debug, Clone)]
pub struct UserModuleCreate {
    user_id: Uuid,
    module_id: Uuid,
}

impl UserModuleCreate {
    pub fn new(user_id: Uuid, module_id: Uuid) -> Self {
        Self { user_id, module_id }
    }
}

#[async_trait::async_trait]
impl Repository<UserModule, UserModuleCreate, uuid::Uuid> for UserModule {
    async fn create(db: &mut PgConnection, data: UserModuleCreate) -> DatabaseResult<Self> {
        let record = sqlx::query_as(
            "INSERT INTO user_modules (id, user_id, module_id) VALUES ($1,$2,$3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.user_id)
        .bind(data.module_id)
        .fetch_one(&mut *db)
        .await?;

        Ok(record)
    }

    async fn find_by_id(db: &mut PgConnection, id: uuid::Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM user_modules WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *db)
            .await?;
        Ok(result)
    }
}

impl UserModule {
    pub async fn all_by_user(db: &mut PgConnection, user_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as("SELECT * FROM user_modules WHERE user_id = $1 ORDER BY created")
            .bind(user_id)
            .fetch_all(&mut *db)
            .await?;
        Ok(result)
    }
}
