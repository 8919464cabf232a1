use crate::model::error::DatabaseResult;
use crate::model::repo::ResourceTyped;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// One handled request, as written by the activity logger middleware.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityLog {
    id: Uuid,
    method: String,
    url: String,
    status: i32,
    user_id: Option<Uuid>,
    elapsed_ms: i64,
    created: DateTime<Utc>,
}

impl ResourceTyped for ActivityLog {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::ActivityLog
    }
}

#[derive(Debug, Clone)]
pub struct ActivityLogCreate {
    pub method: String,
    pub url: String,
    pub status: u16,
    pub user_id: Option<Uuid>,
    pub elapsed_ms: i64,
}

impl ActivityLog {
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    pub async fn record(db: &mut PgConnection, data: ActivityLogCreate) -> DatabaseResult<Self> {
        let entry = sqlx::query_as(
            r#"
            INSERT INTO activity_logs (id, method, url, status, user_id, elapsed_ms)
            VALUES ($1,$2,$3,$4,$5,$6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.method)
        .bind(&data.url)
        .bind(i32::from(data.status))
        .bind(data.user_id)
        .bind(data.elapsed_ms)
        .fetch_one(&mut *db)
        .await?;

        Ok(entry)
    }

    pub async fn latest(db: &mut PgConnection, limit: i64) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as("SELECT * FROM activity_logs ORDER BY created DESC LIMIT $1")
            .bind(limit)
            .fetch_all(&mut *db)
            .await?;
        Ok(result)
    }
}
