use crate::model::repo::ResourceTyped;
use crate::model::{DatabaseError, Repository, ResourceType, error::DatabaseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lesson {
    id: Uuid,
    title: String,
    description: String,
    /// Ids of the modules created under this lesson, in creation order.
    modules: Vec<Uuid>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl ResourceTyped for Lesson {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Lesson
    }
}

impl Lesson {
    pub fn id(&self) -> uuid::Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn modules(&self) -> &[Uuid] {
        &self.modules
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LessonCreate {
    pub title: String,
    pub description: String,
}

#[async_trait::async_trait]
impl Repository<Lesson, LessonCreate, uuid::Uuid> for Lesson {
    async fn create(db: &mut PgConnection, data: LessonCreate) -> DatabaseResult<Self> {
        let lesson = sqlx::query_as(
            "INSERT INTO lessons (id, title, description) VALUES ($1,$2,$3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.description)
        .fetch_one(&mut *db)
        .await?;

        Ok(lesson)
    }

    async fn find_by_id(db: &mut PgConnection, id: uuid::Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM lessons WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *db)
            .await?;
        Ok(result)
    }
}

impl Lesson {
    pub async fn find_by_title(db: &mut PgConnection, title: &str) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM lessons WHERE title = $1 LIMIT 1")
            .bind(title)
            .fetch_optional(&mut *db)
            .await?;
        Ok(result)
    }

    /// Appends `module_id` to the lesson's module list in a single statement.
    ///
    /// The append happens against the row version the update locks, not a
    /// snapshot read earlier, so concurrent appends to the same lesson all
    /// survive.
    pub async fn append_module(
        db: &mut PgConnection,
        lesson_id: Uuid,
        module_id: Uuid,
    ) -> DatabaseResult<Self> {
        let lesson: Option<Self> = sqlx::query_as(
            r#"
            UPDATE lessons
            SET modules = array_append(modules, $1), updated = now()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(module_id)
        .bind(lesson_id)
        .fetch_optional(&mut *db)
        .await?;

        lesson.ok_or(DatabaseError::NotFound(ResourceType::Lesson))
    }
}
