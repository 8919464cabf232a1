use crate::model::entity::Lesson;
use crate::model::repo::ResourceTyped;
use crate::model::{
    DatabaseError, ModelManager, Repository, ResourceType, ValidationError,
    error::DatabaseResult, resolve_collection,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Content every module starts with until it is edited.
pub const PLACEHOLDER_CONTENT: &str = "hello";

pub const TITLE_MAX_LEN: usize = 255;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Module {
    id: uuid::Uuid,
    lesson_id: uuid::Uuid,
    title: String,
    content: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModuleCreate {
    lesson_id: Uuid,
    title: String,
    content: String,
}

impl ResourceTyped for Module {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::Module
    }
}

impl Module {
    pub fn id(&self) -> uuid::Uuid {
        self.id
    }

    pub fn lesson_id(&self) -> uuid::Uuid {
        self.lesson_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl ModuleCreate {
    pub fn new<T, C>(lesson_id: Uuid, title: T, content: C) -> Self
    where
        T: Into<String>,
        C: Into<String>,
    {
        Self {
            lesson_id,
            title: title.into(),
            content: content.into(),
        }
    }

    /// New module carrying [`PLACEHOLDER_CONTENT`].
    pub fn with_placeholder<T: Into<String>>(lesson_id: Uuid, title: T) -> Self {
        Self::new(lesson_id, title, PLACEHOLDER_CONTENT)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Blank { field: "title" });
        }

        if self.title.chars().count() > TITLE_MAX_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: TITLE_MAX_LEN,
            });
        }

        if self.content.is_empty() {
            return Err(ValidationError::Blank { field: "content" });
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl Repository<Module, ModuleCreate, uuid::Uuid> for Module {
    async fn create(db: &mut PgConnection, data: ModuleCreate) -> DatabaseResult<Self> {
        data.validate()?;

        let module = sqlx::query_as(
            "INSERT INTO modules (id, lesson_id, title, content) VALUES ($1,$2,$3,$4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.lesson_id)
        .bind(&data.title)
        .bind(&data.content)
        .fetch_one(&mut *db)
        .await?;

        Ok(module)
    }

    async fn find_by_id(db: &mut PgConnection, id: uuid::Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM modules WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *db)
            .await?;
        Ok(result)
    }
}

impl Module {
    pub async fn all_by_lesson(db: &mut PgConnection, lesson_id: Uuid) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as("SELECT * FROM modules WHERE lesson_id = $1 ORDER BY created, id")
            .bind(lesson_id)
            .fetch_all(&mut *db)
            .await?;
        Ok(result)
    }

    /// Creates a module and links it into its lesson's module list.
    ///
    /// Runs in one transaction: either the module row exists and its id is in
    /// the lesson's list, or neither change is visible.
    #[tracing::instrument(skip(mm, data), fields(lesson_id = %data.lesson_id), err)]
    pub async fn create_in_lesson(
        mm: &ModelManager,
        data: ModuleCreate,
    ) -> DatabaseResult<(Self, Lesson)> {
        let mut tx = mm.begin().await?;

        resolve_collection(&mut tx, ResourceType::Module).await?;

        let lesson = Lesson::find_by_id(&mut tx, data.lesson_id)
            .await?
            .ok_or(DatabaseError::NotFound(ResourceType::Lesson))?;

        let module = Module::create(&mut tx, data).await?;
        let lesson = Lesson::append_module(&mut tx, lesson.id(), module.id()).await?;

        tx.commit().await?;

        tracing::debug!(module_id = %module.id(), modules = lesson.modules().len(), "module linked");
        Ok((module, lesson))
    }
}
