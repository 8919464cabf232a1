use crate::model::entity::{Lesson, Module, UserModule, UserModuleCreate};
use crate::model::repo::ResourceTyped;
use crate::model::{
    DatabaseError, ModelManager, Repository, ResourceType, error::DatabaseResult,
    resolve_collection,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserLesson {
    id: Uuid,
    user_id: Uuid,
    lesson_id: Uuid,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl ResourceTyped for UserLesson {
    fn get_resource_type() -> crate::model::ResourceType {
        crate::model::ResourceType::UserLesson
    }
}

impl UserLesson {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn lesson_id(&self) -> Uuid {
        self.lesson_id
    }
}

#[derive(Debug, Clone)]
pub struct UserLessonCreate {
    user_id: Uuid,
    lesson_id: Uuid,
}

impl UserLessonCreate {
    pub fn new(user_id: Uuid, lesson_id: Uuid) -> Self {
        Self { user_id, lesson_id }
    }
}

#[async_trait::async_trait]
impl Repository<UserLesson, UserLessonCreate, uuid::Uuid> for UserLesson {
    async fn create(db: &mut PgConnection, data: UserLessonCreate) -> DatabaseResult<Self> {
        let record = sqlx::query_as(
            "INSERT INTO user_lessons (id, user_id, lesson_id) VALUES ($1,$2,$3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.user_id)
        .bind(data.lesson_id)
        .fetch_one(&mut *db)
        .await?;

        Ok(record)
    }

    async fn find_by_id(db: &mut PgConnection, id: uuid::Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM user_lessons WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *db)
            .await?;
        Ok(result)
    }
}

/// Everything written by a successful [`UserLesson::subscribe`].
#[derive(Debug, Clone)]
pub struct Subscription {
    pub user_lesson: UserLesson,
    pub user_modules: Vec<UserModule>,
}

impl UserLesson {
    pub async fn find_by_user_and_lesson(
        db: &mut PgConnection,
        user_id: Uuid,
        lesson_id: Uuid,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM user_lessons WHERE user_id = $1 AND lesson_id = $2")
            .bind(user_id)
            .bind(lesson_id)
            .fetch_optional(&mut *db)
            .await?;
        Ok(result)
    }

    /// Subscribes `user_id` to a lesson and to every module currently under it.
    ///
    /// One `user_modules` row per module, then the `user_lessons` row, all in a
    /// single transaction. The first failing insert aborts the whole thing.
    #[tracing::instrument(skip(mm), err)]
    pub async fn subscribe(
        mm: &ModelManager,
        user_id: Uuid,
        lesson_id: Uuid,
    ) -> DatabaseResult<Subscription> {
        let mut tx = mm.begin().await?;

        resolve_collection(&mut tx, ResourceType::UserLesson).await?;
        let pending = UserLessonCreate::new(user_id, lesson_id);

        if Lesson::find_by_id(&mut tx, lesson_id).await?.is_none() {
            return Err(DatabaseError::NotFound(ResourceType::Lesson));
        }

        let modules = Module::all_by_lesson(&mut tx, lesson_id).await?;

        resolve_collection(&mut tx, ResourceType::UserModule).await?;

        let mut user_modules = Vec::with_capacity(modules.len());
        for module in &modules {
            let record =
                UserModule::create(&mut tx, UserModuleCreate::new(user_id, module.id())).await?;
            user_modules.push(record);
        }

        let user_lesson = UserLesson::create(&mut tx, pending).await?;

        tx.commit().await?;

        tracing::debug!(modules = user_modules.len(), "lesson subscribed");
        Ok(Subscription {
            user_lesson,
            user_modules,
        })
    }
}
