use sqlx::PgConnection;

use crate::model::error::DatabaseResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    User,
    Lesson,
    Module,
    UserLesson,
    UserModule,
    ActivityLog,
}

impl ResourceType {
    /// Name of the table backing this resource.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Lesson => "lessons",
            Self::Module => "modules",
            Self::UserLesson => "user_lessons",
            Self::UserModule => "user_modules",
            Self::ActivityLog => "activity_logs",
        }
    }
}

pub trait ResourceTyped {
    fn get_resource_type() -> ResourceType;
}

/// Every operation runs on a caller-supplied connection so it can take part in
/// the caller's transaction. Pass `&mut *tx` for a transaction or
/// `&mut *conn` for a pooled connection.
#[async_trait::async_trait]
pub trait Repository<T, Create, V>
where
    T: ResourceTyped,
    V: Clone + Copy,
{
    async fn create(db: &mut PgConnection, data: Create) -> DatabaseResult<T>;

    async fn find_by_id(db: &mut PgConnection, id: V) -> DatabaseResult<Option<T>>;
}
