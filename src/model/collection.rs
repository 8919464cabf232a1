use sqlx::PgConnection;

use crate::model::{DatabaseError, DatabaseResult, ResourceType};

/// Checks that the table behind `resource` exists in the current search path.
/// A missing collection is a deployment problem, not a client one.
#[tracing::instrument(skip(db), err)]
pub async fn resolve_collection(
    db: &mut PgConnection,
    resource: ResourceType,
) -> DatabaseResult<&'static str> {
    let name = resource.collection();
    let exists: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
        .bind(name)
        .fetch_one(&mut *db)
        .await?;

    if exists {
        Ok(name)
    } else {
        Err(DatabaseError::CollectionNotFound { name })
    }
}
