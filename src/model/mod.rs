mod collection;
pub use collection::resolve_collection;

mod database;
pub use database::DbConnection;

pub mod entity;

mod error;
pub use error::{DatabaseError, DatabaseResult, ValidationError};

mod repo;
pub use repo::{Repository, ResourceType, ResourceTyped};

use sqlx::{Postgres, Transaction, pool::PoolConnection};

#[derive(Debug, Clone)]
pub struct ModelManager {
    database: DbConnection,
}

impl ModelManager {
    pub fn new(conn: DbConnection) -> Self {
        Self { database: conn }
    }

    /// Single connection from the pool, for work that doesn't need a transaction.
    pub async fn acquire(&self) -> DatabaseResult<PoolConnection<Postgres>> {
        Ok(self.database.pool().acquire().await?)
    }

    /// Opens a transaction. Dropping it without `commit` rolls everything back.
    pub async fn begin(&self) -> DatabaseResult<Transaction<'static, Postgres>> {
        Ok(self.database.pool().begin().await?)
    }
}
