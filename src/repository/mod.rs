//! Repository layer for database operations
//!
//! Handlers never touch a connection directly: they receive the stores
//! through [`crate::AppState`], which owns them for the life of the process.

pub mod books;
pub mod memory;
pub mod users;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::{Book, BookFields, User},
};

pub use memory::MemoryRepository;

/// Persistence for book records.
///
/// Lookups return `Ok(None)` / `Ok(false)` for unknown ids; errors are
/// reserved for store failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, ascending by id
    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn get(&self, id: i64) -> AppResult<Option<Book>>;

    /// Insert a book and return it with its assigned id
    async fn create(&self, fields: &BookFields) -> AppResult<Book>;

    /// Overwrite every writable field; `None` if the id is unknown
    async fn replace(&self, id: i64, fields: &BookFields) -> AppResult<Option<Book>>;

    /// `true` if a row was removed
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Persistence for token owners
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    async fn create(&self, username: &str, password_hash: &str) -> AppResult<User>;
}

/// PostgreSQL-backed repository holding the connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Open a pool sized from configuration
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}
