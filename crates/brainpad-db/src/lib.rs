//! # brainpad-db
//!
//! Note stores for brainpad.
//!
//! This crate provides:
//! - Connection pool management
//! - [`PgNoteRepository`], one SQL statement per note operation
//! - [`MemoryNoteRepository`], an in-process store with identical semantics
//! - Embedded migrations (feature `migrations`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use brainpad_db::{Database, NoteRepository, PoolConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/brainpad", &PoolConfig::default()).await?;
//!     for note in db.notes.list().await? {
//!         println!("{} {}", note.id, note.title);
//!     }
//!     Ok(())
//! }
//! ```
pub mod memory;
pub mod notes;
pub mod pool;
pub mod test_fixtures;

// Re-export core types
pub use brainpad_core::*;

pub use memory::MemoryNoteRepository;
pub use notes::PgNoteRepository;
pub use pool::{create_pool, PoolConfig};

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Note repository.
    pub notes: PgNoteRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            notes: PgNoteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to the given URL with the given pool settings.
    pub async fn connect(url: &str, config: &PoolConfig) -> Result<Self> {
        let pool = create_pool(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
