//! SQLite storage bootstrap.
//!
//! # Responsibility
//! - Open and configure the single connection shared by repositories.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Schema is owned by repositories (`create_table`/`drop_table`), not here.

mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage-level failure surfaced unchanged to callers.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
}
