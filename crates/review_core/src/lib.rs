//! Object-relational mapping for performance reviews stored in SQLite.
//!
//! Repositories borrow one caller-owned `rusqlite::Connection` and keep an
//! identity map so each stored review is represented by a single instance.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{Employee, EmployeeId, EmployeeValidationError};
pub use model::review::{
    Review, ReviewId, ReviewValidationError, SharedReview, MIN_REVIEW_YEAR,
};
pub use repo::employee_repo::{employee_exists, SqliteEmployeeRepository};
pub use repo::identity_map::IdentityMap;
pub use repo::review_repo::{
    RepoError, RepoResult, ReviewRepository, ReviewRow, SqliteReviewRepository,
};
