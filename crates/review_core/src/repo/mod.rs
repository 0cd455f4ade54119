//! Repository layer: persistence contracts and SQLite implementations.
//!
//! # Responsibility
//! - Own the SQL for `reviews` and `employees`.
//! - Keep the review identity map next to the connection it mirrors.
//!
//! # Invariants
//! - Every write checks field and referential rules before touching storage.
//! - Storage errors surface unchanged as `RepoError::Db`.

pub mod employee_repo;
pub mod identity_map;
pub mod review_repo;
