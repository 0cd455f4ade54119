//! Domain model for performance reviews and the employees they reference.
//!
//! # Responsibility
//! - Define record types whose fields cannot hold invalid values.
//!
//! # Invariants
//! - Field rules are enforced on construction and on every setter.
//! - Referential checks need storage and therefore live in `repo`.

pub mod employee;
pub mod review;
