//! Employee model referenced by reviews.
//!
//! Only what reviews need: a primary key to point at, plus the
//! descriptive columns of the `employees` table.
//!
//! # Invariants
//! - `name` is non-empty after trimming at all times.

use serde::{Deserialize, Serialize};

/// Primary key of an `employees` row.
pub type EmployeeId = i64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmployeeValidationError {
    #[error("name must be a non-empty string")]
    BlankName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EmployeeFields")]
pub struct Employee {
    id: Option<EmployeeId>,
    name: String,
    job_title: String,
}

#[derive(Deserialize)]
struct EmployeeFields {
    id: Option<EmployeeId>,
    name: String,
    job_title: String,
}

impl TryFrom<EmployeeFields> for Employee {
    type Error = EmployeeValidationError;

    fn try_from(value: EmployeeFields) -> Result<Self, Self::Error> {
        Self::build(value.id, value.name, value.job_title)
    }
}

impl Employee {
    pub fn new(
        name: impl Into<String>,
        job_title: impl Into<String>,
    ) -> Result<Self, EmployeeValidationError> {
        Self::build(None, name.into(), job_title.into())
    }

    /// Creates an employee that already carries a primary key.
    pub fn with_id(
        id: EmployeeId,
        name: impl Into<String>,
        job_title: impl Into<String>,
    ) -> Result<Self, EmployeeValidationError> {
        Self::build(Some(id), name.into(), job_title.into())
    }

    fn build(
        id: Option<EmployeeId>,
        name: String,
        job_title: String,
    ) -> Result<Self, EmployeeValidationError> {
        if name.trim().is_empty() {
            return Err(EmployeeValidationError::BlankName);
        }
        Ok(Self {
            id,
            name,
            job_title,
        })
    }

    pub fn id(&self) -> Option<EmployeeId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub(crate) fn set_id(&mut self, id: EmployeeId) {
        self.id = Some(id);
    }
}
