//! Review domain model.
//!
//! # Responsibility
//! - Define the canonical performance-review record.
//! - Enforce field rules on construction and on every mutation.
//!
//! # Invariants
//! - `year >= MIN_REVIEW_YEAR` at all times.
//! - `summary` is non-empty after trimming at all times. The stored text is
//!   kept exactly as given.
//! - `id` is `None` until the record is first inserted, and again after delete.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use super::employee::EmployeeId;

/// Primary key of a persisted review, assigned by SQLite on insert.
pub type ReviewId = i64;

/// Shared handle handed out by the identity map.
///
/// Two handles for the same row compare equal under `Rc::ptr_eq`.
pub type SharedReview = Rc<RefCell<Review>>;

/// Earliest accepted review year.
pub const MIN_REVIEW_YEAR: i64 = 2000;

/// Field-level validation failures for [`Review`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewValidationError {
    #[error("year {year} must be greater than or equal to {minimum}")]
    YearBeforeMinimum { year: i64, minimum: i64 },
    #[error("summary must be a non-empty string")]
    BlankSummary,
}

/// One performance-review record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReviewFields")]
pub struct Review {
    id: Option<ReviewId>,
    year: i64,
    summary: String,
    employee_id: EmployeeId,
}

/// Unvalidated wire shape used by `Deserialize`.
#[derive(Deserialize)]
struct ReviewFields {
    id: Option<ReviewId>,
    year: i64,
    summary: String,
    employee_id: EmployeeId,
}

impl TryFrom<ReviewFields> for Review {
    type Error = ReviewValidationError;

    fn try_from(value: ReviewFields) -> Result<Self, Self::Error> {
        Self::build(value.id, value.year, value.summary, value.employee_id)
    }
}

impl Review {
    /// Creates an unsaved review.
    ///
    /// Validates `year` then `summary`. The `employee_id` is only checked
    /// against storage by the repository.
    pub fn new(
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
    ) -> Result<Self, ReviewValidationError> {
        Self::build(None, year, summary.into(), employee_id)
    }

    /// Creates a review that already carries a primary key.
    ///
    /// Used when hydrating rows from storage.
    pub fn with_id(
        id: ReviewId,
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
    ) -> Result<Self, ReviewValidationError> {
        Self::build(Some(id), year, summary.into(), employee_id)
    }

    fn build(
        id: Option<ReviewId>,
        year: i64,
        summary: String,
        employee_id: EmployeeId,
    ) -> Result<Self, ReviewValidationError> {
        validate_year(year)?;
        validate_summary(&summary)?;
        Ok(Self {
            id,
            year,
            summary,
            employee_id,
        })
    }

    /// Wraps this review into a handle the repository can save and cache.
    pub fn into_shared(self) -> SharedReview {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> Option<ReviewId> {
        self.id
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Returns whether this review has a row in storage.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Replaces `year`; the previous value is kept on error.
    pub fn set_year(&mut self, year: i64) -> Result<(), ReviewValidationError> {
        validate_year(year)?;
        self.year = year;
        Ok(())
    }

    /// Replaces `summary`; the previous value is kept on error.
    pub fn set_summary(
        &mut self,
        summary: impl Into<String>,
    ) -> Result<(), ReviewValidationError> {
        let summary = summary.into();
        validate_summary(&summary)?;
        self.summary = summary;
        Ok(())
    }

    // Referential validity is the caller's job; see `ReviewRepository::assign_employee`.
    pub(crate) fn set_employee_id(&mut self, employee_id: EmployeeId) {
        self.employee_id = employee_id;
    }

    pub(crate) fn set_id(&mut self, id: Option<ReviewId>) {
        self.id = id;
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = self
            .id
            .map_or_else(|| "None".to_string(), |id| id.to_string());
        write!(
            f,
            "<Review {id}: {}, {}, Employee: {}>",
            self.year, self.summary, self.employee_id
        )
    }
}

fn validate_year(year: i64) -> Result<(), ReviewValidationError> {
    if year < MIN_REVIEW_YEAR {
        return Err(ReviewValidationError::YearBeforeMinimum {
            year,
            minimum: MIN_REVIEW_YEAR,
        });
    }
    Ok(())
}

fn validate_summary(summary: &str) -> Result<(), ReviewValidationError> {
    if summary.trim().is_empty() {
        return Err(ReviewValidationError::BlankSummary);
    }
    Ok(())
}
