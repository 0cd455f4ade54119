//! Review repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `reviews` table.
//! - Hydrate rows through the identity map so one row maps to one instance.
//!
//! # Invariants
//! - Writes re-check that `employee_id` exists before any SQL mutation.
//! - A review enters the identity map on insert or hydration and leaves it
//!   on delete (or when the table is dropped).
//! - Every statement autocommits; there is no rollback path.

use crate::db::DbError;
use crate::model::employee::{EmployeeId, EmployeeValidationError};
use crate::model::review::{Review, ReviewId, ReviewValidationError, SharedReview};
use crate::repo::employee_repo::employee_exists;
use crate::repo::identity_map::IdentityMap;
use log::debug;
use rusqlite::types::FromSql;
use rusqlite::{params, Connection, Row};
use std::cell::RefCell;
use std::rc::Rc;

const REVIEW_SELECT_SQL: &str = "SELECT id, year, summary, employee_id FROM reviews";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for review and employee persistence.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ReviewValidationError),
    #[error(transparent)]
    EmployeeValidation(#[from] EmployeeValidationError),
    /// `employee_id` does not match any row in `employees`.
    #[error("employee id {0} must refer to an existing employee")]
    UnknownEmployee(EmployeeId),
    /// The operation needs a persisted review but `id` is `None`.
    #[error("review has no id; save it first")]
    MissingId,
    #[error("review not found: {0}")]
    NotFound(ReviewId),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw `(id, year, summary, employee_id)` tuple as stored in `reviews`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub id: ReviewId,
    pub year: i64,
    pub summary: String,
    pub employee_id: EmployeeId,
}

/// Repository interface for review persistence.
pub trait ReviewRepository {
    /// Creates `reviews` when missing.
    fn create_table(&self) -> RepoResult<()>;
    /// Drops `reviews` when present and forgets every cached review.
    fn drop_table(&self) -> RepoResult<()>;
    /// Builds an unsaved review, checking `employee_id` against storage.
    fn new_review(
        &self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<SharedReview>;
    /// Points `review` at another employee after a live existence check.
    fn assign_employee(&self, review: &SharedReview, employee_id: EmployeeId) -> RepoResult<()>;
    /// Inserts an unsaved review or updates a persisted one.
    fn save(&self, review: &SharedReview) -> RepoResult<()>;
    /// `new_review` followed by `save`.
    fn create(
        &self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<SharedReview>;
    /// Returns the cached instance for `row.id`, or caches a new one.
    fn instance_from_row(&self, row: ReviewRow) -> RepoResult<SharedReview>;
    fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<SharedReview>>;
    /// Writes all fields of a persisted review.
    fn update(&self, review: &SharedReview) -> RepoResult<()>;
    /// Deletes the row, evicts it from the cache and detaches `review`.
    fn delete(&self, review: &SharedReview) -> RepoResult<()>;
    /// Returns every stored review in storage scan order.
    fn get_all(&self) -> RepoResult<Vec<SharedReview>>;
}

/// SQLite-backed review repository owning its identity map.
pub struct SqliteReviewRepository<'conn> {
    conn: &'conn Connection,
    cache: RefCell<IdentityMap>,
}

impl<'conn> SqliteReviewRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            cache: RefCell::new(IdentityMap::new()),
        }
    }

    /// Returns the cached review for `id` without querying storage.
    pub fn cached(&self, id: ReviewId) -> Option<SharedReview> {
        self.cache.borrow().get(id)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    fn ensure_employee(&self, employee_id: EmployeeId) -> RepoResult<()> {
        if !employee_exists(self.conn, employee_id)? {
            return Err(RepoError::UnknownEmployee(employee_id));
        }
        Ok(())
    }

    fn insert(&self, review: &SharedReview) -> RepoResult<ReviewId> {
        {
            let current = review.borrow();
            self.ensure_employee(current.employee_id())?;
            self.conn.execute(
                "INSERT INTO reviews (year, summary, employee_id) VALUES (?1, ?2, ?3);",
                params![current.year(), current.summary(), current.employee_id()],
            )?;
        }

        let id = self.conn.last_insert_rowid();
        review.borrow_mut().set_id(Some(id));
        self.cache.borrow_mut().put(id, Rc::clone(review));
        Ok(id)
    }
}

impl ReviewRepository for SqliteReviewRepository<'_> {
    fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY,
                year INT,
                summary TEXT,
                employee_id INTEGER REFERENCES employees(id)
            );",
        )?;
        debug!("event=table_create module=repo table=reviews status=ok");
        Ok(())
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS reviews;")?;
        self.cache.borrow_mut().clear();
        debug!("event=table_drop module=repo table=reviews status=ok");
        Ok(())
    }

    fn new_review(
        &self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<SharedReview> {
        let review = Review::new(year, summary, employee_id)?;
        self.ensure_employee(employee_id)?;
        Ok(review.into_shared())
    }

    fn assign_employee(&self, review: &SharedReview, employee_id: EmployeeId) -> RepoResult<()> {
        self.ensure_employee(employee_id)?;
        review.borrow_mut().set_employee_id(employee_id);
        Ok(())
    }

    fn save(&self, review: &SharedReview) -> RepoResult<()> {
        if review.borrow().is_persisted() {
            return self.update(review);
        }

        let id = self.insert(review)?;
        debug!("event=review_save module=repo status=ok op=insert id={id}");
        Ok(())
    }

    fn create(
        &self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<SharedReview> {
        let review = self.new_review(year, summary, employee_id)?;
        self.save(&review)?;
        Ok(review)
    }

    fn instance_from_row(&self, row: ReviewRow) -> RepoResult<SharedReview> {
        let cached = self.cache.borrow().get(row.id);
        if let Some(review) = cached {
            return Ok(review);
        }

        let id = row.id;
        let review = Review::with_id(id, row.year, row.summary, row.employee_id)
            .map_err(|err| RepoError::InvalidData(format!("reviews row {id}: {err}")))?
            .into_shared();
        self.cache.borrow_mut().put(id, Rc::clone(&review));
        Ok(review)
    }

    fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<SharedReview>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        let row = match rows.next()? {
            Some(row) => parse_review_row(row)?,
            None => return Ok(None),
        };

        self.instance_from_row(row).map(Some)
    }

    fn update(&self, review: &SharedReview) -> RepoResult<()> {
        let current = review.borrow();
        let id = current.id().ok_or(RepoError::MissingId)?;
        self.ensure_employee(current.employee_id())?;

        let changed = self.conn.execute(
            "UPDATE reviews
             SET year = ?1, summary = ?2, employee_id = ?3
             WHERE id = ?4;",
            params![current.year(), current.summary(), current.employee_id(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        debug!("event=review_save module=repo status=ok op=update id={id}");
        Ok(())
    }

    fn delete(&self, review: &SharedReview) -> RepoResult<()> {
        let id = review.borrow().id().ok_or(RepoError::MissingId)?;
        let changed = self
            .conn
            .execute("DELETE FROM reviews WHERE id = ?1;", [id])?;

        self.cache.borrow_mut().evict(id);
        review.borrow_mut().set_id(None);

        debug!("event=review_delete module=repo status=ok id={id} rows={changed}");
        Ok(())
    }

    fn get_all(&self) -> RepoResult<Vec<SharedReview>> {
        let mut stmt = self.conn.prepare(&format!("{REVIEW_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut parsed = Vec::new();
        while let Some(row) = rows.next()? {
            parsed.push(parse_review_row(row)?);
        }

        parsed
            .into_iter()
            .map(|row| self.instance_from_row(row))
            .collect()
    }
}

fn parse_review_row(row: &Row<'_>) -> RepoResult<ReviewRow> {
    Ok(ReviewRow {
        id: read_column(row, "id")?,
        year: read_column(row, "year")?,
        summary: read_column(row, "summary")?,
        employee_id: read_column(row, "employee_id")?,
    })
}

// Type mismatches mean the stored row is bad, not that storage failed.
fn read_column<T: FromSql>(row: &Row<'_>, column: &str) -> RepoResult<T> {
    row.get(column).map_err(|err| match err {
        rusqlite::Error::InvalidColumnType(..) | rusqlite::Error::FromSqlConversionFailure(..) => {
            RepoError::InvalidData(format!("reviews.{column}: {err}"))
        }
        other => other.into(),
    })
}
