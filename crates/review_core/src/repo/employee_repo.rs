//! Employee persistence used as the foreign-key target of reviews.
//!
//! # Invariants
//! - `employee_exists` always queries storage; results are never cached.

use crate::model::employee::{Employee, EmployeeId};
use crate::repo::review_repo::{RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection};

/// Returns whether a row with `id` exists in `employees`.
pub fn employee_exists(conn: &Connection, id: EmployeeId) -> RepoResult<bool> {
    let mut stmt = conn.prepare("SELECT * FROM employees WHERE id = ?1;")?;
    let mut rows = stmt.query([id])?;
    Ok(rows.next()?.is_some())
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY,
                name TEXT,
                job_title TEXT
            );",
        )?;
        debug!("event=table_create module=repo table=employees status=ok");
        Ok(())
    }

    pub fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS employees;")?;
        debug!("event=table_drop module=repo table=employees status=ok");
        Ok(())
    }

    /// Validates and inserts a new employee, returning it with its id set.
    pub fn create(&self, name: &str, job_title: &str) -> RepoResult<Employee> {
        let mut employee = Employee::new(name, job_title)?;
        self.conn.execute(
            "INSERT INTO employees (name, job_title) VALUES (?1, ?2);",
            params![employee.name(), employee.job_title()],
        )?;
        let id = self.conn.last_insert_rowid();
        employee.set_id(id);
        debug!("event=employee_save module=repo status=ok op=insert id={id}");
        Ok(employee)
    }

    pub fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, job_title FROM employees WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let name: Option<String> = row.get("name")?;
        let job_title: Option<String> = row.get("job_title")?;
        let employee = Employee::with_id(
            row.get("id")?,
            name.unwrap_or_default(),
            job_title.unwrap_or_default(),
        )
        .map_err(|err| RepoError::InvalidData(format!("employees row {id}: {err}")))?;
        Ok(Some(employee))
    }

    pub fn exists(&self, id: EmployeeId) -> RepoResult<bool> {
        employee_exists(self.conn, id)
    }
}
