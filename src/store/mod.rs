mod path;
pub mod transfer;

use crate::model::{Application, ApplicationPatch, ImportRow, NewApplication, StatusCount};
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use path::resolve_store_path;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS applications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company TEXT NOT NULL,
    role TEXT NOT NULL,
    location TEXT NOT NULL DEFAULT '',
    date_applied TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'applied',
    source TEXT NOT NULL DEFAULT '',
    salary TEXT NOT NULL DEFAULT '',
    notes TEXT NOT NULL DEFAULT '',
    last_updated TEXT NOT NULL
);
";

const COLUMNS: &str =
    "id, company, role, location, date_applied, status, source, salary, notes, last_updated";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("no application with id {0}")]
    NotFound(i64),
    #[error("no fields to update")]
    NoChanges,
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("file error: {0}")]
    File(#[from] csv::Error),
}

/// Optional predicates narrowing `list` results. Empty strings impose no
/// constraint, matching how absent filters behave.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub status: Option<String>,
    pub company: Option<String>,
}

/// SQLite-backed collection of application records. Holds only the database
/// path; every operation opens its own connection and releases it when the
/// operation returns.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the `applications` table if it does not exist yet. Other
    /// operations fail with `Storage` until this has run once.
    pub fn init(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Insert a new record and return its id. `company` and `role` must be
    /// non-empty after trimming; an empty `status` becomes `applied`.
    pub fn add(&self, application: &NewApplication) -> Result<i64, StoreError> {
        if application.company.trim().is_empty() {
            return Err(StoreError::Validation(
                "company must not be empty".to_string(),
            ));
        }
        if application.role.trim().is_empty() {
            return Err(StoreError::Validation("role must not be empty".to_string()));
        }
        let conn = self.connect()?;
        let id = insert(&conn, application, &now_utc())?;
        log::debug!("added application {id}");
        Ok(id)
    }

    pub fn get(&self, id: i64) -> Result<Application, StoreError> {
        let conn = self.connect()?;
        let sql = format!("SELECT {COLUMNS} FROM applications WHERE id = ?1");
        conn.query_row(&sql, [id], row_to_application)
            .optional()?
            .ok_or(StoreError::NotFound(id))
    }

    /// All matching records, newest `date_applied` first. The sort compares
    /// the stored date strings literally, so records with an empty date come
    /// after every dated one.
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<Application>, StoreError> {
        let conn = self.connect()?;
        let mut sql = format!("SELECT {COLUMNS} FROM applications");
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<String> = Vec::new();
        if let Some(status) = filter.status.as_deref().filter(|s| !s.is_empty()) {
            clauses.push("status = ?");
            values.push(status.to_string());
        }
        if let Some(company) = filter.company.as_deref().filter(|s| !s.is_empty()) {
            clauses.push("company LIKE ?");
            values.push(format!("%{company}%"));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY date_applied DESC");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(values.iter()), row_to_application)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Overwrite the columns the patch names with non-empty values and
    /// refresh `last_updated`. Fails with `NotFound` when the id does not
    /// exist and `NoChanges` when the patch carries nothing to write; the
    /// stored row is untouched in both cases.
    pub fn update(&self, id: i64, patch: &ApplicationPatch) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let exists = conn
            .query_row("SELECT id FROM applications WHERE id = ?1", [id], |row| {
                row.get::<_, i64>(0)
            })
            .optional()?;
        if exists.is_none() {
            return Err(StoreError::NotFound(id));
        }

        let changes = patch.changes();
        if changes.is_empty() {
            return Err(StoreError::NoChanges);
        }

        let now = now_utc();
        let mut assignments: Vec<String> = changes
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .collect();
        assignments.push("last_updated = ?".to_string());
        let sql = format!(
            "UPDATE applications SET {} WHERE id = ?",
            assignments.join(", ")
        );

        let mut params: Vec<&dyn ToSql> = Vec::with_capacity(changes.len() + 2);
        for (_, value) in &changes {
            params.push(value);
        }
        params.push(&now);
        params.push(&id);
        conn.execute(&sql, params.as_slice())?;
        Ok(())
    }

    /// Remove the record with this id. Deleting an id that does not exist is
    /// a silent no-op.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute("DELETE FROM applications WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Count records per distinct status, covering only statuses that occur.
    pub fn stats(&self) -> Result<Vec<StatusCount>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare("SELECT status, COUNT(*) FROM applications GROUP BY status ORDER BY status")?;
        let rows = stmt.query_map([], |row| {
            Ok(StatusCount {
                status: row.get(0)?,
                count: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Insert every row as a brand-new record in one transaction. Rows are
    /// taken as-is: required-field validation is deliberately not applied
    /// here, matching the permissive import contract.
    pub(crate) fn import_rows(&self, rows: Vec<ImportRow>) -> Result<usize, StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let now = now_utc();
        let count = rows.len();
        for row in rows {
            insert(&tx, &NewApplication::from(row), &now)?;
        }
        tx.commit()?;
        log::debug!("imported {count} applications");
        Ok(count)
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }
}

fn insert(
    conn: &Connection,
    application: &NewApplication,
    now: &str,
) -> Result<i64, rusqlite::Error> {
    conn.execute(
        "INSERT INTO applications (company, role, location, date_applied, status, source, salary, notes, last_updated) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            application.company,
            application.role,
            application.location,
            application.date_applied,
            application.status_or_default(),
            application.source,
            application.salary,
            application.notes,
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_to_application(row: &Row<'_>) -> rusqlite::Result<Application> {
    Ok(Application {
        id: row.get(0)?,
        company: row.get(1)?,
        role: row.get(2)?,
        location: row.get(3)?,
        date_applied: row.get(4)?,
        status: row.get(5)?,
        source: row.get(6)?,
        salary: row.get(7)?,
        notes: row.get(8)?,
        last_updated: row.get(9)?,
    })
}

/// Current time as a fixed-width RFC 3339 UTC string, so stored timestamps
/// compare lexicographically in chronological order.
fn now_utc() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
