//! SQLite-backed case store
//!
//! A single `cases` table keyed by an auto-increment id, with the natural key
//! `(case_type, case_number, filing_year)` enforced as UNIQUE.
//!
//! Every operation opens its own connection and drops it when done; the store
//! itself only remembers where the database file lives. Only provisioning and
//! inserts may create the file; reads open it read-only.

mod queries;
mod schema;
mod types;

pub use schema::{CASES_SCHEMA, SCHEMA_VERSION};
pub use types::*;

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, ErrorCode, OpenFlags};
use thiserror::Error;

/// Errors raised by the case store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("The cases table does not exist; run `casedesk init` first")]
    MissingTable,

    #[error("Failed to prepare database directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Sqlite(rusqlite::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref e, ref msg)
                if e.code == ErrorCode::ConstraintViolation =>
            {
                StoreError::Constraint(msg.clone().unwrap_or_else(|| e.to_string()))
            }
            other => StoreError::Sqlite(other),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Handle on the case database file
#[derive(Debug, Clone)]
pub struct CaseStore {
    path: PathBuf,
}

impl CaseStore {
    /// Create a handle for the database at `path`
    ///
    /// Nothing touches the filesystem until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection, creating the database directory if needed
    pub(crate) fn connect(&self) -> StoreResult<Connection> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let conn = Connection::open(&self.path)?;
        Ok(conn)
    }

    /// Open a read-only connection to a provisioned store
    ///
    /// Never creates the file or its directory. A missing file or a missing
    /// `cases` table is reported as [`StoreError::MissingTable`].
    pub(crate) fn connect_read(&self) -> StoreResult<Connection> {
        if !self.path.is_file() {
            return Err(StoreError::MissingTable);
        }

        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        if !schema::table_exists(&conn, "cases")? {
            return Err(StoreError::MissingTable);
        }
        Ok(conn)
    }

    /// Collect statistics about the store
    pub fn statistics(&self) -> StoreResult<StoreStats> {
        if !self.path.is_file() {
            return Ok(StoreStats::default());
        }

        let conn = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let schema_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        let total_cases = if schema::table_exists(&conn, "cases")? {
            conn.query_row("SELECT COUNT(*) FROM cases", [], |row| row.get(0))?
        } else {
            0
        };
        drop(conn);

        let db_size_bytes = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);

        Ok(StoreStats {
            total_cases,
            schema_version,
            db_size_bytes,
        })
    }
}


#[cfg(test)]
mod tests;
