//! Store type definitions
//!
//! Row, key and report structs shared by the store, the seeder and the lookup service.

use std::fmt;

use serde::Serialize;

// =========================================================================
// Keys
// =========================================================================

/// Natural key of a case: `(case_type, case_number, filing_year)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CaseKey {
    pub case_type: String,
    pub case_number: i64,
    pub filing_year: i64,
}

impl CaseKey {
    pub fn new(case_type: impl Into<String>, case_number: i64, filing_year: i64) -> Self {
        Self {
            case_type: case_type.into(),
            case_number,
            filing_year,
        }
    }
}

impl fmt::Display for CaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.case_type, self.case_number, self.filing_year)
    }
}

// =========================================================================
// Rows
// =========================================================================

/// Insert payload for a single case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCase {
    pub case_type: String,
    pub case_number: i64,
    pub filing_year: i64,
    pub petitioner: String,
    pub respondent: String,
    /// ISO `YYYY-MM-DD`
    pub filing_date: Option<String>,
    /// ISO `YYYY-MM-DD`
    pub next_hearing: Option<String>,
    pub status: Option<String>,
    pub judge: Option<String>,
    pub latest_order: Option<String>,
    pub pdf_link: Option<String>,
}

impl NewCase {
    pub fn key(&self) -> CaseKey {
        CaseKey::new(self.case_type.clone(), self.case_number, self.filing_year)
    }
}

/// A case row as stored, including the surrogate id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseRecord {
    pub id: i64,
    pub case_type: String,
    pub case_number: i64,
    pub filing_year: i64,
    pub petitioner: String,
    pub respondent: String,
    pub filing_date: Option<String>,
    pub next_hearing: Option<String>,
    pub status: Option<String>,
    pub judge: Option<String>,
    pub latest_order: Option<String>,
    pub pdf_link: Option<String>,
}

impl CaseRecord {
    pub fn key(&self) -> CaseKey {
        CaseKey::new(self.case_type.clone(), self.case_number, self.filing_year)
    }
}

// =========================================================================
// Reports
// =========================================================================

/// Outcome of [`CaseStore::provision`](super::CaseStore::provision)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    /// The `cases` table did not exist and was created
    pub created: bool,
    /// A legacy (unconstrained) table was rebuilt under the current schema
    pub upgraded: bool,
    /// Rows carried over from the legacy table
    pub migrated_rows: usize,
    /// Legacy rows that failed the current constraints and were dropped
    pub dropped_rows: usize,
}

/// Store statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    pub total_cases: usize,
    pub schema_version: i32,
    pub db_size_bytes: u64,
}
