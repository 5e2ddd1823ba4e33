//! Database schema provisioning

use rusqlite::{params, Connection, TransactionBehavior};

use super::{CaseStore, ProvisionReport, StoreResult};

/// Current schema version, tracked in `PRAGMA user_version`
///
/// Version 0 is any `cases` table created without the CHECK set.
pub const SCHEMA_VERSION: i32 = 1;

/// The one authoritative definition of the `cases` table
pub const CASES_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS cases (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        case_type TEXT NOT NULL CHECK(length(trim(case_type)) > 0),
        case_number INTEGER NOT NULL CHECK(case_number > 0),
        filing_year INTEGER NOT NULL CHECK(filing_year BETWEEN 2000 AND 2030),
        petitioner TEXT NOT NULL CHECK(length(trim(petitioner)) > 0),
        respondent TEXT NOT NULL CHECK(length(trim(respondent)) > 0),
        filing_date TEXT CHECK(filing_date IS NULL OR date(filing_date) IS filing_date),
        next_hearing TEXT CHECK(next_hearing IS NULL OR date(next_hearing) IS next_hearing),
        status TEXT,
        judge TEXT,
        latest_order TEXT,
        pdf_link TEXT,
        UNIQUE(case_type, case_number, filing_year)
    );
    CREATE INDEX IF NOT EXISTS idx_cases_case_type ON cases(case_type);
"#;

const CASE_COLUMNS: &str = "case_type, case_number, filing_year, petitioner, respondent, \
     filing_date, next_hearing, status, judge, latest_order, pdf_link";

impl CaseStore {
    /// Create or upgrade the `cases` table
    ///
    /// Safe to call any number of times. A table left behind by an older,
    /// unconstrained schema is rebuilt; rows that do not satisfy the current
    /// constraints are dropped and counted in the report.
    pub fn provision(&self) -> StoreResult<ProvisionReport> {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut report = ProvisionReport::default();
        let exists = table_exists(&tx, "cases")?;
        let version: i32 = tx.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if !exists {
            tx.execute_batch(CASES_SCHEMA)?;
            report.created = true;
            tracing::info!(path = %self.path().display(), "created cases table");
        } else if version < SCHEMA_VERSION {
            upgrade_legacy_table(&tx, &mut report)?;
            tracing::warn!(
                migrated = report.migrated_rows,
                dropped = report.dropped_rows,
                "rebuilt legacy cases table under schema version {}",
                SCHEMA_VERSION
            );
        } else if version > SCHEMA_VERSION {
            tracing::warn!(
                found = version,
                expected = SCHEMA_VERSION,
                "database was written by a newer schema; leaving it untouched"
            );
            tx.commit()?;
            return Ok(report);
        }

        tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        tx.commit()?;

        Ok(report)
    }
}

/// Move rows from an unconstrained table into a freshly created strict one
fn upgrade_legacy_table(conn: &Connection, report: &mut ProvisionReport) -> StoreResult<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS cases_legacy;
        DROP INDEX IF EXISTS idx_cases_case_type;
        ALTER TABLE cases RENAME TO cases_legacy;
        "#,
    )?;
    conn.execute_batch(CASES_SCHEMA)?;

    let legacy_rows: usize =
        conn.query_row("SELECT COUNT(*) FROM cases_legacy", [], |row| row.get(0))?;

    // OR IGNORE skips rows failing CHECK, NOT NULL and UNIQUE alike
    let migrated = conn.execute(
        &format!(
            "INSERT OR IGNORE INTO cases ({cols}) SELECT {cols} FROM cases_legacy ORDER BY id",
            cols = CASE_COLUMNS
        ),
        [],
    )?;

    conn.execute_batch("DROP TABLE cases_legacy;")?;

    report.upgraded = true;
    report.migrated_rows = migrated;
    report.dropped_rows = legacy_rows.saturating_sub(migrated);
    Ok(())
}

/// Check whether a table exists in the main schema
pub(super) fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        params![name],
        |row| row.get(0),
    )
}

pub(super) fn case_columns() -> &'static str {
    CASE_COLUMNS
}
