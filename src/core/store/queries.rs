//! Query and insert methods for the case store

use std::collections::HashSet;

use rusqlite::{params, OptionalExtension, Row};

use super::schema::case_columns;
use super::{CaseKey, CaseRecord, CaseStore, NewCase, StoreResult};

impl CaseStore {
    /// Fetch the case matching all three natural key fields
    pub fn find_by_key(&self, key: &CaseKey) -> StoreResult<Option<CaseRecord>> {
        let conn = self.connect_read()?;
        let sql = format!(
            "SELECT id, {} FROM cases WHERE case_type = ?1 AND case_number = ?2 AND filing_year = ?3",
            case_columns()
        );

        let record = conn
            .query_row(
                &sql,
                params![key.case_type, key.case_number, key.filing_year],
                row_to_record,
            )
            .optional()?;

        Ok(record)
    }

    /// List cases, optionally restricted to case types containing `type_filter`
    ///
    /// The filter is a case-insensitive substring match.
    pub fn list_cases(&self, type_filter: Option<&str>) -> StoreResult<Vec<CaseRecord>> {
        let conn = self.connect_read()?;
        let mut sql = format!("SELECT id, {} FROM cases", case_columns());
        if type_filter.is_some() {
            sql.push_str(" WHERE instr(lower(case_type), lower(?1)) > 0");
        }
        sql.push_str(" ORDER BY case_type, filing_year, case_number");

        let mut stmt = conn.prepare(&sql)?;
        let rows = match type_filter {
            Some(filter) => stmt.query_map(params![filter], row_to_record)?,
            None => stmt.query_map([], row_to_record)?,
        };

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// All natural keys currently stored
    pub fn existing_keys(&self) -> StoreResult<HashSet<CaseKey>> {
        let conn = self.connect_read()?;
        let mut stmt = conn.prepare("SELECT case_type, case_number, filing_year FROM cases")?;
        let rows = stmt.query_map([], |row| {
            Ok(CaseKey {
                case_type: row.get(0)?,
                case_number: row.get(1)?,
                filing_year: row.get(2)?,
            })
        })?;

        let mut keys = HashSet::new();
        for row in rows {
            keys.insert(row?);
        }
        Ok(keys)
    }

    /// Insert a batch of cases in a single transaction
    ///
    /// Any constraint violation rolls back the whole batch.
    pub fn insert_cases(&self, cases: &[NewCase]) -> StoreResult<usize> {
        if cases.is_empty() {
            return Ok(0);
        }

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO cases ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                case_columns()
            ))?;

            for case in cases {
                if let Err(err) = stmt.execute(params![
                    case.case_type,
                    case.case_number,
                    case.filing_year,
                    case.petitioner,
                    case.respondent,
                    case.filing_date,
                    case.next_hearing,
                    case.status,
                    case.judge,
                    case.latest_order,
                    case.pdf_link,
                ]) {
                    tracing::debug!(case = %case.key(), "insert failed, rolling back batch");
                    return Err(err.into());
                }
            }
        }
        tx.commit()?;

        Ok(cases.len())
    }

    /// Total number of stored cases
    pub fn count(&self) -> StoreResult<usize> {
        let conn = self.connect_read()?;
        let count = conn.query_row("SELECT COUNT(*) FROM cases", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Case count per case type, largest first
    pub fn type_distribution(&self) -> StoreResult<Vec<(String, usize)>> {
        let conn = self.connect_read()?;
        let mut stmt = conn.prepare(
            "SELECT case_type, COUNT(*) AS n FROM cases GROUP BY case_type ORDER BY n DESC, case_type ASC",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, usize>(1)?)))?;

        let mut distribution = Vec::new();
        for row in rows {
            distribution.push(row?);
        }
        Ok(distribution)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<CaseRecord> {
    Ok(CaseRecord {
        id: row.get(0)?,
        case_type: row.get(1)?,
        case_number: row.get(2)?,
        filing_year: row.get(3)?,
        petitioner: row.get(4)?,
        respondent: row.get(5)?,
        filing_date: row.get(6)?,
        next_hearing: row.get(7)?,
        status: row.get(8)?,
        judge: row.get(9)?,
        latest_order: row.get(10)?,
        pdf_link: row.get(11)?,
    })
}
