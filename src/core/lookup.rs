//! Case lookup and display shaping
//!
//! Resolves a natural key submitted from the search form to a single stored
//! case and turns it into the structure the page script renders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::store::{CaseKey, CaseRecord, CaseStore, StoreError};

/// Placeholder shown for a date that is not set
pub const NOT_SCHEDULED: &str = "Not scheduled";

/// Case type abbreviations offered on the search form
pub const KNOWN_CASE_TYPES: &[&str] = &[
    "WP(C)",
    "W.P.(C)",
    "CRL.A",
    "CS(OS)",
    "FAO",
    "ARB.P.",
    "TEST.CAS.",
    "ITA",
    "CO.PET.",
];

/// Raw search input as submitted by a form or query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    pub case_type: Option<String>,
    pub case_number: Option<String>,
    pub filing_year: Option<String>,
}

impl SearchRequest {
    pub fn new(
        case_type: impl Into<String>,
        case_number: impl ToString,
        filing_year: impl ToString,
    ) -> Self {
        Self {
            case_type: Some(case_type.into()),
            case_number: Some(case_number.to_string()),
            filing_year: Some(filing_year.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Case not found in database")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A single order shown under a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderEntry {
    pub date: String,
    pub description: Option<String>,
    pub pdf_link: Option<String>,
}

/// A case shaped for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseDetails {
    pub case_type: String,
    pub case_number: i64,
    pub filing_year: i64,
    pub case_title: String,
    pub case_type_name: String,
    pub petitioner: String,
    pub respondent: String,
    pub filing_date: String,
    pub next_hearing: String,
    pub status: Option<String>,
    pub judge: Option<String>,
    pub latest_order: Option<String>,
    pub pdf_link: Option<String>,
    /// Always one entry: the store keeps only the latest order per case
    pub orders: Vec<OrderEntry>,
}

impl From<CaseRecord> for CaseDetails {
    fn from(record: CaseRecord) -> Self {
        let case_title = record.key().to_string();
        let filing_date = format_date(record.filing_date.as_deref());

        let orders = vec![OrderEntry {
            date: filing_date.clone(),
            description: record.latest_order.clone(),
            pdf_link: record.pdf_link.clone(),
        }];

        Self {
            case_type_name: case_type_name(&record.case_type).to_string(),
            case_title,
            next_hearing: format_date(record.next_hearing.as_deref()),
            filing_date,
            case_type: record.case_type,
            case_number: record.case_number,
            filing_year: record.filing_year,
            petitioner: record.petitioner,
            respondent: record.respondent,
            status: record.status,
            judge: record.judge,
            latest_order: record.latest_order,
            pdf_link: record.pdf_link,
            orders,
        }
    }
}

/// Look up one case by its natural key and shape it for display
pub fn lookup(store: &CaseStore, request: &SearchRequest) -> Result<CaseDetails, LookupError> {
    let Some(key) = parse_key(request)? else {
        tracing::debug!(?request, "non-numeric case number or year; nothing can match");
        return Err(LookupError::NotFound);
    };

    match store.find_by_key(&key)? {
        Some(record) => Ok(record.into()),
        None => {
            tracing::debug!(%key, "case not found");
            Err(LookupError::NotFound)
        }
    }
}

/// List cases whose type contains `case_type` (case-insensitive), shaped for display
pub fn search_by_type(store: &CaseStore, case_type: &str) -> Result<Vec<CaseDetails>, LookupError> {
    let case_type = case_type.trim();
    if case_type.is_empty() {
        return Err(LookupError::MissingFields);
    }

    let records = store.list_cases(Some(case_type))?;
    Ok(records.into_iter().map(CaseDetails::from).collect())
}

/// Validate the raw request into a key
///
/// Returns `Ok(None)` when the numbers are present but not integers.
fn parse_key(request: &SearchRequest) -> Result<Option<CaseKey>, LookupError> {
    let (Some(case_type), Some(case_number), Some(filing_year)) = (
        non_empty(&request.case_type),
        non_empty(&request.case_number),
        non_empty(&request.filing_year),
    ) else {
        return Err(LookupError::MissingFields);
    };

    let (Ok(case_number), Ok(filing_year)) = (
        case_number.trim().parse::<i64>(),
        filing_year.trim().parse::<i64>(),
    ) else {
        return Ok(None);
    };

    Ok(Some(CaseKey::new(case_type, case_number, filing_year)))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Format an ISO `YYYY-MM-DD` date as `DD Month YYYY`
///
/// A missing date becomes [`NOT_SCHEDULED`]; anything that does not parse is
/// returned unchanged.
pub fn format_date(date: Option<&str>) -> String {
    match date {
        None | Some("") => NOT_SCHEDULED.to_string(),
        Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(parsed) => parsed.format("%d %B %Y").to_string(),
            Err(_) => s.to_string(),
        },
    }
}

/// Long name for a case type abbreviation, or the abbreviation itself
pub fn case_type_name(case_type: &str) -> &str {
    match case_type {
        "WP(C)" | "W.P.(C)" => "Writ Petition (Civil)",
        "CRL.A" => "Criminal Appeal",
        "FAO" => "First Appeal Order",
        "CS(OS)" => "Civil Suit (Original Side)",
        "ARB.P." => "Arbitration Petition",
        "TEST.CAS." => "Testamentary Case",
        "ITA" => "Income Tax Appeal",
        "CO.PET." => "Company Petition",
        other => other,
    }
}
