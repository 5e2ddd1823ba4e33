//! Sample data seeding and store verification
//!
//! The sample set is a fixed, hand-authored list of Delhi High Court style
//! cases used for demos and tests. Seeding only inserts the samples whose
//! natural key is not already present, so it can be run repeatedly.

use serde::Serialize;

use crate::core::store::{CaseStore, NewCase, StoreResult};

/// Result of a seeding run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Samples inserted by this run
    pub inserted: usize,
    /// Samples skipped because their natural key already existed
    pub already_present: usize,
    /// Total cases in the store after the run
    pub total: usize,
}

impl SeedReport {
    pub fn nothing_new(&self) -> bool {
        self.inserted == 0
    }
}

/// Record count and per-type breakdown of the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub total: usize,
    pub by_type: Vec<TypeCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub case_type: String,
    pub count: usize,
}

/// Insert every sample case that is not yet in the store
///
/// The missing samples go in as one batch; a constraint violation anywhere
/// leaves the store unchanged.
pub fn seed(store: &CaseStore) -> StoreResult<SeedReport> {
    seed_cases(store, sample_cases())
}

/// Insert the subset of `cases` whose natural keys are not yet stored
pub fn seed_cases(store: &CaseStore, cases: Vec<NewCase>) -> StoreResult<SeedReport> {
    let existing = store.existing_keys()?;
    let candidates = cases.len();

    let to_add: Vec<NewCase> = cases
        .into_iter()
        .filter(|case| !existing.contains(&case.key()))
        .collect();

    let inserted = store.insert_cases(&to_add)?;
    tracing::info!(inserted, skipped = candidates - inserted, "seeded sample cases");

    Ok(SeedReport {
        inserted,
        already_present: candidates - inserted,
        total: existing.len() + inserted,
    })
}

/// Count all records and break them down by case type
pub fn verify(store: &CaseStore) -> StoreResult<VerificationReport> {
    let total = store.count()?;
    let by_type = store
        .type_distribution()?
        .into_iter()
        .map(|(case_type, count)| TypeCount { case_type, count })
        .collect();

    Ok(VerificationReport { total, by_type })
}

/// The fixed sample data set
pub fn sample_cases() -> Vec<NewCase> {
    [
        // Writ petitions (civil)
        (
            "WP(C)", 1234, 2023, "Environmental Action Group", "Delhi Govt.",
            Some("2023-03-15"), Some("2023-09-10"), "Pending", "Justice Sharma",
            "Notice issued to respondents", "/orders/WPC1234.pdf",
        ),
        (
            "WP(C)", 4567, 2023, "Clean Air Initiative", "Central Pollution Control Board",
            Some("2023-04-01"), Some("2023-09-15"), "Pending", "Justice Singh",
            "CPCB to submit air quality report", "/orders/WPC4567.pdf",
        ),
        // Criminal appeals
        (
            "CRL.A", 567, 2022, "State of NCT Delhi", "Rajesh Kumar @ Monty",
            Some("2022-05-20"), Some("2023-08-25"), "Appeal Admitted", "Justice Verma",
            "Bail granted with ₹50,000 bond", "/orders/CRLA567.pdf",
        ),
        (
            "CRL.A", 1289, 2021, "State vs. Sanjay Verma", "Convicted Appellant",
            Some("2021-11-15"), Some("2023-09-20"), "Appeal Admitted", "Justice Reddy",
            "Sentence suspended pending appeal", "/orders/CRLA1289.pdf",
        ),
        // Commercial suits
        (
            "CS(OS)", 789, 2021, "M/s ABC Properties Pvt. Ltd.", "XYZ Developers Ltd.",
            Some("2021-01-10"), Some("2023-08-30"), "Part-Heard", "Justice Kapoor",
            "Interim injunction granted on property", "/orders/CSOS789.pdf",
        ),
        (
            "CS(OS)", 1024, 2022, "Amazon Seller Services", "Future Retail Ltd.",
            Some("2022-02-28"), Some("2023-08-22"), "Part-Heard", "Justice Khanna",
            "Arbitration clause upheld", "/orders/CSOS1024.pdf",
        ),
        // Arbitration
        (
            "ARB.P.", 75, 2023, "National Highways Authority", "Reliance Infrastructure Ltd.",
            Some("2023-03-10"), None, "Arbitrator Appointed", "Justice (Retd.) A.K. Sikri",
            "Tribunal formation ordered", "/orders/ARBP75.pdf",
        ),
        // Testamentary
        (
            "TEST.CAS.", 12, 2022, "Ms. Priya Malhotra", "Mr. Vikram Malhotra",
            Some("2022-08-05"), None, "Probate Granted", "Justice Oberoi",
            "Will validated after objections", "/orders/TESTCAS12.pdf",
        ),
        // Tax appeals
        (
            "ITA", 330, 2022, "Commissioner of Income Tax", "M/s Sunrise Enterprises",
            Some("2022-07-15"), Some("2023-10-05"), "Pending", "Justice Gupta",
            "Stay granted on tax demand", "/orders/ITA330.pdf",
        ),
        // Service matters
        (
            "W.P.(C)", 7890, 2023, "Delhi Police Constable Union", "GNCTD",
            Some("2023-05-20"), Some("2023-11-15"), "Pending", "Justice Malhotra",
            "Notice issued on promotion policy", "/orders/WPC7890.pdf",
        ),
        (
            "FAO", 221, 2021, "DDA", "Landowners Association",
            Some("2021-04-12"), Some("2023-09-18"), "Pending", "Justice Kohli",
            "Compensation enhanced by 20%", "/orders/FAO221.pdf",
        ),
        (
            "CO.PET.", 45, 2023, "M/s XYZ Traders", "Creditors Committee",
            Some("2023-02-15"), Some("2023-10-30"), "Under Consideration", "Justice Joshi",
            "Interim moratorium granted", "/orders/COPET45.pdf",
        ),
    ]
    .into_iter()
    .map(
        |(
            case_type,
            case_number,
            filing_year,
            petitioner,
            respondent,
            filing_date,
            next_hearing,
            status,
            judge,
            latest_order,
            pdf_link,
        )| NewCase {
            case_type: case_type.to_string(),
            case_number,
            filing_year,
            petitioner: petitioner.to_string(),
            respondent: respondent.to_string(),
            filing_date: filing_date.map(String::from),
            next_hearing: next_hearing.map(String::from),
            status: Some(status.to_string()),
            judge: Some(judge.to_string()),
            latest_order: Some(latest_order.to_string()),
            pdf_link: Some(pdf_link.to_string()),
        },
    )
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::test_support::{new_case, provisioned_store};
    use crate::core::store::StoreError;
    use std::collections::HashSet;

    #[test]
    fn test_sample_set_has_twelve_unique_keys() {
        let samples = sample_cases();
        assert_eq!(samples.len(), 12);

        let keys: HashSet<_> = samples.iter().map(NewCase::key).collect();
        assert_eq!(keys.len(), 12);
    }

    #[test]
    fn test_seed_empty_store() {
        let (_tmp, store) = provisioned_store();

        let report = seed(&store).unwrap();

        assert_eq!(report.inserted, 12);
        assert_eq!(report.already_present, 0);
        assert_eq!(report.total, 12);
        assert_eq!(store.count().unwrap(), 12);
    }

    #[test]
    fn test_seed_is_idempotent() {
        let (_tmp, store) = provisioned_store();

        seed(&store).unwrap();
        let second = seed(&store).unwrap();
        let third = seed(&store).unwrap();

        assert!(second.nothing_new());
        assert_eq!(second.already_present, 12);
        assert_eq!(second.total, 12);
        assert_eq!(third, second);
        assert_eq!(store.count().unwrap(), 12);
    }

    #[test]
    fn test_seed_fills_only_missing_samples() {
        let (_tmp, store) = provisioned_store();
        store
            .insert_cases(&[new_case("ITA", 330, 2022), new_case("OTHER", 1, 2020)])
            .unwrap();

        let report = seed(&store).unwrap();

        assert_eq!(report.inserted, 11);
        assert_eq!(report.already_present, 1);
        assert_eq!(report.total, 13);
        assert_eq!(store.count().unwrap(), 13);
    }

    #[test]
    fn test_seed_rolls_back_on_bad_record() {
        let (_tmp, store) = provisioned_store();
        let mut cases = sample_cases();
        cases.push(new_case("BAD", 1, 1999));

        let err = seed_cases(&store, cases).unwrap_err();

        assert!(matches!(err, StoreError::Constraint(_)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_seed_without_table_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CaseStore::new(tmp.path().join("cases.db"));

        assert!(matches!(seed(&store), Err(StoreError::MissingTable)));
    }

    #[test]
    fn test_verify_reports_type_breakdown() {
        let (_tmp, store) = provisioned_store();
        seed(&store).unwrap();

        let report = verify(&store).unwrap();

        assert_eq!(report.total, 12);
        let total: usize = report.by_type.iter().map(|t| t.count).sum();
        assert_eq!(total, 12);
        assert!(report
            .by_type
            .windows(2)
            .all(|pair| pair[0].count >= pair[1].count));
        // WP(C), CRL.A and CS(OS) each have two samples
        assert_eq!(report.by_type[0].count, 2);
        assert_eq!(report.by_type[0].case_type, "CRL.A");
        assert_eq!(report.by_type.len(), 9);
    }
}
