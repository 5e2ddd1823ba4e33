use super::test_support::{new_case, provisioned_store};
use super::*;

use rusqlite::Connection;

#[test]
fn test_provision_creates_directory_and_table() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("nested").join("database").join("cases.db");
    let store = CaseStore::new(&db_path);

    let report = store.provision().unwrap();

    assert!(report.created);
    assert!(!report.upgraded);
    assert!(db_path.exists());
    assert_eq!(store.count().unwrap(), 0);
    assert_eq!(store.statistics().unwrap().schema_version, SCHEMA_VERSION);
}

#[test]
fn test_provision_is_idempotent() {
    let (_tmp, store) = provisioned_store();
    store.insert_cases(&[new_case("WP(C)", 1, 2023)]).unwrap();

    let report = store.provision().unwrap();
    let again = store.provision().unwrap();

    assert_eq!(report, ProvisionReport::default());
    assert_eq!(again, ProvisionReport::default());
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_provision_upgrades_legacy_table() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("cases.db");

    // Loose table as created by the old runtime path: no CHECK constraints
    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE cases (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                case_type TEXT NOT NULL,
                case_number INTEGER NOT NULL,
                filing_year INTEGER NOT NULL,
                petitioner TEXT NOT NULL,
                respondent TEXT NOT NULL,
                filing_date TEXT,
                next_hearing TEXT,
                status TEXT,
                judge TEXT,
                latest_order TEXT,
                pdf_link TEXT,
                UNIQUE(case_type, case_number, filing_year)
            );
            INSERT INTO cases (case_type, case_number, filing_year, petitioner, respondent, filing_date)
                VALUES ('WP(C)', 1234, 2023, 'Environmental Action Group', 'Delhi Govt.', '2023-03-15');
            INSERT INTO cases (case_type, case_number, filing_year, petitioner, respondent)
                VALUES ('OLD', 5, 1990, 'Someone', 'Someone Else');
            INSERT INTO cases (case_type, case_number, filing_year, petitioner, respondent, filing_date)
                VALUES ('BAD', 6, 2020, 'Someone', 'Someone Else', '15/03/2020');
            "#,
        )
        .unwrap();
    }

    let store = CaseStore::new(&db_path);
    let report = store.provision().unwrap();

    assert!(!report.created);
    assert!(report.upgraded);
    assert_eq!(report.migrated_rows, 1);
    assert_eq!(report.dropped_rows, 2);
    assert_eq!(store.count().unwrap(), 1);
    assert!(store
        .find_by_key(&CaseKey::new("WP(C)", 1234, 2023))
        .unwrap()
        .is_some());

    // Strict constraints now apply
    let err = store.insert_cases(&[new_case("OLD", 7, 1990)]).unwrap_err();
    assert!(matches!(err, StoreError::Constraint(_)));
}

#[test]
fn test_find_by_key_exact_match() {
    let (_tmp, store) = provisioned_store();
    store
        .insert_cases(&[
            new_case("WP(C)", 1234, 2023),
            new_case("WP(C)", 1234, 2022),
            new_case("W.P.(C)", 1234, 2023),
        ])
        .unwrap();

    let found = store
        .find_by_key(&CaseKey::new("WP(C)", 1234, 2023))
        .unwrap()
        .unwrap();
    assert_eq!(found.key(), CaseKey::new("WP(C)", 1234, 2023));

    assert!(store
        .find_by_key(&CaseKey::new("wp(c)", 1234, 2023))
        .unwrap()
        .is_none());
    assert!(store
        .find_by_key(&CaseKey::new("WP(C)", 1234, 2024))
        .unwrap()
        .is_none());
}

#[test]
fn test_insert_rejects_empty_petitioner() {
    let (_tmp, store) = provisioned_store();
    let mut case = new_case("WP(C)", 1, 2023);
    case.petitioner = String::new();

    let err = store.insert_cases(&[case]).unwrap_err();
    assert!(matches!(err, StoreError::Constraint(_)));
}

#[test]
fn test_insert_rejects_non_positive_case_number() {
    let (_tmp, store) = provisioned_store();

    for number in [0, -5] {
        let err = store
            .insert_cases(&[new_case("WP(C)", number, 2023)])
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)), "case_number {number}");
    }
}

#[test]
fn test_insert_rejects_year_out_of_range() {
    let (_tmp, store) = provisioned_store();

    for year in [1999, 2031] {
        let err = store
            .insert_cases(&[new_case("WP(C)", 1, year)])
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)), "filing_year {year}");
    }

    assert_eq!(store.insert_cases(&[new_case("WP(C)", 1, 2000)]).unwrap(), 1);
    assert_eq!(store.insert_cases(&[new_case("WP(C)", 2, 2030)]).unwrap(), 1);
}

#[test]
fn test_insert_rejects_invalid_dates() {
    let (_tmp, store) = provisioned_store();

    for date in ["2023-02-30", "15/03/2023", "not a date", "2023-3-5"] {
        let mut case = new_case("WP(C)", 1, 2023);
        case.next_hearing = Some(date.to_string());
        let err = store.insert_cases(&[case]).unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)), "date {date}");
    }

    let mut case = new_case("WP(C)", 1, 2023);
    case.filing_date = None;
    case.next_hearing = Some("2024-02-29".to_string());
    assert_eq!(store.insert_cases(&[case]).unwrap(), 1);
}

#[test]
fn test_insert_batch_is_all_or_nothing() {
    let (_tmp, store) = provisioned_store();
    let mut bad = new_case("CRL.A", 3, 2022);
    bad.respondent = "   ".to_string();

    let err = store
        .insert_cases(&[new_case("WP(C)", 1, 2023), new_case("WP(C)", 2, 2023), bad])
        .unwrap_err();

    assert!(matches!(err, StoreError::Constraint(_)));
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_insert_rejects_duplicate_natural_key() {
    let (_tmp, store) = provisioned_store();
    store.insert_cases(&[new_case("FAO", 221, 2021)]).unwrap();

    let err = store
        .insert_cases(&[new_case("FAO", 221, 2021)])
        .unwrap_err();
    assert!(matches!(err, StoreError::Constraint(_)));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_existing_keys_requires_table() {
    let tmp = tempfile::tempdir().unwrap();
    let store = CaseStore::new(tmp.path().join("cases.db"));

    let err = store.existing_keys().unwrap_err();
    assert!(matches!(err, StoreError::MissingTable));
}

#[test]
fn test_type_distribution_orders_by_count() {
    let (_tmp, store) = provisioned_store();
    store
        .insert_cases(&[
            new_case("ITA", 1, 2022),
            new_case("WP(C)", 1, 2023),
            new_case("WP(C)", 2, 2023),
            new_case("CRL.A", 1, 2022),
            new_case("CRL.A", 2, 2022),
            new_case("CRL.A", 3, 2022),
        ])
        .unwrap();

    let distribution = store.type_distribution().unwrap();
    assert_eq!(
        distribution,
        vec![
            ("CRL.A".to_string(), 3),
            ("WP(C)".to_string(), 2),
            ("ITA".to_string(), 1),
        ]
    );
}

#[test]
fn test_list_cases_filters_by_type_case_insensitively() {
    let (_tmp, store) = provisioned_store();
    store
        .insert_cases(&[
            new_case("WP(C)", 1, 2023),
            new_case("W.P.(C)", 2, 2023),
            new_case("CRL.A", 3, 2022),
        ])
        .unwrap();

    assert_eq!(store.list_cases(None).unwrap().len(), 3);

    let crl = store.list_cases(Some("crl")).unwrap();
    assert_eq!(crl.len(), 1);
    assert_eq!(crl[0].case_type, "CRL.A");

    // Parentheses are literal, not pattern syntax
    let wp = store.list_cases(Some("p(c)")).unwrap();
    assert_eq!(wp.len(), 1);
    assert_eq!(wp[0].case_type, "WP(C)");

    assert!(store.list_cases(Some("XYZ")).unwrap().is_empty());
}

#[test]
fn test_reads_never_create_the_database() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("missing");
    let store = CaseStore::new(dir.join("cases.db"));

    assert!(matches!(store.count(), Err(StoreError::MissingTable)));
    assert!(matches!(store.type_distribution(), Err(StoreError::MissingTable)));
    assert!(matches!(store.list_cases(None), Err(StoreError::MissingTable)));
    assert!(matches!(
        store.find_by_key(&CaseKey::new("WP(C)", 1234, 2023)),
        Err(StoreError::MissingTable)
    ));
    assert_eq!(store.statistics().unwrap().total_cases, 0);

    assert!(!dir.exists());
}

#[test]
fn test_reads_on_file_without_table() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("empty.db");
    Connection::open(&db_path)
        .unwrap()
        .execute_batch("CREATE TABLE other (x INTEGER);")
        .unwrap();
    let store = CaseStore::new(&db_path);

    assert!(matches!(store.count(), Err(StoreError::MissingTable)));
    assert!(matches!(store.existing_keys(), Err(StoreError::MissingTable)));
}
