use std::fs;

use budget_grid::{
    errors::GridError,
    grid::{Bucket, CategoryId},
    rows::PlanRow,
    storage::{JsonPlanStorage, PlanStorage},
    BudgetSession,
};
use chrono::NaiveDate;
use tempfile::tempdir;

fn session() -> BudgetSession {
    BudgetSession::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
}

#[test]
fn saved_plan_reloads_into_a_fresh_session() {
    let temp = tempdir().unwrap();
    let storage = JsonPlanStorage::new(temp.path()).unwrap();

    let mut original = session();
    let rent = CategoryId::from("rent");
    original.set_propagation(&rent, false);
    let march = original.column(2).unwrap();
    original.apply_edit(&rent, &march, "1200");
    let salary = CategoryId::from("salary");
    let january = original.column(0).unwrap();
    original.apply_edit(&salary, &january, "4000");

    let rows = original.export_rows();
    // salary propagates through the whole window, rent stays in March.
    assert_eq!(rows.len(), 13);
    storage.save("Household 2025", &rows).unwrap();

    let mut restored = session();
    let report = restored.load_rows(&storage.load("household 2025").unwrap());
    assert_eq!(report.imported, 13);
    assert_eq!(report.dropped(), 0);
    assert_eq!(restored.cell_value(&rent, &march), 1200.0);
    assert_eq!(restored.store().get(&salary, 11), 4000.0);
    // Months past the window are not persisted.
    assert_eq!(restored.store().get(&salary, 12), 0.0);
    assert!(!restored.can_undo());
}

#[test]
fn rows_outside_the_window_or_registry_are_skipped() {
    let rows = vec![
        PlanRow {
            year: 2024,
            month: 12,
            bucket: Bucket::Living,
            category: "Rent".into(),
            amount: 10.0,
        },
        PlanRow {
            year: 2026,
            month: 1,
            bucket: Bucket::Living,
            category: "Rent".into(),
            amount: 10.0,
        },
        PlanRow {
            year: 2025,
            month: 6,
            bucket: Bucket::Present,
            category: "Yacht".into(),
            amount: 10.0,
        },
        PlanRow {
            year: 2025,
            month: 6,
            bucket: Bucket::Living,
            category: "rent".into(),
            amount: 750.0,
        },
    ];

    let mut session = session();
    let report = session.load_rows(&rows);
    assert_eq!(report.imported, 1);
    assert_eq!(report.out_of_window, 2);
    assert_eq!(report.unmatched, 1);
    assert_eq!(session.store().get(&CategoryId::from("rent"), 5), 750.0);
}

#[test]
fn plan_files_are_json_arrays_of_rows() {
    let temp = tempdir().unwrap();
    let storage = JsonPlanStorage::new(temp.path()).unwrap();
    let rows = vec![PlanRow {
        year: 2025,
        month: 2,
        bucket: Bucket::Income,
        category: "Salary".into(),
        amount: 3500.0,
    }];
    let path = storage.save("demo", &rows).unwrap();

    let json = fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"bucket\": \"INCOME\""));
    assert!(json.contains("\"category\": \"Salary\""));
    assert_eq!(storage.list().unwrap(), vec!["demo".to_string()]);
}

#[test]
fn failed_save_keeps_the_previous_file() {
    let temp = tempdir().unwrap();
    let storage = JsonPlanStorage::new(temp.path()).unwrap();
    let path = storage.save("reliable", &[]).unwrap();
    let original = fs::read_to_string(&path).unwrap();

    // A directory where the temporary file should go makes the write fail.
    fs::create_dir_all(path.with_extension("json.tmp")).unwrap();
    let rows = vec![PlanRow {
        year: 2025,
        month: 1,
        bucket: Bucket::Living,
        category: "Rent".into(),
        amount: 1.0,
    }];
    assert!(matches!(
        storage.save("reliable", &rows),
        Err(GridError::Io(_))
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn missing_plans_are_reported_by_name() {
    let temp = tempdir().unwrap();
    let storage = JsonPlanStorage::new(temp.path()).unwrap();
    match storage.load("ghost") {
        Err(GridError::NotFound(name)) => assert_eq!(name, "ghost"),
        other => panic!("unexpected result: {other:?}"),
    }
}
