use billing_calendar::{
    calendar::{compute_month_occurrences, YearMonth},
    expense::{active_only, ExpenseRecord},
    utils::persistence,
    CalendarError, Expense, RecurrenceRule, WeekdaySet,
};
use chrono::NaiveDate;
use tempfile::TempDir;

const EXPORTED_ROWS: &str = r##"[
  {"id": 1, "title": "Rent", "description": "", "amount": 1200.0, "currency": "USD",
   "category_name": "Housing", "category_icon": "🏠", "category_color": "#6366f1",
   "payment_method_name": "Bank transfer", "payment_method_icon": "🏦",
   "billing_date": "2024-01-31", "billing_interval": "monthly",
   "custom_interval_days": 0, "specific_days": null, "is_active": 1},
  {"id": 2, "title": "Old gym", "amount": 30.0, "currency": "USD",
   "billing_date": "2023-05-01", "billing_interval": "monthly", "is_active": 0},
  {"id": 3, "title": "Climbing", "amount": 18.0,
   "billing_date": "2024-02-01", "billing_interval": "specific_days",
   "specific_days": "1,3", "is_active": true}
]"##;

#[test]
fn loads_exported_rows_and_builds_a_month() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("expenses.json");
    std::fs::write(&path, EXPORTED_ROWS).unwrap();

    let expenses = persistence::load_expenses_from_file(&path, "CAD").unwrap();
    assert_eq!(expenses.len(), 3);
    assert_eq!(expenses[2].currency, "CAD");

    let active = active_only(&expenses);
    assert_eq!(active.len(), 2);

    let target = YearMonth::new(2024, 2).unwrap();
    let grid = compute_month_occurrences(target, &active);
    let feb_29 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let titles: Vec<&str> = grid
        .get(feb_29)
        .unwrap()
        .iter()
        .map(|o| o.title.as_str())
        .collect();
    // Feb 29 2024 is a Thursday.
    assert_eq!(titles, vec!["Rent", "Climbing"]);
}

#[test]
fn saved_records_load_back_into_equal_expenses() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("expenses.json");
    let start = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
    let expenses = vec![
        Expense::new(1, "Tennis", 22.0, start, RecurrenceRule::SpecificDays)
            .with_currency("GBP")
            .with_weekdays(WeekdaySet::from_indices([1, 5])),
        Expense::new(2, "Filter", 9.0, start, RecurrenceRule::Custom)
            .with_currency("GBP")
            .with_custom_interval(45)
            .inactive(),
    ];
    let records: Vec<ExpenseRecord> = expenses.iter().map(ExpenseRecord::from).collect();

    persistence::save_records_to_file(&records, &path).unwrap();
    assert!(!path.with_extension("tmp").exists());

    let loaded = persistence::load_expenses_from_file(&path, "USD").unwrap();
    assert_eq!(loaded, expenses);
}

#[test]
fn invalid_rows_are_reported_with_their_id() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("expenses.json");
    std::fs::write(
        &path,
        r#"[{"id": 9, "title": "Broken", "amount": 1.0, "billing_date": "31/01/2024"}]"#,
    )
    .unwrap();

    match persistence::load_expenses_from_file(&path, "USD") {
        Err(CalendarError::InvalidRecord { id, reason }) => {
            assert_eq!(id, 9);
            assert!(reason.contains("31/01/2024"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let result = persistence::load_records_from_file(&temp.path().join("absent.json"));
    assert!(matches!(result, Err(CalendarError::Io(_))));
}
