use billing_calendar::{
    calendar::compute_month_occurrences,
    init,
    request::CalendarQuery,
    time::FixedClock,
    Expense, RecurrenceRule,
};
use chrono::NaiveDate;

#[test]
fn month_query_smoke() {
    init();

    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let target = CalendarQuery::default()
        .resolve(&FixedClock::at_date(today))
        .unwrap();

    let expenses = vec![Expense::new(
        1,
        "Streaming",
        9.99,
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        RecurrenceRule::Monthly,
    )];

    let grid = compute_month_occurrences(target, &expenses);
    assert_eq!(grid.days().len(), 31);
    assert_eq!(grid.occurrence_count(), 1);
    assert!(!grid.is_empty());
    assert_eq!(
        grid.get(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()).unwrap()[0].title,
        "Streaming"
    );
}
