use billing_calendar::{
    calendar::{compute_month_occurrences, YearMonth},
    Expense, RecurrenceRule, WeekdaySet,
};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_expenses(count: usize) -> Vec<Expense> {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let rules = RecurrenceRule::KNOWN;

    (0..count)
        .map(|idx| {
            let rule = rules[idx % rules.len()].clone();
            Expense::new(
                idx as i64,
                format!("Expense {}", idx),
                10.0 + (idx % 90) as f64,
                start + Duration::days((idx % 2000) as i64),
                rule,
            )
            .with_custom_interval(3 + (idx % 40) as i64)
            .with_weekdays(WeekdaySet::from_indices([(idx % 7) as u8]))
        })
        .collect()
}

fn bench_month_grid(c: &mut Criterion) {
    let expenses = build_expenses(black_box(5_000));
    let target = YearMonth::new(2025, 2).unwrap();
    let distant = YearMonth::new(2095, 8).unwrap();

    c.bench_function("month_grid_5k", |b| {
        b.iter(|| compute_month_occurrences(target, black_box(&expenses)))
    });

    c.bench_function("month_grid_5k_distant", |b| {
        b.iter(|| compute_month_occurrences(distant, black_box(&expenses)))
    });
}

criterion_group!(benches, bench_month_grid);
criterion_main!(benches);
