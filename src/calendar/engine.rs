use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::grid::{DatedOccurrence, MonthGrid, Occurrence};
use super::month::{shift_months, YearMonth};
use crate::errors::Result;
use crate::expense::{Expense, RecurrenceRule, WeekdaySet};

/// Builds the occurrence grid for `target` from the given expenses.
///
/// Every day of the month gets a key. Occurrences are appended in expense order and,
/// within one expense, in ascending day order. Expenses are not filtered on `active`;
/// callers pass the set they want rendered.
pub fn compute_month_occurrences(target: YearMonth, expenses: &[Expense]) -> MonthGrid {
    let mut grid = MonthGrid::empty(target);
    for expense in expenses {
        for day in occurrence_days(expense, target) {
            grid.push(day, Occurrence::from(expense));
        }
    }
    tracing::debug!(
        month = %target,
        expenses = expenses.len(),
        occurrences = grid.occurrence_count(),
        "computed month occurrences"
    );
    grid
}

/// Checked entry point for raw `(year, month)` input such as query parameters.
pub fn month_occurrences(year: i32, month: u32, expenses: &[Expense]) -> Result<MonthGrid> {
    let target = YearMonth::new(year, month)?;
    Ok(compute_month_occurrences(target, expenses))
}

/// Days (1-based, ascending) of `target` on which `expense` occurs.
pub fn occurrence_days(expense: &Expense, target: YearMonth) -> Vec<u32> {
    let start = expense.start_date;
    match &expense.rule {
        RecurrenceRule::Once => {
            if target.contains(start) {
                vec![start.day()]
            } else {
                Vec::new()
            }
        }
        RecurrenceRule::Daily => days_matching(start, target, |_| true),
        RecurrenceRule::Weekdays => {
            days_matching(start, target, |weekday| WeekdaySet::WORKWEEK.contains(weekday))
        }
        RecurrenceRule::Weekends => {
            days_matching(start, target, |weekday| WeekdaySet::WEEKEND.contains(weekday))
        }
        RecurrenceRule::SpecificDays => {
            let selected = expense.specific_weekdays;
            if selected.is_empty() {
                return Vec::new();
            }
            days_matching(start, target, |weekday| selected.contains(weekday))
        }
        RecurrenceRule::Monthly => clamped_day(start, target),
        RecurrenceRule::Yearly => {
            if start.month() == target.month() {
                clamped_day(start, target)
            } else {
                Vec::new()
            }
        }
        RecurrenceRule::Custom => match u64::try_from(expense.custom_interval_days) {
            Ok(step) if step > 0 => step_days(start, target, step),
            _ => Vec::new(),
        },
        RecurrenceRule::Weekly => step_days(start, target, 7),
        RecurrenceRule::Biweekly => step_days(start, target, 14),
        RecurrenceRule::Bimonthly => step_months(start, target, 2),
        RecurrenceRule::Quarterly => step_months(start, target, 3),
        RecurrenceRule::Semiannually => step_months(start, target, 6),
        RecurrenceRule::Unknown(tag) => {
            tracing::debug!(expense = expense.id, rule = %tag, "skipping unrecognised recurrence rule");
            Vec::new()
        }
    }
}

/// Every occurrence dated within `from..=to`, ascending by date.
///
/// Reversed bounds are swapped. Each touched month goes through
/// [`compute_month_occurrences`], so a range never disagrees with the month grids.
pub fn occurrences_between(
    from: NaiveDate,
    to: NaiveDate,
    expenses: &[Expense],
) -> Vec<DatedOccurrence> {
    let (from, to) = if from <= to { (from, to) } else { (to, from) };
    let last = YearMonth::of(to);
    let mut month = YearMonth::of(from);
    let mut found = Vec::new();
    loop {
        let grid = compute_month_occurrences(month, expenses);
        for (date, bucket) in grid.into_days() {
            if date < from || date > to {
                continue;
            }
            found.extend(
                bucket
                    .into_iter()
                    .map(|occurrence| DatedOccurrence { date, occurrence }),
            );
        }
        if month == last {
            break;
        }
        month = match month.next() {
            Ok(next) => next,
            Err(_) => break,
        };
    }
    found
}

pub fn occurrence_count_in_month(expense: &Expense, target: YearMonth) -> usize {
    occurrence_days(expense, target).len()
}

/// Whether `expense` occurs on `date`, answered through the same month computation
/// that builds the grid.
pub fn occurs_on(expense: &Expense, date: NaiveDate) -> bool {
    occurrence_days(expense, YearMonth::of(date)).contains(&date.day())
}

fn days_matching<F>(start: NaiveDate, target: YearMonth, keep: F) -> Vec<u32>
where
    F: Fn(Weekday) -> bool,
{
    target
        .dates()
        .filter(|date| *date >= start && keep(date.weekday()))
        .map(|date| date.day())
        .collect()
}

fn clamped_day(start: NaiveDate, target: YearMonth) -> Vec<u32> {
    let day = start.day().min(target.days_in_month());
    match target.date(day) {
        Some(date) if date >= start => vec![day],
        _ => Vec::new(),
    }
}

/// Walks `start + k * step` days. Months before `target` are skipped without emitting;
/// the skip is computed directly, landing on the same date a one-step-at-a-time walk would.
fn step_days(start: NaiveDate, target: YearMonth, step: u64) -> Vec<u32> {
    let first = target.first_day();
    let mut current = start;
    if start < first {
        let behind = (first - start).num_days() as u64;
        let steps = behind.div_ceil(step);
        current = match steps
            .checked_mul(step)
            .and_then(|offset| start.checked_add_days(Days::new(offset)))
        {
            Some(date) => date,
            None => return Vec::new(),
        };
    }

    let mut days = Vec::new();
    while target.contains(current) {
        if current >= start {
            days.push(current.day());
        }
        current = match current.checked_add_days(Days::new(step)) {
            Some(next) => next,
            None => break,
        };
    }
    days
}

/// Walks the anchor forward `months` at a time, re-clamping from the previous anchor
/// at every step, until it reaches the target month.
fn step_months(start: NaiveDate, target: YearMonth, months: u32) -> Vec<u32> {
    let first = target.first_day();
    let mut anchor = start;
    while anchor < first {
        anchor = match shift_months(anchor, months) {
            Some(next) => next,
            None => return Vec::new(),
        };
    }
    if target.contains(anchor) {
        vec![anchor.day()]
    } else {
        Vec::new()
    }
}
