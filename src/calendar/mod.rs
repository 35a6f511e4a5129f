//! Occurrence calculator: expands recurring expenses into a day-by-day month grid.

pub mod engine;
pub mod grid;
pub mod month;

pub use engine::{
    compute_month_occurrences, month_occurrences, occurrence_count_in_month, occurrence_days,
    occurrences_between, occurs_on,
};
pub use grid::{DatedOccurrence, MonthGrid, Occurrence};
pub use month::{days_in_month, is_leap_year, shift_months, YearMonth};
