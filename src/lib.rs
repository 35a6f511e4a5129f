#![doc(test(attr(deny(warnings))))]

//! Billing Calendar expands recurring expenses into day-by-day month grids.
//!
//! The core is [`calendar::compute_month_occurrences`]; the remaining modules cover the
//! validated record schema, query parsing, configuration and logging around it.

pub mod calendar;
pub mod config;
pub mod errors;
pub mod expense;
pub mod request;
pub mod time;
pub mod utils;

pub use calendar::{compute_month_occurrences, MonthGrid, Occurrence, YearMonth};
pub use errors::{CalendarError, Result};
pub use expense::{Expense, ExpenseRecord, RecurrenceRule, WeekdaySet};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup debug log.
pub fn init() {
    init_with_filter(None);
}

/// Like [`init`], adding `directive` to the log filter.
pub fn init_with_filter(directive: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        tracing::debug!("Billing Calendar tracing initialized.");
    });
}
