//! Typed calendar queries as received from an API layer or the command line.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::errors::Result;
use crate::time::Clock;

/// `?year=&month=` style query. Missing parts default to the clock's current date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

impl CalendarQuery {
    pub fn new(year: Option<i32>, month: Option<u32>) -> Self {
        Self { year, month }
    }

    /// Parses `YYYY-MM`; an empty string yields the defaulting query.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let target: YearMonth = raw.parse()?;
        Ok(Self::new(Some(target.year()), Some(target.month())))
    }

    pub fn resolve(&self, clock: &dyn Clock) -> Result<YearMonth> {
        let today = clock.today();
        YearMonth::new(
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        )
    }
}
