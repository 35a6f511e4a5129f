use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use super::month::YearMonth;
use crate::expense::{Expense, RecurrenceRule};

/// A single calendar-day instance of an expense, carrying its display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub id: i64,
    pub title: String,
    pub amount: f64,
    pub currency: String,
    pub category_name: Option<String>,
    pub category_icon: Option<String>,
    pub category_color: Option<String>,
    pub payment_method_name: Option<String>,
    pub recurrence_rule: RecurrenceRule,
}

impl From<&Expense> for Occurrence {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            title: expense.title.clone(),
            amount: expense.amount,
            currency: expense.currency.clone(),
            category_name: expense.category_name.clone(),
            category_icon: expense.category_icon.clone(),
            category_color: expense.category_color.clone(),
            payment_method_name: expense.payment_method_name.clone(),
            recurrence_rule: expense.rule.clone(),
        }
    }
}

/// An occurrence paired with the date it falls on, as returned by range queries.
///
/// Serializes flat: the occurrence fields plus a `date` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedOccurrence {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub occurrence: Occurrence,
}

/// Every date of one month mapped to the occurrences falling on it.
///
/// Serializes as a JSON object keyed by `YYYY-MM-DD`; every day of the month is present
/// even when nothing occurs on it.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    target: YearMonth,
    days: BTreeMap<NaiveDate, Vec<Occurrence>>,
}

impl MonthGrid {
    pub fn empty(target: YearMonth) -> Self {
        let days = target.dates().map(|date| (date, Vec::new())).collect();
        Self { target, days }
    }

    pub fn target(&self) -> YearMonth {
        self.target
    }

    /// Appends an occurrence on `day` of the target month. Days outside the month are ignored.
    pub(crate) fn push(&mut self, day: u32, occurrence: Occurrence) -> bool {
        match self.target.date(day).and_then(|date| self.days.get_mut(&date)) {
            Some(bucket) => {
                bucket.push(occurrence);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&[Occurrence]> {
        self.days.get(&date).map(Vec::as_slice)
    }

    pub fn days(&self) -> &BTreeMap<NaiveDate, Vec<Occurrence>> {
        &self.days
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<Occurrence>)> {
        self.days.iter()
    }

    pub fn occurrence_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// True when no expense occurs anywhere in the month.
    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }

    pub fn into_days(self) -> BTreeMap<NaiveDate, Vec<Occurrence>> {
        self.days
    }
}

impl Serialize for MonthGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.days.serialize(serializer)
    }
}
