//! Wire schema for expense rows handed over by the persistence layer.
//!
//! Rows are loosely typed at the boundary (dates as strings, flags as `0/1`,
//! weekday sets as comma separated text). [`ExpenseRecord::into_expense`] checks
//! the required fields and produces the strongly typed [`Expense`] the engine uses.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::{Expense, RecurrenceRule, WeekdaySet};
use crate::errors::{CalendarError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub category_icon: Option<String>,
    #[serde(default)]
    pub category_color: Option<String>,
    #[serde(default)]
    pub payment_method_name: Option<String>,
    #[serde(default)]
    pub payment_method_icon: Option<String>,
    pub billing_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub billing_interval: RecurrenceRule,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_interval_days: i64,
    #[serde(default)]
    pub specific_days: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: ActiveFlag,
}

/// Nullable columns come through as explicit `null`; treat them like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts both JSON booleans and the `0/1` integers stored by SQL backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActiveFlag {
    Bool(bool),
    Int(i64),
}

impl ActiveFlag {
    pub fn is_set(self) -> bool {
        match self {
            ActiveFlag::Bool(value) => value,
            ActiveFlag::Int(value) => value != 0,
        }
    }
}

impl Default for ActiveFlag {
    fn default() -> Self {
        ActiveFlag::Bool(true)
    }
}

impl ExpenseRecord {
    /// Validates the record and converts it into an [`Expense`].
    ///
    /// `default_currency` fills in records stored without a currency.
    pub fn into_expense(self, default_currency: &str) -> Result<Expense> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(self.invalid("title must not be empty"));
        }
        if !self.amount.is_finite() {
            return Err(self.invalid("amount must be a finite number"));
        }
        let start_date = parse_date(&self.billing_date)
            .map_err(|_| self.invalid(format!("unparseable billing date `{}`", self.billing_date)))?;

        let specific_weekdays = self
            .specific_days
            .as_deref()
            .map(WeekdaySet::parse_list)
            .unwrap_or_default();
        let currency = self
            .currency
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .unwrap_or(default_currency)
            .to_uppercase();

        Ok(Expense {
            id: self.id,
            title: title.to_string(),
            amount: self.amount,
            currency,
            category_name: self.category_name,
            category_icon: self.category_icon,
            category_color: self.category_color,
            payment_method_name: self.payment_method_name,
            start_date,
            rule: self.billing_interval,
            custom_interval_days: self.custom_interval_days,
            specific_weekdays,
            active: self.is_active.is_set(),
        })
    }

    fn invalid(&self, reason: impl Into<String>) -> CalendarError {
        CalendarError::InvalidRecord {
            id: self.id,
            reason: reason.into(),
        }
    }
}

impl From<&Expense> for ExpenseRecord {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            title: expense.title.clone(),
            description: String::new(),
            amount: expense.amount,
            currency: Some(expense.currency.clone()),
            category_name: expense.category_name.clone(),
            category_icon: expense.category_icon.clone(),
            category_color: expense.category_color.clone(),
            payment_method_name: expense.payment_method_name.clone(),
            payment_method_icon: None,
            billing_date: expense.start_date.format(DATE_FORMAT).to_string(),
            billing_interval: expense.rule.clone(),
            custom_interval_days: expense.custom_interval_days,
            specific_days: (!expense.specific_weekdays.is_empty())
                .then(|| expense.specific_weekdays.to_string()),
            is_active: ActiveFlag::Bool(expense.active),
        }
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|err| CalendarError::InvalidDate(format!("`{}`: {}", raw, err)))
}

/// Converts a batch of records, stopping at the first invalid one.
pub fn into_expenses<I>(records: I, default_currency: &str) -> Result<Vec<Expense>>
where
    I: IntoIterator<Item = ExpenseRecord>,
{
    records
        .into_iter()
        .map(|record| record.into_expense(default_currency))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn row(json: &str) -> ExpenseRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn converts_sql_style_row() {
        let record = row(
            r##"{
                "id": 4, "title": "Yoga", "amount": 12.5, "currency": null,
                "category_name": "Health", "category_icon": "🧘", "category_color": "#10b981",
                "payment_method_name": null, "billing_date": "2024-03-02",
                "billing_interval": "specific_days", "custom_interval_days": 0,
                "specific_days": "1,3", "is_active": 1
            }"##,
        );
        let expense = record.into_expense("eur").unwrap();
        assert_eq!(expense.currency, "EUR");
        assert_eq!(expense.rule, RecurrenceRule::SpecificDays);
        assert!(expense.specific_weekdays.contains(Weekday::Tue));
        assert!(expense.specific_weekdays.contains(Weekday::Thu));
        assert_eq!(expense.specific_weekdays.len(), 2);
        assert!(expense.active);
        assert_eq!(expense.start_date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn zero_flag_marks_inactive() {
        let record = row(
            r#"{"id": 1, "title": "Old", "amount": 1.0, "billing_date": "2024-01-01", "is_active": 0}"#,
        );
        assert!(!record.into_expense("USD").unwrap().active);
    }

    #[test]
    fn rejects_bad_dates_and_titles() {
        let bad_date = row(r#"{"id": 2, "title": "X", "amount": 1.0, "billing_date": "2024-02-30"}"#);
        match bad_date.into_expense("USD") {
            Err(CalendarError::InvalidRecord { id, .. }) => assert_eq!(id, 2),
            other => panic!("unexpected result: {:?}", other),
        }

        let blank = row(r#"{"id": 3, "title": "  ", "amount": 1.0, "billing_date": "2024-02-01"}"#);
        assert!(blank.into_expense("USD").is_err());
    }

    #[test]
    fn null_columns_fall_back_to_defaults() {
        let record = row(
            r#"{
                "id": 6, "title": "Imported", "description": null, "amount": 4.0,
                "currency": null, "category_name": null, "category_icon": null,
                "category_color": null, "payment_method_name": null,
                "payment_method_icon": null, "billing_date": "2024-05-05",
                "billing_interval": null, "custom_interval_days": null,
                "specific_days": null, "is_active": null
            }"#,
        );
        assert_eq!(record.description, "");
        assert_eq!(record.billing_interval, RecurrenceRule::Once);
        assert_eq!(record.custom_interval_days, 0);

        let expense = record.into_expense("USD").unwrap();
        assert_eq!(expense.rule, RecurrenceRule::Once);
        assert!(expense.active);
        assert!(expense.specific_weekdays.is_empty());
        assert_eq!(expense.currency, "USD");
    }

    #[test]
    fn unknown_interval_survives_conversion() {
        let record = row(
            r#"{"id": 5, "title": "Later", "amount": 1.0, "billing_date": "2024-02-01", "billing_interval": "every_full_moon"}"#,
        );
        let expense = record.into_expense("USD").unwrap();
        assert_eq!(expense.rule, RecurrenceRule::Unknown("every_full_moon".into()));
        assert_eq!(ExpenseRecord::from(&expense).billing_interval.tag(), "every_full_moon");
    }
}
