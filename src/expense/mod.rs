//! Expense records as consumed by the occurrence engine.

pub mod record;
pub mod rule;
pub mod weekdays;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use record::ExpenseRecord;
pub use rule::RecurrenceRule;
pub use weekdays::WeekdaySet;

/// An expense together with its recurrence definition and display attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub title: String,
    pub amount: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_name: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub rule: RecurrenceRule,
    #[serde(default)]
    pub custom_interval_days: i64,
    #[serde(default)]
    pub specific_weekdays: WeekdaySet,
    #[serde(default = "Expense::default_active")]
    pub active: bool,
}

impl Expense {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        amount: f64,
        start_date: NaiveDate,
        rule: RecurrenceRule,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            amount,
            currency: "USD".into(),
            category_name: None,
            category_icon: None,
            category_color: None,
            payment_method_name: None,
            start_date,
            rule,
            custom_interval_days: 0,
            specific_weekdays: WeekdaySet::empty(),
            active: true,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_category(
        mut self,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        self.category_name = Some(name.into());
        self.category_icon = Some(icon.into());
        self.category_color = Some(color.into());
        self
    }

    pub fn with_payment_method(mut self, name: impl Into<String>) -> Self {
        self.payment_method_name = Some(name.into());
        self
    }

    pub fn with_custom_interval(mut self, days: i64) -> Self {
        self.custom_interval_days = days;
        self
    }

    pub fn with_weekdays(mut self, weekdays: WeekdaySet) -> Self {
        self.specific_weekdays = weekdays;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn rule_label(&self) -> String {
        self.rule.label(self.custom_interval_days)
    }

    fn default_active() -> bool {
        true
    }
}

/// Keeps only active expenses, preserving order. The engine itself ignores the flag.
pub fn active_only<'a, I>(expenses: I) -> Vec<Expense>
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses
        .into_iter()
        .filter(|expense| expense.active)
        .cloned()
        .collect()
}
