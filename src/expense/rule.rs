use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How an expense repeats across the calendar.
///
/// Tags that this version does not recognise are preserved as [`RecurrenceRule::Unknown`]
/// so older or newer records still load; such expenses produce no occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecurrenceRule {
    #[default]
    Once,
    Daily,
    Weekdays,
    Weekends,
    Weekly,
    Biweekly,
    Monthly,
    Bimonthly,
    Quarterly,
    Semiannually,
    Yearly,
    Custom,
    SpecificDays,
    Unknown(String),
}

impl RecurrenceRule {
    /// Every rule this version understands, in display order.
    pub const KNOWN: [RecurrenceRule; 13] = [
        RecurrenceRule::Once,
        RecurrenceRule::Daily,
        RecurrenceRule::Weekdays,
        RecurrenceRule::Weekends,
        RecurrenceRule::SpecificDays,
        RecurrenceRule::Weekly,
        RecurrenceRule::Biweekly,
        RecurrenceRule::Monthly,
        RecurrenceRule::Bimonthly,
        RecurrenceRule::Quarterly,
        RecurrenceRule::Semiannually,
        RecurrenceRule::Yearly,
        RecurrenceRule::Custom,
    ];

    pub fn tag(&self) -> &str {
        match self {
            RecurrenceRule::Once => "once",
            RecurrenceRule::Daily => "daily",
            RecurrenceRule::Weekdays => "weekdays",
            RecurrenceRule::Weekends => "weekends",
            RecurrenceRule::Weekly => "weekly",
            RecurrenceRule::Biweekly => "biweekly",
            RecurrenceRule::Monthly => "monthly",
            RecurrenceRule::Bimonthly => "bimonthly",
            RecurrenceRule::Quarterly => "quarterly",
            RecurrenceRule::Semiannually => "semiannually",
            RecurrenceRule::Yearly => "yearly",
            RecurrenceRule::Custom => "custom",
            RecurrenceRule::SpecificDays => "specific_days",
            RecurrenceRule::Unknown(tag) => tag,
        }
    }

    /// Human readable label. `custom_interval_days` only affects [`RecurrenceRule::Custom`].
    pub fn label(&self, custom_interval_days: i64) -> String {
        match self {
            RecurrenceRule::Once => "One-time".into(),
            RecurrenceRule::Daily => "Daily".into(),
            RecurrenceRule::Weekdays => "Weekdays".into(),
            RecurrenceRule::Weekends => "Weekends".into(),
            RecurrenceRule::Weekly => "Weekly".into(),
            RecurrenceRule::Biweekly => "Biweekly".into(),
            RecurrenceRule::Monthly => "Monthly".into(),
            RecurrenceRule::Bimonthly => "Bimonthly".into(),
            RecurrenceRule::Quarterly => "Quarterly".into(),
            RecurrenceRule::Semiannually => "Semi-annually".into(),
            RecurrenceRule::Yearly => "Yearly".into(),
            RecurrenceRule::Custom => format!("Every {}d", custom_interval_days),
            RecurrenceRule::SpecificDays => "Specific days".into(),
            RecurrenceRule::Unknown(tag) => tag.clone(),
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, RecurrenceRule::Once | RecurrenceRule::Unknown(_))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, RecurrenceRule::Unknown(_))
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for RecurrenceRule {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(match raw.trim() {
            "once" => RecurrenceRule::Once,
            "daily" => RecurrenceRule::Daily,
            "weekdays" => RecurrenceRule::Weekdays,
            "weekends" => RecurrenceRule::Weekends,
            "weekly" => RecurrenceRule::Weekly,
            "biweekly" => RecurrenceRule::Biweekly,
            "monthly" => RecurrenceRule::Monthly,
            "bimonthly" => RecurrenceRule::Bimonthly,
            "quarterly" => RecurrenceRule::Quarterly,
            "semiannually" => RecurrenceRule::Semiannually,
            "yearly" => RecurrenceRule::Yearly,
            "custom" => RecurrenceRule::Custom,
            "specific_days" | "specific_weekdays" => RecurrenceRule::SpecificDays,
            other => RecurrenceRule::Unknown(other.to_string()),
        })
    }
}

impl From<String> for RecurrenceRule {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(rule) => rule,
            Err(never) => match never {},
        }
    }
}

impl From<RecurrenceRule> for String {
    fn from(value: RecurrenceRule) -> Self {
        value.tag().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_parse_back_to_themselves() {
        for rule in RecurrenceRule::KNOWN.iter() {
            let parsed: RecurrenceRule = rule.tag().parse().unwrap();
            assert_eq!(&parsed, rule);
        }
    }

    #[test]
    fn unknown_tags_are_preserved() {
        let rule: RecurrenceRule = serde_json::from_str("\"fortnightly\"").unwrap();
        assert_eq!(rule, RecurrenceRule::Unknown("fortnightly".into()));
        assert_eq!(serde_json::to_string(&rule).unwrap(), "\"fortnightly\"");
        assert!(!rule.is_known());
    }

    #[test]
    fn specific_weekdays_alias_is_accepted() {
        let rule: RecurrenceRule = "specific_weekdays".parse().unwrap();
        assert_eq!(rule, RecurrenceRule::SpecificDays);
        assert_eq!(rule.tag(), "specific_days");
    }

    #[test]
    fn labels_match_display_names() {
        assert_eq!(RecurrenceRule::Once.label(0), "One-time");
        assert_eq!(RecurrenceRule::Semiannually.label(0), "Semi-annually");
        assert_eq!(RecurrenceRule::Custom.label(10), "Every 10d");
    }
}
