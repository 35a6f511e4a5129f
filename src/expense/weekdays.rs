use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// A set of weekdays indexed Monday=0 through Sunday=6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const WORKWEEK: WeekdaySet = WeekdaySet(0b0001_1111);
    pub const WEEKEND: WeekdaySet = WeekdaySet(0b0110_0000);

    pub fn empty() -> Self {
        Self(0)
    }

    /// Builds a set from Monday-based indices; indices above 6 are ignored.
    pub fn from_indices<I>(indices: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let mut set = Self::empty();
        for index in indices {
            set.insert_index(index);
        }
        set
    }

    /// Parses the comma separated form used by stored records, e.g. `"0,5,6"`.
    ///
    /// Tokens that are not plain digits are skipped.
    pub fn parse_list(raw: &str) -> Self {
        Self::from_indices(
            raw.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()))
                .filter_map(|token| token.parse::<u8>().ok()),
        )
    }

    pub fn insert(&mut self, weekday: Weekday) {
        self.0 |= 1 << weekday.num_days_from_monday();
    }

    fn insert_index(&mut self, index: u8) {
        if index < 7 {
            self.0 |= 1 << index;
        }
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_monday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn indices(&self) -> impl Iterator<Item = u8> + '_ {
        (0..7u8).filter(move |index| self.0 & (1 << index) != 0)
    }
}

impl From<Vec<u8>> for WeekdaySet {
    fn from(value: Vec<u8>) -> Self {
        Self::from_indices(value)
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(value: WeekdaySet) -> Self {
        value.indices().collect()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        let mut set = Self::empty();
        for weekday in iter {
            set.insert(weekday);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    /// Formats back into the stored comma separated form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.indices().map(|index| index.to_string()).collect();
        f.write_str(&joined.join(","))
    }
}
