use std::collections::HashMap;

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, EnumIter, EnumString, Display, IntoStaticStr)]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

/// name => calendar index (1..=12)
static MONTH_INDEX: Lazy<HashMap<&'static str, u8>> = Lazy::new(|| {
    Month::iter()
        .map(|m| (m.name(), m.index()))
        .collect()
});

impl Month {
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    /// 1-based, as returned by `chrono::Datelike::month`
    pub fn from_number(number: u32) -> Option<Self> {
        Month::iter().find(|m| u32::from(m.index()) == number)
    }
}

/// Calendar index of a canonical month name; anything else is 0.
///
/// Matching is exact ("march" is not "March"), the same way the fixtures are
/// compared everywhere else.
pub fn month_index(name: &str) -> u8 {
    MONTH_INDEX.get(name).copied().unwrap_or(0)
}
