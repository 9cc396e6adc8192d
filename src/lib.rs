mod consts;
pub mod grammar;
pub mod normalize;
mod parser;
mod prelude;
mod types;

pub use consts::*;
pub use grammar::{FormatGrammar, FormatRegistry, Precision};
pub use normalize::{Locale, NormalizedText, Normalizer, normalize};
pub use parser::{DateMatch, DateParser, ParserConfig};
pub use types::{
    ComponentError, DateField, Day, Month, Year, days_in_month, expand_two_digit_year,
    is_leap_year,
};

use crate::prelude::*;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::LazyLock;

static DEFAULT_PARSER: LazyLock<DateParser> = LazyLock::new(DateParser::default);

/// Parses free-form date text with every locale enabled.
///
/// # Errors
/// See [`DateParser::parse_match`].
pub fn parse(raw: &str) -> Result<ParsedDate, ParseFailure> {
    DEFAULT_PARSER.parse(raw)
}

/// Like [`parse`], but also reports the grammar and normalized text.
///
/// # Errors
/// See [`DateParser::parse_match`].
pub fn parse_match(raw: &str) -> Result<DateMatch, ParseFailure> {
    DEFAULT_PARSER.parse_match(raw)
}

/// A proleptic Gregorian calendar date.
/// Every value is a real calendar day; construction is the validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct ParsedDate {
    year: Year,
    month: Month,
    day: Day,
}

/// Why a string could not be turned into a [`ParsedDate`].
///
/// Both kinds are terminal: the input is malformed and retrying will not help.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFailure {
    /// The normalized text fits none of the registered grammars.
    #[error("Date format for '{text}' not recognized")]
    NoGrammarMatched { text: String },

    /// A grammar fit, but its numbers are not a calendar date.
    #[error("Date '{text}' read as {grammar} has an invalid {field}: {value}")]
    InvalidNumericRange {
        text: String,
        grammar: &'static str,
        field: DateField,
        value: u16,
    },
}

impl ParseFailure {
    /// The normalized text that failed
    pub fn text(&self) -> &str {
        match self {
            Self::NoGrammarMatched { text } | Self::InvalidNumericRange { text, .. } => text,
        }
    }
}

impl ParsedDate {
    /// Builds a date, checking year, then month, then day.
    ///
    /// # Errors
    /// Returns the first `ComponentError` found.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ComponentError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// `(year, month, day)` as plain integers
    pub const fn to_tuple(&self) -> (u16, u8, u8) {
        (self.year(), self.month(), self.day())
    }
}

impl FromStr for ParsedDate {
    type Err = ParseFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl TryFrom<(u16, u8, u8)> for ParsedDate {
    type Error = ComponentError;

    fn try_from((year, month, day): (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl serde::Serialize for ParsedDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ParsedDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
