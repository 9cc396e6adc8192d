use crate::consts::{
    CENTURY_CYCLE, CURRENT_CENTURY, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MONTH_ABBREVIATIONS, MONTH_NAMES, PREVIOUS_CENTURY,
    TWO_DIGIT_YEAR_PIVOT,
};
use crate::prelude::*;
use std::num::{NonZeroU8, NonZeroU16};

/// The calendar component a numeric value was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DateField {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
}

/// A year, month or day value that does not exist on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ComponentError {
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
}

impl std::error::Error for ComponentError {}

impl ComponentError {
    /// The component that was out of range
    pub const fn field(&self) -> DateField {
        match self {
            Self::InvalidYear(_) => DateField::Year,
            Self::InvalidMonth(_) => DateField::Month,
            Self::InvalidDay { .. } => DateField::Day,
        }
    }

    /// The rejected value, widened so every field fits
    pub fn value(&self) -> u16 {
        match *self {
            Self::InvalidYear(year) => year,
            Self::InvalidMonth(month) => u16::from(month),
            Self::InvalidDay { day, .. } => u16::from(day),
        }
    }
}

/// A year in `1..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{_0}")]
pub struct Year(NonZeroU16);

impl Year {
    /// # Errors
    /// Returns `ComponentError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ComponentError> {
        match NonZeroU16::new(value) {
            Some(year) if value <= MAX_YEAR => Ok(Self(year)),
            _ => Err(ComponentError::InvalidYear(value)),
        }
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

/// A month in `1..=12`, with its English spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{_0}")]
pub struct Month(NonZeroU8);

impl Month {
    /// # Errors
    /// Returns `ComponentError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ComponentError> {
        match NonZeroU8::new(value) {
            Some(month) if value <= MAX_MONTH => Ok(Self(month)),
            _ => Err(ComponentError::InvalidMonth(value)),
        }
    }

    /// Looks up an English three-letter abbreviation, ignoring ASCII case.
    pub fn from_abbreviation(word: &str) -> Option<Self> {
        Self::lookup(&MONTH_ABBREVIATIONS, word)
    }

    /// Looks up a full English month name, ignoring ASCII case.
    pub fn from_name(word: &str) -> Option<Self> {
        Self::lookup(&MONTH_NAMES, word)
    }

    fn lookup(table: &[&str; 12], word: &str) -> Option<Self> {
        let index = table
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(word))?;
        // index < 12, so the month number is always in range
        u8::try_from(index + 1).ok().and_then(|m| Self::new(m).ok())
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Uppercase English abbreviation, e.g. `FEB`
    pub fn abbreviation(self) -> &'static str {
        MONTH_ABBREVIATIONS[usize::from(self.0.get()) - 1]
    }

    /// Uppercase English name, e.g. `FEBRUARY`
    pub fn name(self) -> &'static str {
        MONTH_NAMES[usize::from(self.0.get()) - 1]
    }
}

/// A day of month, valid for the year and month it was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{_0}")]
pub struct Day(NonZeroU8);

impl Day {
    /// # Errors
    /// Returns `ComponentError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, ComponentError> {
        match NonZeroU8::new(value) {
            Some(day) if value <= days_in_month(year.get(), month.get()) => Ok(Self(day)),
            _ => Err(ComponentError::InvalidDay {
                year: year.get(),
                month: month.get(),
                day: value,
            }),
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

/// Expands a two-digit year around [`TWO_DIGIT_YEAR_PIVOT`].
///
/// `00..=49` maps to `2000..=2049`, `50..=99` to `1950..=1999`. Values above
/// 99 are not two-digit years and are returned unchanged.
pub const fn expand_two_digit_year(short: u16) -> u16 {
    if short > 99 {
        short
    } else if short < TWO_DIGIT_YEAR_PIVOT {
        CURRENT_CENTURY + short
    } else {
        PREVIOUS_CENTURY + short
    }
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
