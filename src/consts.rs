/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Two-digit years below the pivot land in the 2000s, the rest in the 1900s.
///
/// `00..=49` becomes `2000..=2049` and `50..=99` becomes `1950..=1999`.
pub const TWO_DIGIT_YEAR_PIVOT: u16 = 50;

/// Century added to two-digit years below [`TWO_DIGIT_YEAR_PIVOT`]
pub(crate) const CURRENT_CENTURY: u16 = 2000;
/// Century added to two-digit years at or above [`TWO_DIGIT_YEAR_PIVOT`]
pub(crate) const PREVIOUS_CENTURY: u16 = 1900;

/// English month abbreviations, January first
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// English month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

/// ISO date component separator
pub const DATE_SEPARATOR: char = '-';
/// Separator of dotted day-first dates (`25.10.2019`)
pub const DOT_SEPARATOR: char = '.';
/// Separator of slashed day-first dates (`25/10/2019`)
pub const SLASH_SEPARATOR: char = '/';
/// Separator between words of month-name dates
pub const WORD_SEPARATOR: char = ' ';
