//! The ordered table of date shapes a normalized string may take.
//!
//! Grammars are tried in rank order and the first one that explains the
//! whole string wins. Matching is purely structural: month 13 or day 31 in
//! April still match here and are rejected later when the date is built.

use crate::consts::{DATE_SEPARATOR, DOT_SEPARATOR, SLASH_SEPARATOR, WORD_SEPARATOR};
use crate::prelude::*;
use crate::types::{Month, expand_two_digit_year};
use crate::ParsedDate;

/// Which components a grammar actually reads from the input.
///
/// Components a grammar does not read default to 1, so `2018` parses as
/// `2018-01-01` with `Precision::Year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Precision {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
}

/// Where a run of digits ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Four-digit year, taken as is
    Year,
    /// Two-digit year, expanded around the pivot
    ShortYear,
    Month,
    Day,
}

/// How a month is spelled out in words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthWord {
    /// `FEB`
    Abbreviated,
    /// `FEBRUARY`
    Full,
}

/// One element of a grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Between `min` and `max` ASCII digits, taken greedily.
    Digits { slot: Slot, min: usize, max: usize },
    /// A run of ASCII letters naming an English month.
    Month(MonthWord),
    /// Exactly this character.
    Literal(char),
}

const fn digits(slot: Slot, min: usize, max: usize) -> Token {
    Token::Digits { slot, min, max }
}

const D: Token = digits(Slot::Day, 1, 2);
const DD: Token = digits(Slot::Day, 2, 2);
const M: Token = digits(Slot::Month, 1, 2);
const MM: Token = digits(Slot::Month, 2, 2);
const YY: Token = digits(Slot::ShortYear, 2, 2);
const YYYY: Token = digits(Slot::Year, 4, 4);
const MON: Token = Token::Month(MonthWord::Abbreviated);
const MONTH: Token = Token::Month(MonthWord::Full);
const SPACE: Token = Token::Literal(WORD_SEPARATOR);
const DASH: Token = Token::Literal(DATE_SEPARATOR);
const DOT: Token = Token::Literal(DOT_SEPARATOR);
const SLASH: Token = Token::Literal(SLASH_SEPARATOR);

/// Year, month and day pulled out of a structural match, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

#[derive(Debug, Default)]
struct Fields {
    year: Option<u16>,
    month: Option<u8>,
    day: Option<u8>,
}

impl Fields {
    fn assign(&mut self, slot: Slot, value: u16) -> Option<()> {
        match slot {
            Slot::Year => self.year = Some(value),
            Slot::ShortYear => self.year = Some(expand_two_digit_year(value)),
            Slot::Month => self.month = Some(u8::try_from(value).ok()?),
            Slot::Day => self.day = Some(u8::try_from(value).ok()?),
        }
        Some(())
    }

    fn finish(self) -> Option<Candidate> {
        Some(Candidate {
            year: self.year?,
            month: self.month.unwrap_or(1),
            day: self.day.unwrap_or(1),
        })
    }
}

impl Token {
    /// Consumes this token from the front of `text`, returning the rest.
    fn consume<'a>(&self, text: &'a str, fields: &mut Fields) -> Option<&'a str> {
        match *self {
            Self::Literal(c) => text.strip_prefix(c),
            Self::Digits { slot, min, max } => {
                let len = text
                    .bytes()
                    .take(max)
                    .take_while(u8::is_ascii_digit)
                    .count();
                if len < min {
                    return None;
                }
                let value = text[..len]
                    .bytes()
                    .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'));
                fields.assign(slot, value)?;
                Some(&text[len..])
            }
            Self::Month(word) => {
                let len = text.bytes().take_while(u8::is_ascii_alphabetic).count();
                let month = match word {
                    MonthWord::Abbreviated => Month::from_abbreviation(&text[..len]),
                    MonthWord::Full => Month::from_name(&text[..len]),
                }?;
                fields.month = Some(month.get());
                Some(&text[len..])
            }
        }
    }

    fn render(&self, date: &ParsedDate, out: &mut String) {
        let (value, width) = match *self {
            Self::Literal(c) => {
                out.push(c);
                return;
            }
            Self::Month(MonthWord::Abbreviated) => {
                out.push_str(date.month_typed().abbreviation());
                return;
            }
            Self::Month(MonthWord::Full) => {
                out.push_str(date.month_typed().name());
                return;
            }
            Self::Digits { slot, min, .. } => match slot {
                Slot::Year => (date.year(), min),
                Slot::ShortYear => (date.year() % 100, min),
                Slot::Month => (u16::from(date.month()), min),
                Slot::Day => (u16::from(date.day()), min),
            },
        };
        out.push_str(&format!("{value:0width$}"));
    }
}

/// A named, ranked date shape.
#[derive(Debug, PartialEq, Eq)]
pub struct FormatGrammar {
    name: &'static str,
    rank: u8,
    tokens: &'static [Token],
}

impl FormatGrammar {
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Position in the registry, starting at 1; lower ranks are tried first.
    pub const fn rank(&self) -> u8 {
        self.rank
    }

    pub const fn tokens(&self) -> &'static [Token] {
        self.tokens
    }

    pub fn precision(&self) -> Precision {
        let reads = |wanted: Slot| {
            self.tokens.iter().any(|token| match token {
                Token::Digits { slot, .. } => *slot == wanted,
                Token::Month(_) => wanted == Slot::Month,
                Token::Literal(_) => false,
            })
        };
        if reads(Slot::Day) {
            Precision::Day
        } else if reads(Slot::Month) {
            Precision::Month
        } else {
            Precision::Year
        }
    }

    /// Returns the raw components if this grammar explains all of `text`.
    pub fn matches(&self, text: &str) -> Option<Candidate> {
        let mut fields = Fields::default();
        let mut rest = text;
        for token in self.tokens {
            rest = token.consume(rest, &mut fields)?;
        }
        if rest.is_empty() {
            fields.finish()
        } else {
            None
        }
    }

    /// Writes `date` in this grammar's canonical shape.
    ///
    /// Two-digit-year grammars only round-trip dates inside the pivot window
    /// (1950-2049).
    pub fn render(&self, date: &ParsedDate) -> String {
        let mut out = String::new();
        for token in self.tokens {
            token.render(date, &mut out);
        }
        out
    }
}

impl std::fmt::Display for FormatGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

const fn grammar(name: &'static str, rank: u8, tokens: &'static [Token]) -> FormatGrammar {
    FormatGrammar { name, rank, tokens }
}

/// The built-in grammars, most specific first.
pub static GRAMMARS: [FormatGrammar; 13] = [
    grammar("D MON YY", 1, &[D, SPACE, MON, SPACE, YY]),
    grammar("D MONTH YY", 2, &[D, SPACE, MONTH, SPACE, YY]),
    grammar("D MON YYYY", 3, &[D, SPACE, MON, SPACE, YYYY]),
    grammar("D MONTH YYYY", 4, &[D, SPACE, MONTH, SPACE, YYYY]),
    grammar("MONTH D YYYY", 5, &[MONTH, SPACE, D, SPACE, YYYY]),
    grammar("YYYY-MM-DD", 6, &[YYYY, DASH, MM, DASH, DD]),
    grammar("D.M.YYYY", 7, &[D, DOT, M, DOT, YYYY]),
    grammar("D/M/YYYY", 8, &[D, SLASH, M, SLASH, YYYY]),
    grammar("D/M/YY", 9, &[D, SLASH, M, SLASH, YY]),
    grammar("YYMMDD", 10, &[YY, MM, DD]),
    grammar("YYYY-MM", 11, &[YYYY, DASH, MM]),
    grammar("YY-MM", 12, &[YY, DASH, MM]),
    grammar("YYYY", 13, &[YYYY]),
];

/// An ordered view over a grammar table.
#[derive(Debug, Clone, Copy)]
pub struct FormatRegistry {
    grammars: &'static [FormatGrammar],
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl FormatRegistry {
    /// The built-in [`GRAMMARS`].
    pub const fn standard() -> Self {
        Self {
            grammars: &GRAMMARS,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static FormatGrammar> {
        self.grammars.iter()
    }

    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }

    pub fn by_name(&self, name: &str) -> Option<&'static FormatGrammar> {
        self.grammars.iter().find(|grammar| grammar.name == name)
    }

    /// The first grammar, in rank order, that structurally matches `text`.
    pub fn find(&self, text: &str) -> Option<(&'static FormatGrammar, Candidate)> {
        self.grammars
            .iter()
            .find_map(|grammar| grammar.matches(text).map(|candidate| (grammar, candidate)))
    }
}
