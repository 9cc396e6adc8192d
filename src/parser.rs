use serde::Deserialize;
use tracing::{debug, trace};

use crate::grammar::{FormatGrammar, FormatRegistry, Precision};
use crate::normalize::{Locale, NormalizedText, Normalizer};
use crate::{ParseFailure, ParsedDate};

/// Settings a host application can load from its own configuration.
///
/// ```json
/// { "locales": ["french", "spanish"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Locales whose month abbreviations are translated to English.
    pub locales: Vec<Locale>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            locales: Locale::ALL.to_vec(),
        }
    }
}

/// A successful parse together with how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub date: ParsedDate,
    pub grammar: &'static FormatGrammar,
    pub normalized: NormalizedText,
}

impl DateMatch {
    /// Which components the input actually spelled out.
    pub fn precision(&self) -> Precision {
        self.grammar.precision()
    }
}

/// Normalizes text and runs it against the grammar registry.
///
/// Holds no mutable state; share one instance across threads freely.
#[derive(Debug, Clone, Default)]
pub struct DateParser {
    normalizer: Normalizer,
    registry: FormatRegistry,
}

impl DateParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ParserConfig) -> Self {
        Self {
            normalizer: Normalizer::new(&config.locales),
            registry: FormatRegistry::standard(),
        }
    }

    pub const fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub const fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// # Errors
    /// See [`DateParser::parse_match`].
    pub fn parse(&self, raw: &str) -> Result<ParsedDate, ParseFailure> {
        self.parse_match(raw).map(|found| found.date)
    }

    /// Parses `raw`, reporting which grammar matched.
    ///
    /// The first grammar that structurally matches decides the outcome;
    /// later grammars are not consulted even if its numbers are out of range.
    ///
    /// # Errors
    /// `ParseFailure::NoGrammarMatched` when no grammar fits the normalized
    /// text, `ParseFailure::InvalidNumericRange` when the first fitting
    /// grammar yields a date that is not on the calendar.
    pub fn parse_match(&self, raw: &str) -> Result<DateMatch, ParseFailure> {
        let normalized = self.normalizer.normalize(raw);
        trace!(raw, normalized = %normalized, "normalized date text");

        let Some((grammar, candidate)) = self.registry.find(&normalized) else {
            debug!(normalized = %normalized, "no date grammar matched");
            return Err(ParseFailure::NoGrammarMatched {
                text: normalized.into(),
            });
        };

        match ParsedDate::new(candidate.year, candidate.month, candidate.day) {
            Ok(date) => {
                debug!(grammar = grammar.name(), %date, "parsed date");
                Ok(DateMatch {
                    date,
                    grammar,
                    normalized,
                })
            }
            Err(err) => {
                debug!(grammar = grammar.name(), normalized = %normalized, error = %err, "date out of range");
                Err(ParseFailure::InvalidNumericRange {
                    text: normalized.into(),
                    grammar: grammar.name(),
                    field: err.field(),
                    value: err.value(),
                })
            }
        }
    }
}
