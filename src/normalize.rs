//! Rewrites raw date text into the canonical token form the grammars match.
//!
//! Normalization never fails. Text that cannot be made sensible still comes
//! out as *some* uppercase, single-spaced string that simply matches no
//! grammar later on.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Characters peeled off both ends of the input before anything else.
const EDGE_NOISE: &[char] = &['\'', '"', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '.', ','];

/// Separators that survive canonicalization.
const KEPT_SEPARATORS: &[char] = &['.', '/', '-'];

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("normalization patterns are literals")
}

/// A trailing `19`/`20` token split from its last two digits, e.g. `... 20 19`.
static SPLIT_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"(\b19\b|\b20\b) (\d{2})$"));

/// ` ABR/APR ` style local/English month pairs.
static DUAL_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r" ([A-ZÀ-ÖØ-ÞĞİŞ]{3})/([A-ZÀ-ÖØ-ÞĞİŞ]{3}) "));

static ORDINAL_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"\b(\d+)(?:ST|ND|RD|TH)\b"));

/// Every alias of every locale; the normalizer filters by its enabled locales.
static ALIAS_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = MONTH_ALIASES
        .iter()
        .map(|alias| regex::escape(alias.alias))
        .collect::<Vec<_>>()
        .join("|");
    compile(&format!(r"\b(?:{alternation})\b"))
});

/// Locales whose month abbreviations can be rewritten to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[display(fmt = "french")]
    French,
    #[display(fmt = "german")]
    German,
    #[display(fmt = "spanish")]
    Spanish,
}

impl Locale {
    pub const ALL: [Self; 3] = [Self::French, Self::German, Self::Spanish];
}

/// One entry of the month alias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthAlias {
    pub alias: &'static str,
    pub canonical: &'static str,
    pub locale: Locale,
}

const fn alias(alias: &'static str, canonical: &'static str, locale: Locale) -> MonthAlias {
    MonthAlias {
        alias,
        canonical,
        locale,
    }
}

/// Uppercase local abbreviations mapped to their English equivalent.
///
/// French `JUI` is ambiguous between June and July in the wild; exports seen
/// so far use it for June.
pub static MONTH_ALIASES: &[MonthAlias] = &[
    alias("FÉV", "FEB", Locale::French),
    alias("AVR", "APR", Locale::French),
    alias("MAI", "MAY", Locale::French),
    alias("JUI", "JUN", Locale::French),
    alias("AOÛ", "AUG", Locale::French),
    alias("DÉC", "DEC", Locale::French),
    alias("MÄR", "MAR", Locale::German),
    alias("MRZ", "MAR", Locale::German),
    alias("MAI", "MAY", Locale::German),
    alias("OKT", "OCT", Locale::German),
    alias("DEZ", "DEC", Locale::German),
    alias("ENE", "JAN", Locale::Spanish),
    alias("ABR", "APR", Locale::Spanish),
    alias("AGO", "AUG", Locale::Spanish),
    alias("DIC", "DEC", Locale::Spanish),
];

/// Looks up the English abbreviation for `word` among the given locales.
pub fn canonical_month(word: &str, locales: &[Locale]) -> Option<&'static str> {
    MONTH_ALIASES
        .iter()
        .find(|entry| entry.alias == word && locales.contains(&entry.locale))
        .map(|entry| entry.canonical)
}

/// Output of [`Normalizer::normalize`]: uppercase, single-spaced, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, Into)]
#[display(fmt = "{_0}")]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The normalization rules, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Strip quotes, smart quotes, periods, commas and whitespace from both ends.
    TrimNoise,
    /// Rejoin `20 19` at the very end into `2019`.
    JoinSplitYear,
    /// ` ABR/APR ` keeps only the trailing English token.
    CollapseDualMonth,
    /// Uppercase, blank out noise characters, squeeze whitespace.
    Canonicalize,
    /// `1ST` becomes `1`.
    StripOrdinals,
    /// Local month abbreviations become English ones.
    SubstituteAliases,
    /// `JAN/JAN` becomes `JAN`.
    CollapseRepeatedMonth,
}

pub const STEPS: [Step; 7] = [
    Step::TrimNoise,
    Step::JoinSplitYear,
    Step::CollapseDualMonth,
    Step::Canonicalize,
    Step::StripOrdinals,
    Step::SubstituteAliases,
    Step::CollapseRepeatedMonth,
];

/// Runs the [`STEPS`] pipeline with a fixed set of locale hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    locales: Vec<Locale>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&Locale::ALL)
    }
}

impl Normalizer {
    pub fn new(locales: &[Locale]) -> Self {
        let mut enabled = Vec::with_capacity(locales.len());
        for locale in locales {
            if !enabled.contains(locale) {
                enabled.push(*locale);
            }
        }
        Self { locales: enabled }
    }

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// Normalizes `raw`, repeating the pipeline until the text is stable.
    ///
    /// Some rules only fire once an earlier pass has cleaned up the
    /// separators around them (`20,19` needs a pass of [`Step::Canonicalize`]
    /// before [`Step::JoinSplitYear`] can see `20 19`). After the first pass
    /// every rewrite shortens the text, so the loop always settles.
    pub fn normalize(&self, raw: &str) -> NormalizedText {
        let mut current = self.pass(raw);
        loop {
            let next = self.pass(&current);
            if next == current {
                return NormalizedText(current);
            }
            current = next;
        }
    }

    fn pass(&self, raw: &str) -> String {
        STEPS
            .iter()
            .fold(raw.to_owned(), |text, step| self.apply(*step, &text).into_owned())
    }

    /// Applies a single rule to `text`.
    pub fn apply<'a>(&self, step: Step, text: &'a str) -> Cow<'a, str> {
        match step {
            Step::TrimNoise => Cow::Borrowed(trim_noise(text)),
            Step::JoinSplitYear => SPLIT_YEAR_RE.replace(text, "${1}${2}"),
            Step::CollapseDualMonth => DUAL_MONTH_RE.replace_all(text, " ${2} "),
            Step::Canonicalize => Cow::Owned(canonicalize(text)),
            Step::StripOrdinals => ORDINAL_RE.replace_all(text, "${1}"),
            Step::SubstituteAliases => ALIAS_RE.replace_all(text, |caps: &Captures<'_>| {
                let word = &caps[0];
                canonical_month(word, &self.locales)
                    .unwrap_or(word)
                    .to_owned()
            }),
            Step::CollapseRepeatedMonth => collapse_repeated_words(text),
        }
    }
}

/// Normalizes with every locale enabled.
pub fn normalize(raw: &str) -> NormalizedText {
    static DEFAULT: LazyLock<Normalizer> = LazyLock::new(Normalizer::default);
    DEFAULT.normalize(raw)
}

fn trim_noise(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || EDGE_NOISE.contains(&c))
}

/// A whole word of three or more letters, as seen next to a slash.
fn is_month_like(word: &str) -> bool {
    word.chars().count() >= 3 && word.chars().all(char::is_alphabetic)
}

/// Drops the second of two identical words joined by a slash.
///
/// Each slash is checked against the word right before it, so in
/// `APR/MAY/MAY` the `MAY/MAY` pair still collapses after `APR/MAY` is kept.
fn collapse_repeated_words(text: &str) -> Cow<'_, str> {
    let mut segments = text.split('/');
    let Some(first) = segments.next() else {
        return Cow::Borrowed(text);
    };
    let mut out = first.to_owned();
    let mut changed = false;
    for segment in segments {
        let tail_start = out
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_alphanumeric())
            .last()
            .map_or(out.len(), |(i, _)| i);
        let head_end = segment
            .find(|c: char| !c.is_alphanumeric())
            .unwrap_or(segment.len());
        let (tail, head) = (&out[tail_start..], &segment[..head_end]);

        if is_month_like(tail) && tail == head {
            out.push_str(&segment[head_end..]);
            changed = true;
        } else {
            out.push('/');
            out.push_str(segment);
        }
    }
    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(text)
    }
}

fn canonicalize(text: &str) -> String {
    let blanked: String = text
        .to_uppercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || KEPT_SEPARATORS.contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect();
    let squeezed = blanked.split_whitespace().collect::<Vec<_>>().join(" ");
    trim_noise(&squeezed).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(raw: &str) -> String {
        normalize(raw).into()
    }

    #[test]
    fn test_trim_noise() {
        let n = Normalizer::default();
        assert_eq!(n.apply(Step::TrimNoise, " '14 FEB 24'. "), "14 FEB 24");
        assert_eq!(n.apply(Step::TrimNoise, "\u{201C}25.10.2019\u{201D}"), "25.10.2019");
        assert_eq!(n.apply(Step::TrimNoise, ",,"), "");
    }

    #[test]
    fn test_join_split_year() {
        let n = Normalizer::default();
        assert_eq!(
            n.apply(Step::JoinSplitYear, "16 OF DECEMBER 20 19"),
            "16 OF DECEMBER 2019"
        );
        assert_eq!(n.apply(Step::JoinSplitYear, "3 MAR 19 85"), "3 MAR 1985");
        // Only at the very end, and only for a standalone 19/20 token
        assert_eq!(n.apply(Step::JoinSplitYear, "20 19 MAR"), "20 19 MAR");
        assert_eq!(n.apply(Step::JoinSplitYear, "3 MAR 120 19"), "3 MAR 120 19");
        assert_eq!(n.apply(Step::JoinSplitYear, "3 MAR 21 19"), "3 MAR 21 19");
        assert_eq!(n.apply(Step::JoinSplitYear, "3 MAR 20 195"), "3 MAR 20 195");
    }

    #[test]
    fn test_collapse_dual_month() {
        let n = Normalizer::default();
        assert_eq!(
            n.apply(Step::CollapseDualMonth, "18 ABR/APR 2027"),
            "18 APR 2027"
        );
        assert_eq!(
            n.apply(Step::CollapseDualMonth, "5 ŞUB/FEB 2020"),
            "5 FEB 2020"
        );
        assert_eq!(
            n.apply(Step::CollapseDualMonth, "14 FÉV/FEB 2024"),
            "14 FEB 2024"
        );
        // Needs a space on both sides
        assert_eq!(
            n.apply(Step::CollapseDualMonth, "ABR/APR 2027"),
            "ABR/APR 2027"
        );
        assert_eq!(
            n.apply(Step::CollapseDualMonth, "18 ABRIL/APR 2027"),
            "18 ABRIL/APR 2027"
        );
    }

    #[test]
    fn test_canonicalize() {
        let n = Normalizer::default();
        assert_eq!(
            n.apply(Step::Canonicalize, "14,  feb;\t24"),
            "14 FEB 24"
        );
        assert_eq!(n.apply(Step::Canonicalize, "2019_10_25"), "2019 10 25");
        assert_eq!(n.apply(Step::Canonicalize, "25.10.2019!"), "25.10.2019");
        assert_eq!(n.apply(Step::Canonicalize, "fév"), "FÉV");
    }

    #[test]
    fn test_strip_ordinals() {
        let n = Normalizer::default();
        assert_eq!(n.apply(Step::StripOrdinals, "1ST JAN 2000"), "1 JAN 2000");
        assert_eq!(n.apply(Step::StripOrdinals, "22ND 23RD 4TH"), "22 23 4");
        assert_eq!(n.apply(Step::StripOrdinals, "AUGUST 1STX"), "AUGUST 1STX");
        assert_eq!(n.apply(Step::StripOrdinals, "FIRST"), "FIRST");
    }

    #[test]
    fn test_substitute_aliases() {
        let n = Normalizer::default();
        assert_eq!(n.apply(Step::SubstituteAliases, "14 FÉV 24"), "14 FEB 24");
        assert_eq!(n.apply(Step::SubstituteAliases, "1 AOÛ 2020"), "1 AUG 2020");
        assert_eq!(n.apply(Step::SubstituteAliases, "3 MRZ 2021"), "3 MAR 2021");
        // Whole words only
        assert_eq!(n.apply(Step::SubstituteAliases, "MAIN 2020"), "MAIN 2020");
    }

    #[test]
    fn test_aliases_respect_locales() {
        let french = Normalizer::new(&[Locale::French]);
        assert_eq!(french.apply(Step::SubstituteAliases, "4 AVR 2021"), "4 APR 2021");
        assert_eq!(french.apply(Step::SubstituteAliases, "4 ABR 2021"), "4 ABR 2021");

        let none = Normalizer::new(&[]);
        assert_eq!(none.apply(Step::SubstituteAliases, "14 FÉV 24"), "14 FÉV 24");
        assert_eq!(none.normalize("14 fév 24").as_str(), "14 FÉV 24");
    }

    #[test]
    fn test_collapse_repeated_month() {
        let n = Normalizer::default();
        assert_eq!(
            n.apply(Step::CollapseRepeatedMonth, "18 APR/APR 2027"),
            "18 APR 2027"
        );
        assert_eq!(
            n.apply(Step::CollapseRepeatedMonth, "JAN/JAN 2020"),
            "JAN 2020"
        );
        assert_eq!(
            n.apply(Step::CollapseRepeatedMonth, "18 APR/MAY 2027"),
            "18 APR/MAY 2027"
        );
        // Numbers are never collapsed
        assert_eq!(
            n.apply(Step::CollapseRepeatedMonth, "12/12/2020"),
            "12/12/2020"
        );
        // A differing pair does not hide a repeated pair after it
        assert_eq!(
            n.apply(Step::CollapseRepeatedMonth, "APR/MAY/MAY"),
            "APR/MAY"
        );
        assert_eq!(
            n.apply(Step::CollapseRepeatedMonth, "1 XYZ/APR/APR 2020"),
            "1 XYZ/APR 2020"
        );
        assert_eq!(
            n.apply(Step::CollapseRepeatedMonth, "APR/APR/APR 2027"),
            "APR 2027"
        );
        // Only the whole word next to the slash counts
        assert_eq!(
            n.apply(Step::CollapseRepeatedMonth, "XAPR/APR"),
            "XAPR/APR"
        );
        assert_eq!(
            n.apply(Step::CollapseRepeatedMonth, "APR/APRIL"),
            "APR/APRIL"
        );
    }

    #[test]
    fn test_repeated_pair_after_local_token_parses() {
        assert_eq!(norm("1 XYZ/APR/APR 2020"), "1 APR 2020");
        assert_eq!(norm("apr/may/may"), "APR/MAY");
        assert_eq!(
            crate::parse("1 XYZ/APR/APR 2020").unwrap().to_string(),
            "2020-04-01"
        );
    }

    #[test]
    fn test_normalize_full_pipeline() {
        struct TestCase {
            raw: &'static str,
            expected: &'static str,
        }

        let cases = [
            TestCase { raw: "14 FEB 24", expected: "14 FEB 24" },
            TestCase { raw: "  '14 fév 24'  ", expected: "14 FEB 24" },
            TestCase { raw: "1st Jan 2000", expected: "1 JAN 2000" },
            TestCase { raw: "18 ABR/APR 2027", expected: "18 APR 2027" },
            TestCase { raw: "18 abr/apr 2027", expected: "18 APR 2027" },
            TestCase { raw: "16 of December 20 19", expected: "16 OF DECEMBER 2019" },
            TestCase { raw: "July 6, 1997.", expected: "JULY 6 1997" },
            TestCase { raw: "\"25.10.2019\"", expected: "25.10.2019" },
            TestCase { raw: "", expected: "" },
            TestCase { raw: "  \n ", expected: "" },
        ];

        for case in &cases {
            assert_eq!(norm(case.raw), case.expected, "normalizing {:?}", case.raw);
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "14 FEB 24",
            "20,19",
            "5.!",
            "!.5",
            "18 abr/apr, 2027",
            "APR/APR/APR 2027",
            "  “3rd” of août 1999 ",
            "straße 12",
            "___",
            "2024-02-14",
        ];
        for raw in inputs {
            let once = normalize(raw);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "normalize is not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_normalized_text_shape() {
        let text = normalize(" 14 \t\t feb ;; 24 ");
        assert_eq!(text.as_str(), "14 FEB 24");
        assert!(!text.contains("  "));
        assert_eq!(text.len(), 9);
        assert_eq!(text.to_string(), "14 FEB 24");
    }

    #[test]
    fn test_canonical_month_lookup() {
        assert_eq!(canonical_month("DÉC", &Locale::ALL), Some("DEC"));
        assert_eq!(canonical_month("DÉC", &[Locale::German]), None);
        assert_eq!(canonical_month("MAI", &[Locale::German]), Some("MAY"));
        assert_eq!(canonical_month("JAN", &Locale::ALL), None);
    }

    #[test]
    fn test_locale_dedup_and_serde() {
        let n = Normalizer::new(&[Locale::French, Locale::French, Locale::Spanish]);
        assert_eq!(n.locales(), &[Locale::French, Locale::Spanish]);

        let parsed: Locale = serde_json::from_str("\"german\"").unwrap();
        assert_eq!(parsed, Locale::German);
        assert_eq!(Locale::Spanish.to_string(), "spanish");
    }
}
