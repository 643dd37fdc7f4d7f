//! Sub-metric calculators over the tokenized text.
//!
//! Each calculator is a pure function of the word or phrase tokens. All
//! of them return 0 when their denominator would be 0 — degenerate input
//! is never an error at this layer.
//!
//! Grapheme patterns are matched leftmost-first so the longer `sch` is
//! never additionally counted as `ch` within the same span.

use aho_corasick::{AhoCorasick, MatchKind};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::formulas;
use crate::syllables::count_syllables;
use crate::text::{TextUnit, letters_only, split_phrase_words};

/// Minimum letter count for the long-word proportion.
const LONG_WORD_MIN_LETTERS: usize = 7;

/// Minimum syllable count for a word to count as complex.
const COMPLEX_SYLLABLE_MIN: usize = 3;

/// Multi-membered grapheme patterns. Order matters: `sch` before `ch`.
static MULTI_GRAPHEMES: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostFirst)
        .build(["sch", "ch", "ck", "ng"])
        .expect("valid patterns")
});

/// Consonant cluster patterns (Str-, Spr-, -nkt, -cht).
static CONSONANT_CLUSTERS: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostFirst)
        .build(["str", "spr", "nkt", "cht"])
        .expect("valid patterns")
});

/// The full set of computed scalars for one text.
///
/// Counts, averages, proportions, and the four formula scores. One
/// `MetricSet` is produced per analysis call; no field references another
/// set.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MetricSet {
    /// Number of word tokens.
    pub count_words: usize,
    /// Number of phrase tokens.
    pub count_phrases: usize,
    /// Words with at least three syllables.
    pub syllable_complexity: usize,
    /// Total occurrences of `sch`, `ch`, `ck`, `ng` across all words.
    pub multi_membered_graphemes: usize,
    /// Total occurrences of `ä ö ü ß c q x y` across all words.
    pub rare_graphemes: usize,
    /// Total occurrences of `str`, `spr`, `nkt`, `cht` across all words.
    pub consonant_clusters: usize,
    /// Mean letter-filtered word length.
    pub average_word_length: f64,
    /// Mean syllables per word.
    pub average_syllables_per_word: f64,
    /// Mean words per phrase (whitespace split inside the phrase).
    pub average_phrase_length: f64,
    /// Mean total syllables per phrase.
    pub average_syllables_per_phrase: f64,
    /// Fraction of words with at least seven letters.
    pub proportion_of_long_words: f64,
    /// Complex-syllable word count over word count.
    pub proportion_of_complex_syllable_words: f64,
    /// Multi-membered grapheme total over word count.
    pub proportion_of_multi_membered_grapheme_words: f64,
    /// Rare grapheme total over word count.
    pub proportion_of_rare_grapheme_words: f64,
    /// Consonant cluster total over word count.
    pub proportion_of_consonant_cluster_words: f64,
    /// LIX readability index.
    pub lix: f64,
    /// German SMOG (Bamberger adaptation).
    pub gsmog: f64,
    /// Flesch-Kincaid grade level.
    pub flesch_kincaid: f64,
    /// Fourth Vienna formula (Wiener Sachtextformel).
    pub wstf: f64,
}

impl MetricSet {
    /// Compute every sub-metric and formula for one tokenized text.
    #[tracing::instrument(skip_all, fields(words = unit.words.len(), phrases = unit.phrases.len()))]
    pub fn compute(unit: &TextUnit) -> Self {
        let words = &unit.words;
        let phrases = &unit.phrases;
        let count_words = words.len();

        let syllable_complexity = syllable_complexity(words);
        let multi = multi_membered_graphemes(words);
        let rare = rare_graphemes(words);
        let clusters = consonant_clusters(words);

        Self {
            count_words,
            count_phrases: phrases.len(),
            syllable_complexity,
            multi_membered_graphemes: multi,
            rare_graphemes: rare,
            consonant_clusters: clusters,
            average_word_length: average_word_length(words),
            average_syllables_per_word: average_syllables_per_word(words),
            average_phrase_length: average_phrase_length(phrases),
            average_syllables_per_phrase: average_syllables_per_phrase(phrases),
            proportion_of_long_words: proportion_of_long_words(words),
            proportion_of_complex_syllable_words: per_word(syllable_complexity, count_words),
            proportion_of_multi_membered_grapheme_words: per_word(multi, count_words),
            proportion_of_rare_grapheme_words: per_word(rare, count_words),
            proportion_of_consonant_cluster_words: per_word(clusters, count_words),
            lix: formulas::lix(words, phrases),
            gsmog: formulas::gsmog(words, phrases),
            flesch_kincaid: formulas::flesch_kincaid(words, phrases),
            wstf: formulas::wstf(words, phrases),
        }
    }
}

/// A count normalized by the word count, 0 when there are no words.
fn per_word(count: usize, count_words: usize) -> f64 {
    if count_words == 0 {
        0.0
    } else {
        count as f64 / count_words as f64
    }
}

/// Returns `true` when the letter-filtered token has at least seven
/// letters.
///
/// This is deliberately distinct from the LIX predicate
/// ([`formulas::is_lix_long_word`]), which measures the raw token.
pub fn is_long_word(token: &str) -> bool {
    letters_only(token).chars().count() >= LONG_WORD_MIN_LETTERS
}

/// Count words with at least three syllables.
pub fn syllable_complexity(words: &[String]) -> usize {
    words
        .iter()
        .filter(|w| count_syllables(w) >= COMPLEX_SYLLABLE_MIN)
        .count()
}

/// Total occurrences of `sch`, `ch`, `ck`, `ng` across letter-filtered
/// words.
pub fn multi_membered_graphemes(words: &[String]) -> usize {
    pattern_total(&MULTI_GRAPHEMES, words)
}

/// Total occurrences of the rare graphemes `ä ö ü ß c q x y` across
/// letter-filtered words.
pub fn rare_graphemes(words: &[String]) -> usize {
    words
        .iter()
        .map(|w| {
            letters_only(w)
                .chars()
                .filter(|c| {
                    matches!(
                        c,
                        'ä' | 'ö'
                            | 'ü'
                            | 'Ä'
                            | 'Ö'
                            | 'Ü'
                            | 'ß'
                            | 'c'
                            | 'q'
                            | 'x'
                            | 'y'
                            | 'C'
                            | 'Q'
                            | 'X'
                            | 'Y'
                    )
                })
                .count()
        })
        .sum()
}

/// Total occurrences of `str`, `spr`, `nkt`, `cht` across letter-filtered
/// words.
pub fn consonant_clusters(words: &[String]) -> usize {
    pattern_total(&CONSONANT_CLUSTERS, words)
}

fn pattern_total(matcher: &AhoCorasick, words: &[String]) -> usize {
    words
        .iter()
        .map(|w| matcher.find_iter(&letters_only(w)).count())
        .sum()
}

/// Mean letter-filtered character length over the word count.
pub fn average_word_length(words: &[String]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let total: usize = words.iter().map(|w| letters_only(w).chars().count()).sum();
    total as f64 / words.len() as f64
}

/// Mean syllable count over the word count.
pub fn average_syllables_per_word(words: &[String]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let total: usize = words.iter().map(|w| count_syllables(w)).sum();
    total as f64 / words.len() as f64
}

/// Mean word count per phrase.
///
/// Words inside a phrase are split by whitespace only, not by the full
/// word-tokenizer rules.
pub fn average_phrase_length(phrases: &[String]) -> f64 {
    if phrases.is_empty() {
        return 0.0;
    }
    let total: usize = phrases.iter().map(|p| split_phrase_words(p).len()).sum();
    total as f64 / phrases.len() as f64
}

/// Mean total syllables per phrase.
pub fn average_syllables_per_phrase(phrases: &[String]) -> f64 {
    if phrases.is_empty() {
        return 0.0;
    }
    let total: usize = phrases
        .iter()
        .map(|p| {
            split_phrase_words(p)
                .iter()
                .map(|w| count_syllables(w))
                .sum::<usize>()
        })
        .sum();
    total as f64 / phrases.len() as f64
}

/// Fraction of words whose letter-filtered length is at least seven.
pub fn proportion_of_long_words(words: &[String]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let long = words.iter().filter(|w| is_long_word(w)).count();
    long as f64 / words.len() as f64
}
