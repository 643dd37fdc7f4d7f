//! Readability formula calculators.
//!
//! LIX, gSMOG, Flesch-Kincaid, and the fourth Vienna formula (WSTF), each
//! with its published coefficients. Every formula guards against zero
//! word or phrase counts by returning 0, and rounds its result to two
//! decimal places.

use crate::syllables::count_syllables;

/// Raw token length above which a word counts as long for LIX.
const LIX_LONG_WORD_MIN: usize = 6;

/// Returns `true` when the raw (unfiltered) token is longer than six
/// characters.
///
/// LIX measures the raw token, punctuation contamination included; the
/// letter-filtered long-word predicate lives in
/// [`crate::metrics::is_long_word`]. The two are intentionally not
/// unified — doing so would change formula outputs.
pub fn is_lix_long_word(token: &str) -> bool {
    token.chars().count() > LIX_LONG_WORD_MIN
}

/// LIX (Läsbarhetsindex).
///
/// `(words / sentences) + (long words × 100 / words)`, long word = raw
/// token length > 6. The sentence count is clamped to at least 1.
pub fn lix(words: &[String], phrases: &[String]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }

    let word_count = words.len() as f64;
    let sentence_count = phrases.len().max(1) as f64;
    let long_words = words.iter().filter(|w| is_lix_long_word(w)).count() as f64;

    round2(word_count / sentence_count + long_words * 100.0 / word_count)
}

/// gSMOG — Bamberger's German adaptation of McLaughlin's SMOG.
///
/// `√((words with ≥3 syllables × 30) / sentences) − 2`, approximating the
/// school grade a reader needs.
pub fn gsmog(words: &[String], phrases: &[String]) -> f64 {
    if phrases.is_empty() {
        return 0.0;
    }

    let polysyllabic = polysyllabic_count(words) as f64;
    round2((polysyllabic * 30.0 / phrases.len() as f64).sqrt() - 2.0)
}

/// Flesch-Kincaid grade level.
///
/// `0.39 × (words/sentences) + 11.8 × (syllables/words) − 15.59`.
pub fn flesch_kincaid(words: &[String], phrases: &[String]) -> f64 {
    if words.is_empty() || phrases.is_empty() {
        return 0.0;
    }

    let total_syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let words_per_sentence = words.len() as f64 / phrases.len() as f64;
    let syllables_per_word = total_syllables as f64 / words.len() as f64;

    round2(0.39f64.mul_add(words_per_sentence, 11.8 * syllables_per_word) - 15.59)
}

/// WSTF — the fourth Wiener Sachtextformel.
///
/// `0.2656 × (words/sentences) + 0.2744 × (polysyllabic proportion × 100)
/// − 1.693`.
pub fn wstf(words: &[String], phrases: &[String]) -> f64 {
    if words.is_empty() || phrases.is_empty() {
        return 0.0;
    }

    let words_per_sentence = words.len() as f64 / phrases.len() as f64;
    let polysyllabic = polysyllabic_count(words) as f64 / words.len() as f64;

    round2(0.2656f64.mul_add(words_per_sentence, 0.2744 * polysyllabic * 100.0) - 1.693)
}

/// Words with at least three syllables.
fn polysyllabic_count(words: &[String]) -> usize {
    words.iter().filter(|w| count_syllables(w) >= 3).count()
}

/// Round half away from zero to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
