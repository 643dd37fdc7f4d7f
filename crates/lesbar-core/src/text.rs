//! Locale-aware tokenization for German prose.
//!
//! Provides the word splitter, the phrase (sentence) splitter, and the
//! letter filter that every metric downstream consumes. The word splitter
//! normalizes dashes, drops single-quoted foreign tokens, and strips
//! sentence punctuation before splitting; the phrase-internal splitter
//! deliberately applies only whitespace rules (see
//! [`split_phrase_words`]).

use regex::Regex;
use std::sync::LazyLock;

/// The tokenized view of one input text.
///
/// Built fresh per analysis call and discarded afterwards. Words keep
/// their raw token form; phrases are the trimmed sentence spans.
#[derive(Debug, Clone)]
pub struct TextUnit {
    /// Ordered word tokens from [`split_words`].
    pub words: Vec<String>,
    /// Ordered phrase tokens from [`split_phrases`].
    pub phrases: Vec<String>,
}

impl TextUnit {
    /// Tokenize raw text into its word and phrase sequences.
    pub fn tokenize(text: &str) -> Self {
        Self {
            words: split_words(text),
            phrases: split_phrases(text),
        }
    }
}

/// Regex for en-dash and em-dash, normalized to ASCII hyphen.
static DASH_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[–—]").expect("valid regex"));

/// Regex for single-quoted tokens ('Läsbarhetsindex'), dropped entirely.
static QUOTED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'[^']+'").expect("valid regex"));

/// Regex for sentence and clause punctuation, replaced by a space.
static PUNCT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.,;:!?()"»«“”‘’]"#).expect("valid regex"));

/// Regex for token separators: runs of whitespace or slashes.
static SEPARATOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s/]+").expect("valid regex"));

/// Regex for phrase terminators: runs of `.`, `!`, `?`.
static PHRASE_END_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Split text into word tokens.
///
/// Dashes are normalized, single-quoted substrings removed, punctuation
/// replaced by spaces, then the text is split on whitespace/slash runs.
/// Empty tokens, lone hyphens, and purely numeric tokens are dropped.
/// Tokens keep their raw (unfiltered) form; apply [`letters_only`] where a
/// metric needs the letter-only view.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_words(text: &str) -> Vec<String> {
    let text = DASH_PATTERN.replace_all(text, "-");
    let text = QUOTED_PATTERN.replace_all(&text, " ");
    let text = PUNCT_PATTERN.replace_all(&text, " ");

    SEPARATOR_PATTERN
        .split(&text)
        .map(str::trim)
        .filter(|w| !w.is_empty() && *w != "-")
        .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// Split text into phrases on runs of `.`, `!`, `?`.
///
/// Results are trimmed and empties dropped. Text without any terminal
/// punctuation yields exactly one phrase: the whole trimmed input.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_phrases(text: &str) -> Vec<String> {
    PHRASE_END_PATTERN
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split one phrase into words by whitespace/slash runs only.
///
/// Used for the per-phrase averages, which count words without the quote
/// removal, punctuation stripping, or digit filter of [`split_words`].
/// Dashes are still normalized and lone hyphens dropped.
pub fn split_phrase_words(phrase: &str) -> Vec<String> {
    let phrase = DASH_PATTERN.replace_all(phrase, "-");

    SEPARATOR_PATTERN
        .split(&phrase)
        .map(str::trim)
        .filter(|w| !w.is_empty() && *w != "-")
        .map(str::to_string)
        .collect()
}

/// Returns `true` for the letters German metrics operate on:
/// `A–Z a–z Ä Ö Ü ä ö ü ß`.
pub const fn is_german_letter(c: char) -> bool {
    matches!(c, 'A'..='Z' | 'a'..='z' | 'Ä' | 'Ö' | 'Ü' | 'ä' | 'ö' | 'ü' | 'ß')
}

/// Strip a token to its letter-only form.
///
/// Removes digits, punctuation, and symbols while preserving German
/// letters. May return an empty string.
pub fn letters_only(token: &str) -> String {
    token.chars().filter(|c| is_german_letter(*c)).collect()
}
