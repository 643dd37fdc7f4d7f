//! Syllable estimation via vowel-group counting.
//!
//! Counts maximal runs of German vowels (umlauts included, `y` treated as
//! a vowel) in the letter-filtered word; each run is one syllable. This is
//! a portable estimate — a hyphenation dictionary would produce different
//! absolute counts, but the vowel-group strategy needs no external data
//! and is deterministic across platforms.

use crate::text::letters_only;

/// Returns `true` for the vowel set used in syllable estimation.
const fn is_vowel(c: char) -> bool {
    matches!(
        c,
        'a' | 'e'
            | 'i'
            | 'o'
            | 'u'
            | 'ä'
            | 'ö'
            | 'ü'
            | 'y'
            | 'A'
            | 'E'
            | 'I'
            | 'O'
            | 'U'
            | 'Ä'
            | 'Ö'
            | 'Ü'
            | 'Y'
    )
}

/// Estimate the syllable count of one word token.
///
/// The token is letter-filtered first; a word with no letters has zero
/// syllables. Tokens carrying control characters cannot be estimated —
/// those fall back to a count of one and emit a warning rather than
/// aborting the surrounding analysis.
pub fn count_syllables(word: &str) -> usize {
    if word.is_empty() {
        return 0;
    }

    if word.chars().any(char::is_control) {
        tracing::warn!(
            token_len = word.len(),
            "token contains control characters, falling back to one syllable"
        );
        return 1;
    }

    let letters = letters_only(word);
    let mut syllables = 0usize;
    let mut previous_was_vowel = false;

    // Count vowel groups
    for c in letters.chars() {
        let vowel = is_vowel(c);
        if vowel && !previous_was_vowel {
            syllables += 1;
        }
        previous_was_vowel = vowel;
    }

    syllables
}
