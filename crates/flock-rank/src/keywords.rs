//! Tokenization for interest/goal matching.
//!
//! Interests and goals are free text ("Prayer & Fasting", "read more
//! scripture"), so matching works on lower-cased tokens. Two views exist:
//! whitespace words for word-overlap checks, and delimiter-split keywords
//! with a length floor for content scanning. No stemming — "prayer" and
//! "prayers" are different tokens.

/// Characters that separate tokens inside a phrase.
const DELIMITERS: &[char] = &[' ', ',', '&', '-', '/', '(', ')'];

/// Lower-cased whitespace-delimited words of a phrase.
#[must_use]
pub fn words(phrase: &str) -> Vec<String> {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Lower-cased keywords of a phrase: split on the delimiter set, keep
/// tokens strictly longer than `min_len` characters. Short tokens ("a",
/// "of", "the") produce too many noise matches against post content.
#[must_use]
pub fn keywords(phrase: &str, min_len: usize) -> Vec<String> {
    phrase
        .split(DELIMITERS)
        .filter(|token| token.chars().count() > min_len)
        .map(str::to_lowercase)
        .collect()
}

/// True when the two phrases share at least one whitespace-delimited word,
/// case-insensitively.
#[must_use]
pub fn share_word(a: &str, b: &str) -> bool {
    let b_words = words(b);
    words(a).iter().any(|word| b_words.contains(word))
}
