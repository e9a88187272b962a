//! Lowercasing and tokenisation shared by scoring and role matching.

use unicode_segmentation::UnicodeSegmentation;

/// Unicode lowercasing.
///
/// This is not full case folding: `Straße` and `STRASSE` stay distinct.
pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Lowercased Unicode words of `text` (UAX #29 word boundaries)
pub fn words(text: &str) -> Vec<String> {
    text.unicode_words().map(lowercase).collect()
}

/// Words of a concept key; `alpha_user-context` yields `alpha`, `user`, `context`
pub fn key_words(key: &str) -> Vec<String> {
    key.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .flat_map(words)
        .collect()
}

/// Number of non-overlapping occurrences of `phrase` as consecutive tokens
pub fn count_phrase(tokens: &[String], phrase: &[String]) -> usize {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return 0;
    }

    let mut count = 0;
    let mut i = 0;
    while i + phrase.len() <= tokens.len() {
        if tokens[i..i + phrase.len()] == *phrase {
            count += 1;
            i += phrase.len();
        } else {
            i += 1;
        }
    }
    count
}
