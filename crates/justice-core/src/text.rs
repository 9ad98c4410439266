//! Text normalization shared by all analyses.
//!
//! Word characters are Unicode alphanumerics plus `_`. Everything else that is
//! not whitespace is treated as punctuation.

/// Characters kept by question normalization.
pub const QUESTION_KEEP: &[char] = &['?'];

/// Lowercase, strip punctuation, collapse whitespace and trim.
pub fn normalize(text: &str) -> String {
    normalize_keeping(text, &[])
}

/// Like [`normalize`], but characters in `keep` survive punctuation removal.
pub fn normalize_keeping(text: &str, keep: &[char]) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace() || keep.contains(c))
        .collect();
    collapse_whitespace(&stripped)
}

/// Collapse every run of whitespace (newlines included) into one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Word character: alphanumeric or underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
