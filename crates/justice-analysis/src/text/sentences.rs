//! Sentence segmentation.

use once_cell::sync::Lazy;
use regex::Regex;

static ABBREVIATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(Mr|Mrs|Ms|Dr|Prof|vs|etc|i\.e|e\.g)\.(\s)").expect("valid abbreviation regex")
});

const DOT_PLACEHOLDER: &str = "<dot>";

/// Split text into sentences at `.`, `!` or `?` followed by whitespace.
/// Terminal punctuation stays with its sentence; empty pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(_, next)) = chars.peek() {
                if next.is_whitespace() {
                    let end = i + c.len_utf8();
                    let s = text[start..end].trim();
                    if !s.is_empty() {
                        sentences.push(s);
                    }
                    start = end;
                }
            }
        }
    }
    let s = text[start..].trim();
    if !s.is_empty() {
        sentences.push(s);
    }
    sentences
}

/// Like [`split_sentences`], but common abbreviations (`Mr.`, `Dr.`, `vs.`,
/// `i.e.`, ...) do not end a sentence.
pub fn tokenize_sentences(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let protected = ABBREVIATION_RE.replace_all(text, format!("${{1}}{}${{2}}", DOT_PLACEHOLDER));
    split_sentences(&protected)
        .into_iter()
        .map(|s| s.replace(DOT_PLACEHOLDER, "."))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("First one. Second one! Third? Trailing");
        assert_eq!(sentences, vec!["First one.", "Second one!", "Third?", "Trailing"]);
    }

    #[test]
    fn test_split_requires_whitespace_after_punctuation() {
        let sentences = split_sentences("Clause 4.2 applies. See section 12.");
        assert_eq!(sentences, vec!["Clause 4.2 applies.", "See section 12."]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_tokenize_protects_abbreviations() {
        let sentences =
            tokenize_sentences("Mr. Sharma signed the lease. Dr. Rao witnessed it, i.e. attested it.");
        assert_eq!(
            sentences,
            vec![
                "Mr. Sharma signed the lease.",
                "Dr. Rao witnessed it, i.e. attested it."
            ]
        );
    }
}
