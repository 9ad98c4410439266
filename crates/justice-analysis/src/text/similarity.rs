//! Pairwise document similarity.

use tracing::debug;

use justice_core::text::normalize;

use super::lemmatize::lemmatize as lemmatize_word;
use crate::stopwords;
use crate::vectorize::{cosine_similarity, TfidfVectorizer, Vectorizer};

/// Lowercase and strip punctuation, then optionally drop stopwords (English
/// plus legal boilerplate) and fold plurals onto their singular.
pub fn preprocess_text(text: &str, remove_stopwords: bool, lemmatize: bool) -> String {
    let normalized = normalize(text);
    if !remove_stopwords && !lemmatize {
        return normalized;
    }
    let stop_words = stopwords::extended();
    normalized
        .split(' ')
        .filter(|w| !w.is_empty() && !(remove_stopwords && stop_words.contains(*w)))
        .map(|w| if lemmatize { lemmatize_word(w) } else { w.to_string() })
        .collect::<Vec<_>>()
        .join(" ")
}

/// TF-IDF cosine similarity of two texts, fitted on the pair itself.
/// Empty input or a pair with no usable terms scores 0.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let a = preprocess_text(a, true, true);
    let b = preprocess_text(b, true, true);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut vectorizer = TfidfVectorizer::new();
    match vectorizer.fit_transform(&[a.as_str(), b.as_str()]) {
        Ok(vectors) => cosine_similarity(&vectors[0], &vectors[1]),
        Err(e) => {
            debug!("Similarity fell back to 0: {}", e);
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess() {
        assert_eq!(
            preprocess_text("The Tenant, and the Landlord!", true, false),
            "tenant landlord"
        );
        assert_eq!(
            preprocess_text("The Tenant, and the Landlord!", false, false),
            "the tenant and the landlord"
        );
    }

    #[test]
    fn test_preprocess_drops_legal_stopwords() {
        assert_eq!(
            preprocess_text("The tenant shall pay herein", true, false),
            "tenant pay"
        );
    }

    #[test]
    fn test_preprocess_lemmatizes() {
        assert_eq!(
            preprocess_text("Parties, taxes and clauses", false, true),
            "party tax and clause"
        );
        assert_eq!(
            preprocess_text("The tenants shall pay the taxes", true, true),
            "tenant pay tax"
        );
    }

    #[test]
    fn test_plural_and_singular_are_identical() {
        let s = text_similarity("Rights of tenants", "tenant right");
        assert!((s - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_bounds() {
        let same = text_similarity("The lease ends in May.", "the LEASE ends in may");
        assert!((same - 1.0).abs() < 1e-9);
        assert_eq!(text_similarity("rent deposit", "criminal appeal"), 0.0);
        assert_eq!(text_similarity("", "rent"), 0.0);
        assert_eq!(text_similarity("the of and", "it is"), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let s = text_similarity("security deposit refund", "deposit refund delayed");
        assert!(s > 0.0 && s < 1.0);
    }
}
