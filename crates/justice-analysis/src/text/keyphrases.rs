//! Key phrase extraction by summed TF-IDF weight across sentences.

use ndarray::Array1;
use tracing::debug;

use super::sentences::tokenize_sentences;
use crate::stopwords;
use crate::vectorize::{TfidfVectorizer, Vectorizer};

const MAX_FEATURES: usize = 5000;

/// Return up to `n` phrases of one to three words that carry the most TF-IDF
/// weight over the document's sentences. Texts under five words or with fewer
/// than two sentences have no key phrases.
pub fn extract_key_phrases(text: &str, n: usize) -> Vec<String> {
    if n == 0 || text.split_whitespace().count() < 5 {
        return Vec::new();
    }

    let sentences = tokenize_sentences(text);
    if sentences.len() < 2 {
        return Vec::new();
    }
    let corpus: Vec<&str> = sentences.iter().map(String::as_str).collect();

    let mut vectorizer = TfidfVectorizer::with_stop_words(stopwords::extended().clone())
        .ngram_range(1, 3)
        .max_features(MAX_FEATURES);

    if let Err(e) = vectorizer.fit(&corpus) {
        debug!("Key phrase extraction skipped: {}", e);
        return Vec::new();
    }

    let names = vectorizer.feature_names();
    let mut totals = Array1::<f64>::zeros(names.len());
    for sentence in &corpus {
        match vectorizer.transform(sentence) {
            Ok(vector) => totals += &vector,
            Err(e) => {
                debug!("Key phrase extraction skipped: {}", e);
                return Vec::new();
            }
        }
    }

    let mut ranked: Vec<(usize, f64)> = totals.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    ranked
        .into_iter()
        .take(n)
        .map(|(i, _)| names[i].clone())
        .collect()
}
