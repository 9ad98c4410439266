//! Text vectorization.
//!
//! The `Vectorizer` trait abstracts over projecting text into a shared
//! feature space. `TfidfVectorizer` is the term-weighted implementation:
//! raw term counts, smoothed IDF (`ln((1 + n) / (1 + df)) + 1`), and L2 row
//! normalization. Features are sorted alphabetically.

use ndarray::Array1;
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;

use justice_core::text::is_word_char;

use crate::stopwords;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorizeError {
    #[error("empty corpus")]
    EmptyCorpus,

    #[error("empty vocabulary; perhaps the documents only contain stop words")]
    EmptyVocabulary,

    #[error("vectorizer has not been fitted")]
    NotFitted,
}

/// Capability for projecting texts into a comparable vector space.
pub trait Vectorizer {
    /// Learn the feature space from a corpus.
    fn fit(&mut self, corpus: &[&str]) -> Result<(), VectorizeError>;

    /// Project a text into the fitted space. Unknown terms are ignored.
    fn transform(&self, text: &str) -> Result<Array1<f64>, VectorizeError>;

    /// Fit, then transform every corpus document.
    fn fit_transform(&mut self, corpus: &[&str]) -> Result<Vec<Array1<f64>>, VectorizeError> {
        self.fit(corpus)?;
        corpus.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Feature names in index order.
    fn feature_names(&self) -> Vec<String>;
}

/// Cosine similarity of two vectors. Zero vectors have similarity 0.
/// Non-negative inputs always produce a value in `[0, 1]`.
pub fn cosine_similarity(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let norm_a = a.dot(a).sqrt();
    let norm_b = b.dot(b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (a.dot(b) / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// TF-IDF vectorizer over word n-grams.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    stop_words: HashSet<String>,
    ngram_range: (usize, usize),
    max_features: Option<usize>,
    vocabulary: BTreeMap<String, usize>,
    idf: Option<Array1<f64>>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    /// Unigrams with English stopwords removed.
    pub fn new() -> Self {
        Self::with_stop_words(stopwords::english().clone())
    }

    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        Self {
            stop_words,
            ngram_range: (1, 1),
            max_features: None,
            vocabulary: BTreeMap::new(),
            idf: None,
        }
    }

    /// Use n-grams with `min <= n <= max` tokens.
    pub fn ngram_range(mut self, min: usize, max: usize) -> Self {
        let min = min.max(1);
        self.ngram_range = (min, max.max(min));
        self
    }

    /// Keep only the `n` features most frequent across the corpus.
    pub fn max_features(mut self, n: usize) -> Self {
        self.max_features = Some(n);
        self
    }

    /// Lowercased tokens of two or more word characters, stopwords removed.
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !is_word_char(c))
            .filter(|t| t.chars().count() >= 2)
            .filter(|t| !self.stop_words.contains(*t))
            .map(str::to_string)
            .collect()
    }

    fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let (min_n, max_n) = self.ngram_range;
        let mut features = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                features.push(window.join(" "));
            }
        }
        features
    }

    fn counts(&self, text: &str) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for feature in self.analyze(text) {
            *counts.entry(feature).or_insert(0) += 1;
        }
        counts
    }
}

impl Vectorizer for TfidfVectorizer {
    fn fit(&mut self, corpus: &[&str]) -> Result<(), VectorizeError> {
        if corpus.is_empty() {
            return Err(VectorizeError::EmptyCorpus);
        }

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_frequency: HashMap<String, usize> = HashMap::new();
        for doc in corpus {
            for (feature, count) in self.counts(doc) {
                *document_frequency.entry(feature.clone()).or_insert(0) += 1;
                *total_frequency.entry(feature).or_insert(0) += count;
            }
        }

        if document_frequency.is_empty() {
            self.vocabulary.clear();
            self.idf = None;
            return Err(VectorizeError::EmptyVocabulary);
        }

        if let Some(limit) = self.max_features {
            if document_frequency.len() > limit {
                let mut ranked: Vec<(&String, usize)> =
                    total_frequency.iter().map(|(f, c)| (f, *c)).collect();
                ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
                let keep: HashSet<String> =
                    ranked.into_iter().take(limit).map(|(f, _)| f.clone()).collect();
                document_frequency.retain(|f, _| keep.contains(f));
            }
        }

        let n = corpus.len() as f64;
        self.vocabulary = document_frequency
            .keys()
            .enumerate()
            .map(|(i, f)| (f.clone(), i))
            .collect();
        self.idf = Some(
            document_frequency
                .values()
                .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
                .collect(),
        );
        Ok(())
    }

    fn transform(&self, text: &str) -> Result<Array1<f64>, VectorizeError> {
        let idf = self.idf.as_ref().ok_or(VectorizeError::NotFitted)?;
        let mut vector = Array1::<f64>::zeros(idf.len());
        for (feature, count) in self.counts(text) {
            if let Some(&index) = self.vocabulary.get(&feature) {
                vector[index] = count as f64 * idf[index];
            }
        }
        let norm = vector.dot(&vector).sqrt();
        if norm > 0.0 {
            vector.mapv_inplace(|v| v / norm);
        }
        Ok(vector)
    }

    fn feature_names(&self) -> Vec<String> {
        self.vocabulary.keys().cloned().collect()
    }
}
