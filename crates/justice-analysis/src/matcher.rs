//! FAQ question matching.
//!
//! The candidate corpus (optionally restricted to one category) and the user
//! question are normalized identically, projected through a freshly fitted
//! [`Vectorizer`] and ranked by cosine similarity.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use justice_core::text::{normalize_keeping, QUESTION_KEEP};
use justice_core::{FaqEntry, KnowledgeBase};

use crate::vectorize::{cosine_similarity, TfidfVectorizer, Vectorizer};

/// Minimum similarity for a non-best entry to be listed as related.
pub const RELATED_MIN_SIMILARITY: f64 = 0.5;
/// Suggestions offered when nothing matched must score strictly above this.
pub const SUGGESTION_MIN_SIMILARITY: f64 = 0.3;
pub const MAX_RELATED_QUESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub query: String,
    pub matched_question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    /// Best similarity in `[0, 1]`. Absent when there was nothing to compare against.
    pub similarity_score: Option<f64>,
    pub found: bool,
    /// Related questions when found, suggestions otherwise. Best first.
    pub related_questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MatchResult {
    fn not_found(query: &str) -> Self {
        Self {
            query: query.to_string(),
            matched_question: None,
            answer: None,
            category: None,
            similarity_score: None,
            found: false,
            related_questions: Vec::new(),
            error: None,
        }
    }
}

/// Outcome of a match attempt. Vectorization failures are a value, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Success(MatchResult),
    Degenerate { query: String, reason: String },
}

impl MatchOutcome {
    /// Flatten into a `MatchResult`; a degenerate outcome becomes an
    /// unfound result carrying the reason in `error`.
    pub fn into_result(self) -> MatchResult {
        match self {
            MatchOutcome::Success(result) => result,
            MatchOutcome::Degenerate { query, reason } => MatchResult {
                error: Some(reason),
                ..MatchResult::not_found(&query)
            },
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, MatchOutcome::Degenerate { .. })
    }
}

/// Matches questions against the FAQ corpus.
///
/// `prototype` is cloned and fitted per query because the corpus depends on
/// the requested category.
pub struct QuestionMatcher<V = TfidfVectorizer> {
    kb: Arc<KnowledgeBase>,
    threshold: f64,
    prototype: V,
}

impl QuestionMatcher<TfidfVectorizer> {
    pub fn new(kb: Arc<KnowledgeBase>, threshold: f64) -> Self {
        Self::with_vectorizer(kb, threshold, TfidfVectorizer::new())
    }
}

impl<V: Vectorizer + Clone> QuestionMatcher<V> {
    pub fn with_vectorizer(kb: Arc<KnowledgeBase>, threshold: f64, prototype: V) -> Self {
        Self {
            kb,
            threshold,
            prototype,
        }
    }

    /// Find the best FAQ answer for `question`, optionally within one category.
    pub fn find_answer(&self, question: &str, category: Option<&str>) -> MatchOutcome {
        let corpus = self.kb.faq_entries(category);
        if corpus.is_empty() {
            debug!("No FAQ entries for category {:?}", category);
            return MatchOutcome::Success(MatchResult::not_found(question));
        }

        let query = normalize_keeping(question, QUESTION_KEEP);
        let documents: Vec<String> = corpus
            .iter()
            .map(|e| normalize_keeping(&e.question, QUESTION_KEEP))
            .collect();
        let documents: Vec<&str> = documents.iter().map(String::as_str).collect();

        let mut vectorizer = self.prototype.clone();
        let scores = vectorizer
            .fit_transform(&documents)
            .and_then(|vectors| {
                let query_vector = vectorizer.transform(&query)?;
                Ok(vectors
                    .iter()
                    .map(|v| cosine_similarity(&query_vector, v))
                    .collect::<Vec<f64>>())
            });
        let scores = match scores {
            Ok(scores) => scores,
            Err(e) => {
                warn!("Question matching degenerated: {}", e);
                return MatchOutcome::Degenerate {
                    query: question.to_string(),
                    reason: format!("Error processing question: {}", e),
                };
            }
        };

        let ranked = rank(&scores);
        let (best, best_score) = ranked[0];
        debug!(
            "Best FAQ similarity {:.3} for {:?} (threshold {})",
            best_score, query, self.threshold
        );

        if best_score >= self.threshold {
            let entry: &FaqEntry = corpus[best];
            let related = collect_questions(&corpus, &ranked, |i, s| {
                i != best && s >= RELATED_MIN_SIMILARITY
            });
            MatchOutcome::Success(MatchResult {
                query: question.to_string(),
                matched_question: Some(entry.question.clone()),
                answer: Some(entry.answer.clone()),
                category: Some(entry.category.clone()),
                similarity_score: Some(best_score),
                found: true,
                related_questions: related,
                error: None,
            })
        } else {
            let suggestions =
                collect_questions(&corpus, &ranked, |_, s| s > SUGGESTION_MIN_SIMILARITY);
            MatchOutcome::Success(MatchResult {
                similarity_score: Some(best_score),
                related_questions: suggestions,
                ..MatchResult::not_found(question)
            })
        }
    }
}

/// Indices with scores, best first; equal scores keep corpus order.
fn rank(scores: &[f64]) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    ranked
}

fn collect_questions<F>(corpus: &[&FaqEntry], ranked: &[(usize, f64)], keep: F) -> Vec<String>
where
    F: Fn(usize, f64) -> bool,
{
    ranked
        .iter()
        .filter(|(i, s)| keep(*i, *s))
        .take(MAX_RELATED_QUESTIONS)
        .map(|(i, _)| corpus[*i].question.clone())
        .collect()
}
