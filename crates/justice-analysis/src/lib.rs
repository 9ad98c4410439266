//! JusticeAI analyses: risk scoring, extractive summarization, FAQ question
//! matching and supplementary text metrics.
//!
//! Every analysis is a pure function of its input and the immutable
//! [`KnowledgeBase`]. [`JusticeAnalyzer`] bundles the configured components so
//! callers share one instance behind an `Arc`.

pub mod matcher;
pub mod report;
pub mod risk;
pub mod stopwords;
pub mod summarize;
pub mod text;
pub mod vectorize;

use std::sync::Arc;

use justice_core::{JusticeConfig, KnowledgeBase, Result};

pub use matcher::{MatchOutcome, MatchResult, QuestionMatcher};
pub use report::{analyze_document, DocumentReport};
pub use risk::{RiskMatch, RiskResult, RiskScorer, RiskSpan, RiskTier, Severity};
pub use summarize::{summarize, NO_TEXT_SUMMARY};
pub use vectorize::{cosine_similarity, TfidfVectorizer, VectorizeError, Vectorizer};

/// The configured analysis components.
pub struct JusticeAnalyzer {
    kb: Arc<KnowledgeBase>,
    scorer: RiskScorer,
    matcher: QuestionMatcher,
    summarization_ratio: f64,
}

impl JusticeAnalyzer {
    pub fn new(kb: Arc<KnowledgeBase>, config: &JusticeConfig) -> Result<Self> {
        let scorer = RiskScorer::new(kb.risk_terms())?;
        let matcher = QuestionMatcher::new(kb.clone(), config.similarity_threshold);
        Ok(Self {
            kb,
            scorer,
            matcher,
            summarization_ratio: config.summarization_ratio,
        })
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Summarize with `ratio`, or the configured ratio when absent.
    pub fn summarize(&self, text: &str, ratio: Option<f64>) -> String {
        summarize(text, ratio.unwrap_or(self.summarization_ratio))
    }

    pub fn analyze_risks(&self, text: &str) -> RiskResult {
        self.scorer.analyze_risks(text)
    }

    pub fn find_answer(&self, question: &str, category: Option<&str>) -> MatchOutcome {
        self.matcher.find_answer(question, category)
    }

    pub fn analyze_document(&self, text: &str, ratio: Option<f64>) -> DocumentReport {
        analyze_document(
            &self.scorer,
            text,
            ratio.unwrap_or(self.summarization_ratio),
        )
    }
}
