//! Combined document analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::risk::{RiskResult, RiskScorer};
use crate::summarize::summarize;
use crate::text::{document_complexity, extract_key_phrases, ComplexityMetrics};

/// Number of key phrases included in a report.
pub const REPORT_KEY_PHRASES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub summary: String,
    pub risks: RiskResult,
    pub complexity: ComplexityMetrics,
    pub key_phrases: Vec<String>,
    pub word_count: usize,
    pub char_count: usize,
    pub analyzed_at: DateTime<Utc>,
}

/// Run every document analysis over `text`.
pub fn analyze_document(scorer: &RiskScorer, text: &str, ratio: f64) -> DocumentReport {
    DocumentReport {
        summary: summarize(text, ratio),
        risks: scorer.analyze_risks(text),
        complexity: document_complexity(text),
        key_phrases: extract_key_phrases(text, REPORT_KEY_PHRASES),
        word_count: text.split_whitespace().count(),
        char_count: text.chars().count(),
        analyzed_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskTier;
    use crate::summarize::NO_TEXT_SUMMARY;
    use justice_core::RiskTerms;

    fn scorer() -> RiskScorer {
        RiskScorer::new(&RiskTerms {
            high: vec!["termination".into(), "penalty".into()],
            medium: vec!["payment".into()],
        })
        .unwrap()
    }

    #[test]
    fn test_empty_document() {
        let report = analyze_document(&scorer(), "", 0.3);
        assert_eq!(report.summary, NO_TEXT_SUMMARY);
        assert_eq!(report.risks.overall_tier, RiskTier::Low);
        assert_eq!(report.word_count, 0);
        assert_eq!(report.char_count, 0);
        assert!(report.key_phrases.is_empty());
    }

    #[test]
    fn test_report_bundles_analyses() {
        let text = "Termination of this agreement attracts a penalty. \
                    Payment is due monthly. Late payment attracts a penalty.";
        let report = analyze_document(&scorer(), text, 0.3);
        assert_eq!(report.summary, text);
        assert_eq!(report.risks.high_risk_count, 3);
        assert_eq!(report.risks.medium_risk_count, 2);
        assert_eq!(report.risks.overall_tier, RiskTier::Medium);
        assert_eq!(report.word_count, 16);
        assert!(report.complexity.avg_sentence_length > 0.0);
        assert!(report.key_phrases.contains(&"penalty".to_string()));
    }
}
