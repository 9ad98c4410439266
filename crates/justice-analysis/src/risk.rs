//! Lexical risk scoring.
//!
//! Every configured term is matched case-insensitively on whole-word
//! boundaries against the text exactly as supplied. Reported offsets are byte
//! offsets into that text, so `&text[start..end]` is always the matched slice.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use justice_core::{Error, Result, RiskTerms};

/// Overall risk label for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// Severity of an individual term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSpan {
    pub start: usize,
    pub end: usize,
}

/// One located occurrence of a risk term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskMatch {
    pub term: String,
    pub severity: Severity,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub overall_tier: RiskTier,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    /// Spans per severity, sorted by start offset.
    pub highlighted_spans: BTreeMap<Severity, Vec<RiskSpan>>,
    /// Every occurrence, in term-list order.
    pub matches: Vec<RiskMatch>,
}

impl RiskResult {
    fn empty() -> Self {
        Self {
            overall_tier: RiskTier::Low,
            high_risk_count: 0,
            medium_risk_count: 0,
            highlighted_spans: BTreeMap::new(),
            matches: Vec::new(),
        }
    }
}

struct TermPattern {
    term: String,
    severity: Severity,
    regex: Regex,
}

/// Scans text for the configured high and medium severity terms.
pub struct RiskScorer {
    patterns: Vec<TermPattern>,
}

impl RiskScorer {
    /// Compile one whole-word pattern per term. Repeated terms are kept so
    /// that each listing counts separately.
    pub fn new(terms: &RiskTerms) -> Result<Self> {
        let listed = terms
            .high
            .iter()
            .map(|t| (t, Severity::High))
            .chain(terms.medium.iter().map(|t| (t, Severity::Medium)));

        let mut patterns = Vec::new();
        for (term, severity) in listed {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(term.trim()));
            let regex = Regex::new(&pattern)
                .map_err(|e| Error::Config(format!("invalid risk term {:?}: {}", term, e)))?;
            patterns.push(TermPattern {
                term: term.trim().to_string(),
                severity,
                regex,
            });
        }
        Ok(Self { patterns })
    }

    /// Count and locate risk terms and derive the overall tier.
    pub fn analyze_risks(&self, text: &str) -> RiskResult {
        if text.trim().is_empty() {
            return RiskResult::empty();
        }

        let mut matches = Vec::new();
        let mut spans: BTreeMap<Severity, Vec<RiskSpan>> = BTreeMap::new();
        spans.insert(Severity::High, Vec::new());
        spans.insert(Severity::Medium, Vec::new());

        for pattern in &self.patterns {
            for m in pattern.regex.find_iter(text) {
                matches.push(RiskMatch {
                    term: pattern.term.clone(),
                    severity: pattern.severity,
                    start: m.start(),
                    end: m.end(),
                });
                spans.entry(pattern.severity).or_default().push(RiskSpan {
                    start: m.start(),
                    end: m.end(),
                });
            }
        }
        for list in spans.values_mut() {
            list.sort_by_key(|s| (s.start, s.end));
        }

        let high_risk_count = matches
            .iter()
            .filter(|m| m.severity == Severity::High)
            .count();
        let medium_risk_count = matches.len() - high_risk_count;
        let overall_tier = tier_for_counts(high_risk_count, medium_risk_count);

        debug!(
            "Risk analysis: {} high, {} medium -> {:?}",
            high_risk_count, medium_risk_count, overall_tier
        );

        RiskResult {
            overall_tier,
            high_risk_count,
            medium_risk_count,
            highlighted_spans: spans,
            matches,
        }
    }
}

/// Tier thresholds, first match wins.
pub fn tier_for_counts(high: usize, medium: usize) -> RiskTier {
    if high >= 5 || (high >= 3 && medium >= 5) {
        RiskTier::High
    } else if high >= 2 || medium >= 3 {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> RiskScorer {
        RiskScorer::new(&RiskTerms {
            high: vec![
                "termination".into(),
                "liability".into(),
                "governing law".into(),
                "damages".into(),
                "damages".into(),
            ],
            medium: vec!["term".into(), "payment".into(), "notice period".into()],
        })
        .unwrap()
    }

    #[test]
    fn test_empty_text_is_low() {
        let result = scorer().analyze_risks("   \n ");
        assert_eq!(result.overall_tier, RiskTier::Low);
        assert_eq!(result.high_risk_count, 0);
        assert_eq!(result.medium_risk_count, 0);
        assert!(result.highlighted_spans.is_empty());
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_single_termination_is_low() {
        let result = scorer().analyze_risks("Early Termination requires written consent.");
        assert_eq!(result.high_risk_count, 1);
        assert_eq!(result.medium_risk_count, 0);
        assert_eq!(result.overall_tier, RiskTier::Low);
        assert_eq!(
            result.highlighted_spans[&Severity::High],
            vec![RiskSpan { start: 6, end: 17 }]
        );
    }

    #[test]
    fn test_whole_words_only() {
        let result = scorer().analyze_risks("All liabilities and terms are listed.");
        assert_eq!(result.high_risk_count, 0);
        assert_eq!(result.medium_risk_count, 0);
    }

    #[test]
    fn test_spans_index_original_text() {
        let text = "Héllo. The GOVERNING LAW is Indian; liability is capped. Payment due.";
        let result = scorer().analyze_risks(text);
        assert_eq!(result.high_risk_count, 2);
        assert_eq!(result.medium_risk_count, 1);
        for m in &result.matches {
            assert!(text[m.start..m.end].eq_ignore_ascii_case(&m.term));
        }
        let high = &result.highlighted_spans[&Severity::High];
        assert!(high[0].start < high[1].start);
    }

    #[test]
    fn test_repeated_terms_count_twice() {
        let result = scorer().analyze_risks("Damages may be claimed.");
        assert_eq!(result.high_risk_count, 2);
        assert_eq!(result.overall_tier, RiskTier::Medium);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(tier_for_counts(0, 0), RiskTier::Low);
        assert_eq!(tier_for_counts(1, 2), RiskTier::Low);
        assert_eq!(tier_for_counts(2, 0), RiskTier::Medium);
        assert_eq!(tier_for_counts(0, 3), RiskTier::Medium);
        assert_eq!(tier_for_counts(3, 4), RiskTier::Medium);
        assert_eq!(tier_for_counts(3, 5), RiskTier::High);
        assert_eq!(tier_for_counts(5, 0), RiskTier::High);
    }

    #[test]
    fn test_serialized_shape() {
        let result = scorer().analyze_risks("termination");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["overall_tier"], "Low");
        assert_eq!(json["highlighted_spans"]["high"][0]["start"], 0);
        assert_eq!(json["highlighted_spans"]["medium"], serde_json::json!([]));
    }
}
