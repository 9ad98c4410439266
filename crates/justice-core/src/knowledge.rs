//! Static knowledge base: FAQ corpus, risk term lists and legal glossary.
//!
//! Loaded once at startup and never mutated afterwards. The default datasets
//! are embedded in the binary; a data directory may override any of them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::config::JusticeConfig;
use crate::error::{Error, Result};

const EMBEDDED_FAQ: &str = include_str!("../data/faq.json");
const EMBEDDED_RISK_TERMS: &str = include_str!("../data/risk_terms.json");
const EMBEDDED_GLOSSARY: &str = include_str!("../data/legal_terms.json");

/// Category label meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All Categories";

/// One pre-authored question with its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    pub category: String,
}

/// On-disk FAQ layout: ordered categories, each with ordered entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqFile {
    pub categories: Vec<FaqCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqCategory {
    pub category: String,
    pub entries: Vec<FaqItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Risk terms by severity. Order is preserved and repeats are significant:
/// a term listed twice counts each occurrence twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskTerms {
    pub high: Vec<String>,
    pub medium: Vec<String>,
}

/// A glossary entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub term: String,
    pub category: String,
    pub definition: String,
    pub example: String,
    pub indian_context: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glossary {
    pub categories: Vec<String>,
    pub terms: Vec<GlossaryTerm>,
}

/// Immutable, validated datasets shared by every analysis.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    faq_categories: Vec<String>,
    faq: Vec<FaqEntry>,
    risk_terms: RiskTerms,
    glossary: Glossary,
}

impl KnowledgeBase {
    /// Build from the datasets compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_parts(
            serde_json::from_str(EMBEDDED_FAQ)?,
            serde_json::from_str(EMBEDDED_RISK_TERMS)?,
            serde_json::from_str(EMBEDDED_GLOSSARY)?,
        )
    }

    /// Build from a directory. Files that are absent fall back to the embedded copy.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::Config(format!(
                "data directory does not exist: {}",
                dir.display()
            )));
        }
        let faq = read_or_embedded(&dir.join("faq.json"), EMBEDDED_FAQ)?;
        let risk_terms = read_or_embedded(&dir.join("risk_terms.json"), EMBEDDED_RISK_TERMS)?;
        let glossary = read_or_embedded(&dir.join("legal_terms.json"), EMBEDDED_GLOSSARY)?;
        Self::from_parts(
            serde_json::from_str(&faq)?,
            serde_json::from_str(&risk_terms)?,
            serde_json::from_str(&glossary)?,
        )
    }

    /// Load according to configuration.
    pub fn load(config: &JusticeConfig) -> Result<Self> {
        let kb = match &config.data_dir {
            Some(dir) => Self::from_dir(dir)?,
            None => Self::embedded()?,
        };
        info!(
            "Knowledge base loaded: {} FAQ entries in {} categories, {} high / {} medium risk terms, {} glossary terms",
            kb.faq.len(),
            kb.faq_categories.len(),
            kb.risk_terms.high.len(),
            kb.risk_terms.medium.len(),
            kb.glossary.terms.len()
        );
        Ok(kb)
    }

    /// Assemble and validate a knowledge base.
    pub fn from_parts(faq: FaqFile, risk_terms: RiskTerms, glossary: Glossary) -> Result<Self> {
        let mut faq_categories = Vec::new();
        let mut entries = Vec::new();
        let mut seen_categories = HashSet::new();

        for category in faq.categories {
            let name = category.category.trim().to_string();
            if name.is_empty() {
                return Err(Error::Dataset("FAQ category with empty name".into()));
            }
            if !seen_categories.insert(name.clone()) {
                return Err(Error::Dataset(format!("duplicate FAQ category: {}", name)));
            }
            let mut seen_questions = HashSet::new();
            for item in category.entries {
                if item.question.trim().is_empty() || item.answer.trim().is_empty() {
                    return Err(Error::Dataset(format!(
                        "empty question or answer in FAQ category {}",
                        name
                    )));
                }
                if !seen_questions.insert(item.question.clone()) {
                    return Err(Error::Dataset(format!(
                        "duplicate FAQ question in {}: {}",
                        name, item.question
                    )));
                }
                entries.push(FaqEntry {
                    question: item.question,
                    answer: item.answer,
                    category: name.clone(),
                });
            }
            faq_categories.push(name);
        }

        if risk_terms
            .high
            .iter()
            .chain(risk_terms.medium.iter())
            .any(|t| t.trim().is_empty())
        {
            return Err(Error::Dataset("blank risk term".into()));
        }

        let known: HashSet<&str> = glossary.categories.iter().map(String::as_str).collect();
        if let Some(term) = glossary
            .terms
            .iter()
            .find(|t| !known.contains(t.category.as_str()))
        {
            return Err(Error::Dataset(format!(
                "glossary term {} has unknown category {}",
                term.term, term.category
            )));
        }

        Ok(Self {
            faq_categories,
            faq: entries,
            risk_terms,
            glossary,
        })
    }

    /// FAQ category names in dataset order.
    pub fn categories(&self) -> &[String] {
        &self.faq_categories
    }

    /// All FAQ entries in dataset order.
    pub fn faq(&self) -> &[FaqEntry] {
        &self.faq
    }

    /// FAQ entries restricted to `category`. `None`, [`ALL_CATEGORIES`] and
    /// names that are not a known category all select every entry.
    pub fn faq_entries(&self, category: Option<&str>) -> Vec<&FaqEntry> {
        match category.map(str::trim) {
            Some(name) if self.faq_categories.iter().any(|c| c == name) => {
                self.faq.iter().filter(|e| e.category == name).collect()
            }
            _ => self.faq.iter().collect(),
        }
    }

    /// The first question of each category.
    pub fn sample_questions(&self) -> Vec<&FaqEntry> {
        self.faq_categories
            .iter()
            .filter_map(|c| self.faq.iter().find(|e| &e.category == c))
            .collect()
    }

    pub fn risk_terms(&self) -> &RiskTerms {
        &self.risk_terms
    }

    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    /// Glossary terms whose name contains `search` (case-insensitive) and whose
    /// category equals `category`, sorted alphabetically.
    pub fn search_terms(&self, search: Option<&str>, category: Option<&str>) -> Vec<&GlossaryTerm> {
        let needle = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);

        let mut terms: Vec<&GlossaryTerm> = self
            .glossary
            .terms
            .iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .filter(|t| needle.is_empty() || t.term.to_lowercase().contains(&needle))
            .collect();
        terms.sort_by(|a, b| a.term.cmp(&b.term));
        terms
    }

    /// Exact glossary lookup, falling back to a case-insensitive match.
    pub fn term(&self, name: &str) -> Option<&GlossaryTerm> {
        self.glossary
            .terms
            .iter()
            .find(|t| t.term == name)
            .or_else(|| {
                self.glossary
                    .terms
                    .iter()
                    .find(|t| t.term.eq_ignore_ascii_case(name))
            })
    }
}

fn read_or_embedded(path: &Path, embedded: &str) -> Result<String> {
    if path.exists() {
        info!("Loading dataset override {}", path.display());
        Ok(std::fs::read_to_string(path)?)
    } else {
        Ok(embedded.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::embedded().unwrap()
    }

    #[test]
    fn test_embedded_datasets_load() {
        let kb = kb();
        assert_eq!(kb.categories().len(), 6);
        assert_eq!(kb.faq().len(), 30);
        assert_eq!(kb.categories()[0], "Property & Rental");
        assert!(kb.risk_terms().high.contains(&"termination".to_string()));
        assert!(kb.risk_terms().medium.contains(&"force majeure".to_string()));
        assert_eq!(kb.glossary().categories.len(), 8);
    }

    #[test]
    fn test_faq_entries_filter() {
        let kb = kb();
        assert_eq!(kb.faq_entries(None).len(), 30);
        assert_eq!(kb.faq_entries(Some(ALL_CATEGORIES)).len(), 30);

        let rental = kb.faq_entries(Some("Property & Rental"));
        assert_eq!(rental.len(), 5);
        assert!(rental.iter().all(|e| e.category == "Property & Rental"));

        assert_eq!(kb.faq_entries(Some("Maritime Law")).len(), 30);
        assert_eq!(kb.faq_entries(Some("  ")).len(), 30);
    }

    #[test]
    fn test_sample_questions() {
        let kb = kb();
        let samples = kb.sample_questions();
        assert_eq!(samples.len(), 6);
        assert_eq!(samples[0].question, "What are my rights as a tenant in India?");
    }

    #[test]
    fn test_search_terms() {
        let kb = kb();

        let all = kb.search_terms(None, None);
        assert_eq!(all.len(), kb.glossary().terms.len());
        assert!(all.windows(2).all(|w| w[0].term <= w[1].term));

        let bail = kb.search_terms(Some("BAIL"), None);
        let names: Vec<&str> = bail.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(names, vec!["Anticipatory Bail", "Bail"]);

        let contract = kb.search_terms(None, Some("Contract Law"));
        assert!(!contract.is_empty());
        assert!(contract.iter().all(|t| t.category == "Contract Law"));
    }

    #[test]
    fn test_term_lookup() {
        let kb = kb();
        assert_eq!(kb.term("Arbitration").unwrap().category, "Contract Law");
        assert!(kb.term("arbitration").is_some());
        assert!(kb.term("Habeas Corpus Light").is_none());
    }

    #[test]
    fn test_rejects_duplicate_category() {
        let faq: FaqFile = serde_json::from_str(
            r#"{"categories":[
                {"category":"A","entries":[{"question":"q","answer":"a"}]},
                {"category":"A","entries":[]}
            ]}"#,
        )
        .unwrap();
        let risk = RiskTerms { high: vec![], medium: vec![] };
        let glossary = Glossary { categories: vec![], terms: vec![] };
        let err = KnowledgeBase::from_parts(faq, risk, glossary).unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }

    #[test]
    fn test_rejects_blank_risk_term() {
        let faq = FaqFile { categories: vec![] };
        let risk = RiskTerms { high: vec!["  ".into()], medium: vec![] };
        let glossary = Glossary { categories: vec![], terms: vec![] };
        assert!(KnowledgeBase::from_parts(faq, risk, glossary).is_err());
    }

    #[test]
    fn test_from_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("faq.json"),
            r#"{"categories":[{"category":"Tax","entries":[
                {"question":"When is the income tax return due?","answer":"Usually 31 July."}
            ]}]}"#,
        )
        .unwrap();

        let kb = KnowledgeBase::from_dir(dir.path()).unwrap();
        assert_eq!(kb.categories(), &["Tax".to_string()]);
        assert_eq!(kb.faq().len(), 1);
        // Risk terms and glossary fall back to the embedded copies.
        assert!(!kb.risk_terms().high.is_empty());
        assert!(!kb.glossary().terms.is_empty());
    }

    #[test]
    fn test_from_missing_dir() {
        let err = KnowledgeBase::from_dir(Path::new("/nonexistent/justice-data")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
