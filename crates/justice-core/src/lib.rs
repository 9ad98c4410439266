//! JusticeAI Core: configuration, error type, static knowledge base, text normalization.

pub mod config;
pub mod error;
pub mod knowledge;
pub mod text;

pub use config::JusticeConfig;
pub use error::{Error, Result};
pub use knowledge::{FaqEntry, Glossary, GlossaryTerm, KnowledgeBase, RiskTerms};
pub use text::{normalize, normalize_keeping};
