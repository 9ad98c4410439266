//! Shared application state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use justice_analysis::JusticeAnalyzer;
use justice_core::{JusticeConfig, KnowledgeBase};

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: JusticeConfig,
    pub analyzer: JusticeAnalyzer,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: JusticeConfig, kb: KnowledgeBase) -> justice_core::Result<Self> {
        let analyzer = JusticeAnalyzer::new(Arc::new(kb), &config)?;
        Ok(Self {
            config,
            analyzer,
            started_at: Utc::now(),
        })
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        self.analyzer.knowledge()
    }
}
