//! Runtime configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

pub const APP_NAME: &str = "JusticeAI";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum cosine similarity for a FAQ entry to count as a match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;
/// Fraction of sentences kept by the summarizer.
pub const DEFAULT_SUMMARIZATION_RATIO: f64 = 0.3;
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_UPLOAD_MB: usize = 16;

/// Top-level JusticeAI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JusticeConfig {
    /// HTTP server port.
    pub port: u16,
    /// Question matcher acceptance threshold, in `(0, 1]`.
    pub similarity_threshold: f64,
    /// Default summarization ratio, in `(0, 1]`.
    pub summarization_ratio: f64,
    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: usize,
    /// Optional directory holding `faq.json`, `risk_terms.json` and
    /// `legal_terms.json` that replace the embedded datasets.
    pub data_dir: Option<PathBuf>,
}

impl Default for JusticeConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            summarization_ratio: DEFAULT_SUMMARIZATION_RATIO,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            data_dir: None,
        }
    }
}

impl JusticeConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Invalid values are
    /// logged and replaced by their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = parse_or(&lookup, "PORT", defaults.port, |p: &u16| *p > 0);
        let similarity_threshold = parse_or(
            &lookup,
            "JUSTICE_SIMILARITY_THRESHOLD",
            defaults.similarity_threshold,
            |t: &f64| *t > 0.0 && *t <= 1.0,
        );
        let summarization_ratio = parse_or(
            &lookup,
            "JUSTICE_SUMMARY_RATIO",
            defaults.summarization_ratio,
            |r: &f64| *r > 0.0 && *r <= 1.0,
        );
        let max_upload_mb = parse_or(
            &lookup,
            "JUSTICE_MAX_UPLOAD_MB",
            DEFAULT_MAX_UPLOAD_MB,
            |mb: &usize| *mb > 0,
        );
        let max_upload_bytes = max_upload_mb.checked_mul(1024 * 1024).unwrap_or_else(|| {
            warn!(
                "Ignoring invalid JUSTICE_MAX_UPLOAD_MB={}, using {}",
                max_upload_mb, DEFAULT_MAX_UPLOAD_MB
            );
            defaults.max_upload_bytes
        });
        let data_dir = lookup("JUSTICE_DATA_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from);

        Self {
            port,
            similarity_threshold,
            summarization_ratio,
            max_upload_bytes,
            data_dir,
        }
    }
}

fn parse_or<T, F, V>(lookup: &F, key: &str, default: T, valid: V) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
    F: Fn(&str) -> Option<String>,
    V: Fn(&T) -> bool,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) if valid(&value) => value,
            _ => {
                warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
                default
            }
        },
    }
}
