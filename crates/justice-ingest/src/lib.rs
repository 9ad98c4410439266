//! JusticeAI Ingest: turns uploaded documents into plain text for analysis.

pub mod file;

pub use file::{extract_text, extract_text_from_bytes, FileType};
