//! File text extraction.

use justice_core::{Error, Result};
use std::path::Path;
use tracing::{info, warn};

/// Document kinds recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    PlainText,
    Markdown,
    Pdf,
    Image,
    Unknown,
}

impl FileType {
    /// Detect file type from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" => Self::PlainText,
            "md" | "markdown" => Self::Markdown,
            "pdf" => Self::Pdf,
            "jpg" | "jpeg" | "png" | "tif" | "tiff" | "bmp" => Self::Image,
            _ => Self::Unknown,
        }
    }

    pub fn from_file_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Self::from_extension(ext)
    }

    /// Whether text can be extracted from this type.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::PlainText | Self::Markdown | Self::Pdf)
    }
}

/// Extract text from a file on disk.
pub fn extract_text(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if !FileType::from_file_name(name).is_supported() {
        return Err(unsupported(name));
    }
    let bytes = std::fs::read(path)?;
    extract_text_from_bytes(name, &bytes)
}

/// Extract text from uploaded bytes, dispatching on the file name's extension.
pub fn extract_text_from_bytes(file_name: &str, bytes: &[u8]) -> Result<String> {
    let file_type = FileType::from_file_name(file_name);
    info!("Extracting text from {} ({:?}, {} bytes)", file_name, file_type, bytes.len());

    match file_type {
        FileType::PlainText | FileType::Markdown => Ok(decode_text(bytes)),
        FileType::Pdf => extract_pdf(file_name, bytes),
        FileType::Image | FileType::Unknown => Err(unsupported(file_name)),
    }
}

fn unsupported(file_name: &str) -> Error {
    match FileType::from_file_name(file_name) {
        FileType::Image => Error::UnsupportedFormat(format!(
            "{}: text recognition for images is not available",
            file_name
        )),
        _ => Error::UnsupportedFormat(format!(
            "{}: only txt, md and pdf files are accepted",
            file_name
        )),
    }
}

/// UTF-8 (BOM stripped), falling back to Latin-1 for legacy encodings.
fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            warn!("Input is not valid UTF-8, decoding as Latin-1");
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

fn extract_pdf(file_name: &str, bytes: &[u8]) -> Result<String> {
    let raw = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        warn!("PDF extraction failed for {}: {}", file_name, e);
        Error::Extraction(format!("{}: {}", file_name, e))
    })?;

    let cleaned = clean_extracted_text(&raw);
    if cleaned.is_empty() {
        return Err(Error::Extraction(format!(
            "{}: no extractable text (scanned PDFs are not supported)",
            file_name
        )));
    }
    info!("PDF extraction produced {} characters", cleaned.len());
    Ok(cleaned)
}

/// Collapse whitespace within lines and drop blank lines.
fn clean_extracted_text(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
