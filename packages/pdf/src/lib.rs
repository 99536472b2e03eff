#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! PDF text extraction adapter for transcripts and offering schedules.
//!
//! Transcripts and offering schedules are published as PDFs whose tables
//! come out of [`pdf_extract`] as undelimited, line-wrapped text. This crate
//! only turns the binary into that text; recovering records from it is the
//! job of `academic_ingest_parser`.
//!
//! Any failure inside the extractor (corrupt, encrypted or truncated input)
//! is reported as a single [`DocumentError::InvalidDocument`] for the whole
//! document. No partial text is ever returned.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

/// Errors that make a whole document unusable.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The extractor could not read the binary at all.
    #[error("Invalid document: {reason}")]
    InvalidDocument {
        /// What the extractor reported.
        reason: String,
    },

    /// Reading the document from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            reason: reason.into(),
        }
    }
}

/// Extracts the text layer of an in-memory PDF.
///
/// # Errors
///
/// Returns [`DocumentError::InvalidDocument`] if `bytes` is empty or the
/// extractor fails (including panics raised by the extractor on malformed
/// input).
pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    if bytes.is_empty() {
        return Err(DocumentError::invalid("empty document"));
    }

    let text = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
        .map_err(|panic| DocumentError::invalid(panic_message(panic.as_ref())))?
        .map_err(|e| DocumentError::invalid(format!("failed to extract text from PDF: {e}")))?;

    log::debug!(
        "Extracted {} characters of text from {} byte PDF",
        text.len(),
        bytes.len()
    );

    Ok(text)
}

/// Reads a PDF from disk and extracts its text layer.
///
/// # Errors
///
/// Returns [`DocumentError::Io`] if the file cannot be read, or
/// [`DocumentError::InvalidDocument`] if extraction fails.
pub fn extract_text_from_path(path: &Path) -> Result<String, DocumentError> {
    let bytes = std::fs::read(path)?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());
    extract_text(&bytes)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("PDF extractor aborted: {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_input() {
        let err = extract_text(&[]).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidDocument { .. }));
    }

    #[test]
    fn rejects_non_pdf_bytes() {
        let err = extract_text(b"this is plainly not a pdf").unwrap_err();
        assert!(matches!(err, DocumentError::InvalidDocument { .. }));
        assert!(err.to_string().starts_with("Invalid document"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = extract_text_from_path(Path::new("/nonexistent/historia.pdf")).unwrap_err();
        assert!(matches!(err, DocumentError::Io(_)));
    }

    #[test]
    fn panic_payloads_are_described() {
        let msg = panic_message(&"bad xref");
        assert_eq!(msg, "PDF extractor aborted: bad xref");
        let msg = panic_message(&"owned".to_string());
        assert_eq!(msg, "PDF extractor aborted: owned");
    }
}
