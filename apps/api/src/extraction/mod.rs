//! Document → plain text. Dispatches on the filename suffix and reports
//! format-specific failures as tagged `ExtractionError`s; callers decide how
//! to degrade.

pub mod docx;
pub mod pdf;

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Read(#[from] std::io::Error),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("DOCX parsing failed: {0}")]
    DocxParsing(String),
}

/// Document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Resolves the kind from a filename suffix, ignoring case.
    /// Returns `None` for anything that is not `.pdf` or `.docx`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

/// Converts raw document bytes of a known kind into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Default extractor: pdf-extract for PDFs, docx-rs for Word documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTextExtractor;

impl TextExtractor for DocumentTextExtractor {
    fn extract(&self, kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractionError> {
        match kind {
            DocumentKind::Pdf => pdf::extract_pdf_text(bytes),
            DocumentKind::Docx => docx::extract_docx_text(bytes),
        }
    }
}
