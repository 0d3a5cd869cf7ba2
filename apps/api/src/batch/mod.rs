//! Per-document pipeline: extract → infer → record, in input order.
//!
//! A batch never fails as a whole. Unsupported files are dropped, unreadable
//! ones degrade to empty text (and therefore `N/A` fields) with a warning.

pub mod provider;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::extraction::{DocumentKind, DocumentTextExtractor, ExtractionError, TextExtractor};
use crate::inference::{FieldInferencer, InferenceConfig};

pub use provider::{ContentProvider, DirectoryProvider};

#[derive(Debug, Clone)]
pub enum DocumentContent {
    Bytes(Bytes),
    Path(PathBuf),
}

impl DocumentContent {
    fn load(&self) -> std::io::Result<Cow<'_, [u8]>> {
        match self {
            DocumentContent::Bytes(bytes) => Ok(Cow::Borrowed(bytes.as_ref())),
            DocumentContent::Path(path) => std::fs::read(path).map(Cow::Owned),
        }
    }
}

/// An uploaded or scanned document awaiting processing.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub content: DocumentContent,
}

impl Document {
    pub fn from_bytes(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Document {
            filename: filename.into(),
            content: DocumentContent::Bytes(bytes.into()),
        }
    }

    /// Uses the final path component as the filename.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Document {
            filename,
            content: DocumentContent::Path(path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeRecord {
    pub filename: String,
    pub name: String,
    pub email: String,
}

pub struct BatchProcessor<E = DocumentTextExtractor> {
    extractor: E,
    inferencer: FieldInferencer,
}

impl BatchProcessor<DocumentTextExtractor> {
    pub fn new(config: InferenceConfig) -> Self {
        BatchProcessor::with_extractor(DocumentTextExtractor, FieldInferencer::new(config))
    }
}

impl<E: TextExtractor> BatchProcessor<E> {
    pub fn with_extractor(extractor: E, inferencer: FieldInferencer) -> Self {
        BatchProcessor {
            extractor,
            inferencer,
        }
    }

    /// Processes documents in order. The output holds one record per
    /// supported document and nothing for unsupported ones.
    pub fn process(&self, documents: &[Document]) -> Vec<ResumeRecord> {
        let records: Vec<ResumeRecord> = documents
            .iter()
            .filter_map(|doc| self.process_one(&doc.filename, || doc.content.load()))
            .collect();
        log_summary(documents.len(), records.len());
        records
    }

    /// Same as [`process`](Self::process) but pulls content by filename from
    /// `provider` instead of carrying it in the document.
    pub fn process_from<P>(&self, filenames: &[String], provider: &P) -> Vec<ResumeRecord>
    where
        P: ContentProvider + ?Sized,
    {
        let records: Vec<ResumeRecord> = filenames
            .iter()
            .filter_map(|filename| {
                self.process_one(filename, || provider.fetch(filename).map(Cow::Owned))
            })
            .collect();
        log_summary(filenames.len(), records.len());
        records
    }

    fn process_one<'a, F>(&self, filename: &str, load: F) -> Option<ResumeRecord>
    where
        F: FnOnce() -> std::io::Result<Cow<'a, [u8]>>,
    {
        let Some(kind) = DocumentKind::from_filename(filename) else {
            debug!(filename, "skipping unsupported document type");
            return None;
        };

        let text = match self.extract_text(kind, load) {
            Ok(text) => text,
            Err(e) => {
                warn!(filename, error = %e, "text extraction failed; continuing with empty text");
                String::new()
            }
        };

        let fields = self.inferencer.infer(&text);
        Some(ResumeRecord {
            filename: filename.to_string(),
            name: fields.name,
            email: fields.email,
        })
    }

    fn extract_text<'a, F>(&self, kind: DocumentKind, load: F) -> Result<String, ExtractionError>
    where
        F: FnOnce() -> std::io::Result<Cow<'a, [u8]>>,
    {
        let bytes = load()?;
        self.extractor.extract(kind, &bytes)
    }
}

fn log_summary(received: usize, produced: usize) {
    info!(
        received,
        produced,
        skipped = received - produced,
        "resume batch processed"
    );
}

/// Names of the regular files directly under `dir`, sorted. Pairs with
/// [`DirectoryProvider`] for directory batches.
pub fn list_directory(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
