use axum::extract::Multipart;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::batch::{Document, ResumeRecord};
use crate::errors::AppError;
use crate::results::StoredBatch;
use crate::state::AppState;
use crate::storage::StorageError;

/// Multipart field carrying resume files. May repeat.
pub const UPLOAD_FIELD: &str = "resumes";

#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    #[serde(flatten)]
    pub batch: StoredBatch,
    pub received: usize,
}

impl BatchOutcome {
    /// Uploads that produced no record (unsupported file types).
    pub fn skipped(&self) -> usize {
        self.received - self.batch.records.len()
    }
}

/// Collects every file part named `resumes`, in upload order.
/// Other fields and file parts without a filename are ignored.
pub async fn collect_uploads(multipart: &mut Multipart) -> Result<Vec<Document>, AppError> {
    let mut documents = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // Browsers send an empty part when nothing was selected.
        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let data = field.bytes().await?;
        documents.push(Document::from_bytes(filename, data));
    }
    Ok(documents)
}

/// Persists (when enabled) and processes one upload batch off the async
/// runtime, then records the result for later export.
pub async fn run_batch(state: &AppState, documents: Vec<Document>) -> Result<BatchOutcome, AppError> {
    let batch_id = Uuid::new_v4();
    let received = documents.len();
    let storage = state.storage.clone();
    let processor = state.processor.clone();

    let records = tokio::task::spawn_blocking(move || -> Result<Vec<ResumeRecord>, StorageError> {
        if let Some(storage) = storage {
            storage.persist_batch(batch_id, &documents)?;
        }
        Ok(processor.process(&documents))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("batch worker failed: {e}")))??;

    info!(%batch_id, received, records = records.len(), "upload batch complete");

    Ok(BatchOutcome {
        batch: state.results.insert(batch_id, records),
        received,
    })
}
