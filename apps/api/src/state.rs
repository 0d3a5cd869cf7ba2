use std::sync::Arc;

use crate::batch::BatchProcessor;
use crate::config::Config;
use crate::results::ResultStore;
use crate::storage::WorkingStorage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub processor: Arc<BatchProcessor>,
    /// Present when uploads are persisted before processing.
    pub storage: Option<WorkingStorage>,
    pub results: Arc<ResultStore>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let storage = if config.persist_uploads {
            Some(WorkingStorage::open(&config.upload_dir)?)
        } else {
            None
        };

        Ok(AppState {
            processor: Arc::new(BatchProcessor::new(config.inference)),
            storage,
            results: Arc::new(ResultStore::new(config.max_stored_batches)),
            config,
        })
    }
}
