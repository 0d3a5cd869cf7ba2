//! Working storage: uploads are written to disk before processing so the
//! operator keeps a copy of every batch.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::batch::{Document, DocumentContent};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct WorkingStorage {
    root: PathBuf,
}

impl WorkingStorage {
    /// Creates the root directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::CreateDir {
            path: root.clone(),
            source,
        })?;
        Ok(WorkingStorage { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn batch_dir(&self, batch_id: Uuid) -> PathBuf {
        self.root.join(batch_id.to_string())
    }

    /// Writes every in-memory document of a batch to `<root>/<batch_id>/`.
    /// Returns the paths written, in input order. Documents that already
    /// live on disk are left untouched and yield no path.
    pub fn persist_batch(
        &self,
        batch_id: Uuid,
        documents: &[Document],
    ) -> Result<Vec<PathBuf>, StorageError> {
        let dir = self.batch_dir(batch_id);
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let mut taken = HashSet::new();
        let mut written = Vec::new();
        for doc in documents {
            let DocumentContent::Bytes(bytes) = &doc.content else {
                continue;
            };
            let path = dir.join(unique_name(&sanitize_filename(&doc.filename), &mut taken));
            std::fs::write(&path, bytes).map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), size = bytes.len(), "persisted upload");
            written.push(path);
        }
        Ok(written)
    }
}

/// Keeps only the final path component and drops characters that are
/// unsafe in filenames. Never returns an empty string.
pub fn sanitize_filename(filename: &str) -> String {
    let last = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = last
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Appends `-1`, `-2`, ... before the extension until the name is unused.
fn unique_name(name: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(name.to_string()) {
        return name.to_string();
    }
    let (stem, ext) = match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    };
    let mut n = 1;
    loop {
        let candidate = format!("{stem}-{n}{ext}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
