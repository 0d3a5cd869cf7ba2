//! Keeps recent batch results in memory so they can be re-rendered or
//! exported after the upload request completes.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::batch::ResumeRecord;

#[derive(Debug, Clone, Serialize)]
pub struct StoredBatch {
    pub batch_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub records: Vec<ResumeRecord>,
}

/// Bounded store; inserting past `capacity` evicts the oldest batch.
pub struct ResultStore {
    capacity: usize,
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    batches: HashMap<Uuid, StoredBatch>,
    order: VecDeque<Uuid>,
}

impl ResultStore {
    pub fn new(capacity: usize) -> Self {
        ResultStore {
            capacity: capacity.max(1),
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn insert(&self, batch_id: Uuid, records: Vec<ResumeRecord>) -> StoredBatch {
        let batch = StoredBatch {
            batch_id,
            created_at: Utc::now(),
            records,
        };

        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if inner.batches.insert(batch_id, batch.clone()).is_none() {
            inner.order.push_back(batch_id);
        }
        while inner.order.len() > self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.batches.remove(&oldest);
            }
        }
        batch
    }

    pub fn get(&self, batch_id: Uuid) -> Option<StoredBatch> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.batches.get(&batch_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .order
            .len()
    }
}
