//! Per-store write serialization
//!
//! Auto-assign, manual assign, availability creation and week copy all
//! read, check, then write. Holding the store's lock across that sequence
//! keeps two requests from passing the same check.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default)]
pub struct StoreLocks {
    locks: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl StoreLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the store's lock; released when the guard drops
    pub async fn lock(&self, store_id: i64) -> OwnedMutexGuard<()> {
        let lock = self.locks.entry(store_id).or_default().clone();
        lock.lock_owned().await
    }
}
