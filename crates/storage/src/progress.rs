use std::sync::Arc;

use course_core::ProgressRecord;

use crate::repository::{KeyValueStore, StorageError};

pub const PROGRESS_KEY_PREFIX: &str = "progress:";

/// Storage key of the progress record for `slug`.
#[must_use]
pub fn progress_key(slug: &str) -> String {
    format!("{PROGRESS_KEY_PREFIX}{slug}")
}

/// Reads and writes whole progress records through a `KeyValueStore`.
#[derive(Clone)]
pub struct ProgressStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the record for `slug`, empty when nothing was stored yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored value is not a
    /// progress record, or other storage errors.
    pub async fn load(&self, slug: &str) -> Result<ProgressRecord, StorageError> {
        let Some(raw) = self.kv.get(&progress_key(slug)).await? else {
            return Ok(ProgressRecord::new());
        };
        serde_json::from_str(&raw).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Serialize and store the full record for `slug`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be serialized or stored.
    pub async fn save(&self, slug: &str, record: &ProgressRecord) -> Result<(), StorageError> {
        let raw = serde_json::to_string(record)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.kv.set(&progress_key(slug), &raw).await
    }
}
