#![forbid(unsafe_code)]

pub mod progress;
pub mod repository;
pub mod sqlite;

pub use progress::{ProgressStore, progress_key};
pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
