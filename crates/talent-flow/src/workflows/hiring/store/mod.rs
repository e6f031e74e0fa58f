//! Byte-level key-value storage plus the JSON collection layer the board persists through.
//!
//! Each save overwrites the whole collection under its fixed key. There is no schema version
//! and no partial write; the file backend writes a sibling temp file and renames it over the
//! previous save.
//!
//! Saves are synchronous and run while the caller holds the board lock, so commits reach the
//! backend in the same order they reach memory. Collections are a few kilobytes; the write is
//! short enough to stay on a worker thread of the multi-threaded runtime.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::domain::{Candidate, Job};
use super::seed::Seed;

pub const JOBS_KEY: &str = "jobs";
pub const CANDIDATES_KEY: &str = "candidates";

/// Raw storage boundary so the board can run against disk or memory.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("collection '{key}' holds invalid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode collection '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// JSON collections on top of a [`KeyValueStore`].
#[derive(Clone)]
pub struct CollectionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl CollectionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// `None` when nothing was ever saved under `key`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>, StoreError> {
        let Some(bytes) = self.backend.get(key)? else {
            return Ok(None);
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    pub fn load_or<T: DeserializeOwned>(
        &self,
        key: &str,
        default: Vec<T>,
    ) -> Result<Vec<T>, StoreError> {
        Ok(self.load(key)?.unwrap_or(default))
    }

    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(items).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.put(key, &bytes)
    }

    pub fn load_jobs(&self, seed: Vec<Job>) -> Result<Vec<Job>, StoreError> {
        self.load_or(JOBS_KEY, seed)
    }

    pub fn load_candidates(&self, seed: Vec<Candidate>) -> Result<Vec<Candidate>, StoreError> {
        self.load_or(CANDIDATES_KEY, seed)
    }

    /// Loads both collections, each falling back to its seed independently.
    pub fn load_board(&self, seed: Seed) -> Result<Seed, StoreError> {
        Ok(Seed {
            jobs: self.load_jobs(seed.jobs)?,
            candidates: self.load_candidates(seed.candidates)?,
        })
    }

    pub fn save_jobs(&self, jobs: &[Job]) -> Result<(), StoreError> {
        self.save(JOBS_KEY, jobs)
    }

    pub fn save_candidates(&self, candidates: &[Candidate]) -> Result<(), StoreError> {
        self.save(CANDIDATES_KEY, candidates)
    }
}
