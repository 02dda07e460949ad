//! Cache module for storing the trending GIF list
//!
//! `store` provides the persistent key-value stores and `trending` layers the
//! single time-boxed trending entry on top of them. Corrupt or expired entries
//! are cleaned up on read and never surface as errors.

pub mod store;
pub mod trending;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use crate::config::Config;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use trending::{CacheEntry, Clock, Miss, SystemClock, TrendingCache};

/// Directory the file store uses: the configured override, else the XDG cache dir
pub fn cache_dir(config: &Config) -> Option<PathBuf> {
    config
        .cache_dir
        .clone()
        .or_else(|| FileStore::new().map(|store| store.dir().to_path_buf()))
}

/// Opens the store for this run
///
/// `ephemeral` selects an in-memory store. When no cache directory can be
/// determined the in-memory store is used as well, with a warning.
pub fn open_store(config: &Config, ephemeral: bool) -> Arc<dyn KeyValueStore> {
    if ephemeral {
        return Arc::new(MemoryStore::new());
    }

    match cache_dir(config) {
        Some(dir) => Arc::new(FileStore::with_dir(dir)),
        None => {
            warn!("No cache directory available; trending results will not persist");
            Arc::new(MemoryStore::new())
        }
    }
}
