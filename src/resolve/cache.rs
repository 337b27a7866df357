//! Memoization of successful resolutions.
//!
//! Entries are keyed by (root type, logical path text) and only ever hold a
//! finished [`StoragePath`]. A failed resolution never reaches the map, so a
//! later call with the same key resolves again and fails the same way.
//!
//! Resolution runs with no lock held; the result is published with a single
//! insert-if-absent under the write lock. Two threads racing on a new key both
//! compute the same (pure) result and the first insert wins.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::base::{Name, TypeId};
use crate::path::StoragePath;

use super::ResolutionResult;

type CacheKey = (TypeId, Name);

/// Counters describing cache traffic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    /// Lookups that had to run the resolver.
    pub misses: u64,
    /// Results published to the map.
    pub inserts: u64,
}

/// Shared (root type, path) -> storage path cache.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: RwLock<FxHashMap<CacheKey, StoragePath>>,
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached storage path for `(root, path)`, counting a hit if present.
    pub fn get(&self, root: TypeId, path: &str) -> Option<StoragePath> {
        let found = self.entries.read().get(&(root, Name::from(path))).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Return the cached path or run `resolve` and publish its success.
    ///
    /// Errors from `resolve` are passed through without touching the map.
    pub fn get_or_resolve(
        &self,
        root: TypeId,
        path: &str,
        resolve: impl FnOnce() -> ResolutionResult,
    ) -> ResolutionResult {
        let key = (root, Name::from(path));

        if let Some(hit) = self.entries.read().get(&key).cloned() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!("[CACHE] hit {} '{}' -> {}", root, path, hit);
            return Ok(hit);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!("[CACHE] miss {} '{}'", root, path);

        let resolved = resolve()?;

        let mut entries = self.entries.write();
        let stored = entries.entry(key).or_insert_with(|| {
            self.inserts.fetch_add(1, Ordering::Relaxed);
            resolved
        });
        Ok(stored.clone())
    }

    /// Whether a resolution for `(root, path)` has been published.
    pub fn contains(&self, root: TypeId, path: &str) -> bool {
        self.entries.read().contains_key(&(root, Name::from(path)))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
        }
    }
}
