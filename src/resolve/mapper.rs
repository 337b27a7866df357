//! PathMapper — cached path resolution owned by a datastore.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::base::TypeId;
use crate::mapping::MetadataGraph;

use super::ResolutionResult;
use super::cache::{CacheStats, ResolutionCache};
use super::config::ResolverConfig;
use super::resolver::Resolver;

/// Resolves logical paths through a [`ResolutionCache`].
///
/// Lives as long as its owner; the cache is never cleared or expired.
#[derive(Debug)]
pub struct PathMapper {
    graph: Arc<MetadataGraph>,
    config: ResolverConfig,
    cache: ResolutionCache,
}

impl PathMapper {
    pub fn new(graph: Arc<MetadataGraph>) -> Self {
        Self::with_config(graph, ResolverConfig::default())
    }

    pub fn with_config(graph: Arc<MetadataGraph>, config: ResolverConfig) -> Self {
        Self {
            graph,
            config,
            cache: ResolutionCache::new(),
        }
    }

    pub fn graph(&self) -> &Arc<MetadataGraph> {
        &self.graph
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.graph, &self.config)
    }

    /// Resolve `path` from `root`, consulting the cache first.
    pub fn resolve(&self, root: TypeId, path: &str) -> ResolutionResult {
        let result = if self.config.cache_enabled {
            self.cache
                .get_or_resolve(root, path, || self.resolver().resolve(root, path))
        } else {
            self.resolver().resolve(root, path)
        };

        if let Err(err) = &result {
            debug!("[RESOLVE] {} ({})", err, err.kind());
        }
        result
    }

    /// Resolve without reading or writing the cache.
    pub fn resolve_uncached(&self, root: TypeId, path: &str) -> ResolutionResult {
        self.resolver().resolve(root, path)
    }

    /// Resolve many `(root, path)` pairs in parallel through the shared cache.
    ///
    /// Results are returned in request order.
    pub fn resolve_batch(&self, requests: &[(TypeId, &str)]) -> Vec<ResolutionResult> {
        requests
            .par_iter()
            .map(|&(root, path)| self.resolve(root, path))
            .collect()
    }
}
