//! Per-endpoint item cache.

use crate::error::SourceError;
use crate::source::{EndpointRegistry, ItemSource};
use crate::types::{CacheStats, Endpoint, Item};
use dashmap::DashMap;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The cached items of one endpoint, in upstream order.
pub type CachedItems = Arc<[Arc<Item>]>;

/// Outcome of a preload pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadReport {
    /// Endpoints that are now cached.
    pub loaded: Vec<Endpoint>,
    /// Endpoints whose fetch failed. These are not cached.
    pub failed: Vec<Endpoint>,
}

/// Lazily populated map from endpoint name to its item list.
///
/// An entry, once written, serves every later read of that endpoint until
/// [`clear`](CacheStore::clear). There is no eviction, expiry or size bound.
/// Reads are lock-sharded and do not block each other; fetches run outside
/// any lock, so two callers missing the same endpoint may both fetch and the
/// last write wins.
pub struct CacheStore {
    entries: DashMap<Endpoint, CachedItems>,
    source: Arc<dyn ItemSource>,
    registry: Arc<dyn EndpointRegistry>,
}

impl CacheStore {
    /// Create an empty cache over the given source.
    pub fn new(source: Arc<dyn ItemSource>, registry: Arc<dyn EndpointRegistry>) -> Self {
        Self {
            entries: DashMap::new(),
            source,
            registry,
        }
    }

    /// Return the cached items of `endpoint`, fetching and caching them on a miss.
    ///
    /// A failed fetch leaves the cache untouched, is logged as a warning and
    /// yields an empty list.
    pub fn get_or_fetch(&self, endpoint: &str) -> CachedItems {
        match self.try_get_or_fetch(endpoint) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(endpoint, error = %err, "failed to fetch endpoint items");
                Vec::new().into()
            }
        }
    }

    fn try_get_or_fetch(&self, endpoint: &str) -> Result<CachedItems, SourceError> {
        if let Some(entry) = self.entries.get(endpoint) {
            return Ok(Arc::clone(entry.value()));
        }

        let list = self.source.list_items(endpoint)?;
        let items: CachedItems = list.results.into_iter().map(Arc::new).collect();
        tracing::debug!(endpoint, count = items.len(), "cached endpoint items");
        self.entries.insert(endpoint.to_string(), Arc::clone(&items));
        Ok(items)
    }

    /// Eagerly populate the cache.
    ///
    /// An empty `endpoints` slice means every endpoint in the registry. Each
    /// endpoint is attempted regardless of earlier failures.
    pub fn preload(&self, endpoints: &[Endpoint]) -> PreloadReport {
        let targets = if endpoints.is_empty() {
            self.registry.all_endpoints()
        } else {
            endpoints.to_vec()
        };

        #[cfg(feature = "parallel")]
        let outcomes: Vec<(Endpoint, Result<CachedItems, SourceError>)> = targets
            .into_par_iter()
            .map(|endpoint| {
                let outcome = self.try_get_or_fetch(&endpoint);
                (endpoint, outcome)
            })
            .collect();

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<(Endpoint, Result<CachedItems, SourceError>)> = targets
            .into_iter()
            .map(|endpoint| {
                let outcome = self.try_get_or_fetch(&endpoint);
                (endpoint, outcome)
            })
            .collect();

        let mut report = PreloadReport::default();
        for (endpoint, outcome) in outcomes {
            match outcome {
                Ok(_) => report.loaded.push(endpoint),
                Err(err) => {
                    tracing::warn!(endpoint = %endpoint, error = %err, "failed to preload endpoint");
                    report.failed.push(endpoint);
                }
            }
        }

        tracing::info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "preload finished"
        );
        report
    }

    /// Drop every cached entry. Later reads fetch again.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Item counts of the endpoints currently cached. Endpoints never
    /// fetched, or whose fetch failed, are absent.
    pub fn stats(&self) -> CacheStats {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().len()))
            .collect()
    }

    pub fn contains(&self, endpoint: &str) -> bool {
        self.entries.contains_key(endpoint)
    }

    /// Number of cached endpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
