//! The search engine that fans a query out over cached endpoints.

use crate::cache::{CacheStore, PreloadReport};
use crate::scorer::{match_item, score};
use crate::source::{EndpointRegistry, ItemSource, StaticRegistry};
use crate::types::{CacheStats, Endpoint, Hit};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The main search engine over one or many catalog endpoints.
///
/// `SearchEngine` owns a [`CacheStore`] and uses it to read each endpoint's
/// item list, fetching from the [`ItemSource`] on first access. Every item is
/// matched against the query on its `name` and `index` fields, scored, and the
/// hits are ranked by descending relevance.
///
/// The engine performs no validation of its own: an empty query yields no
/// hits and an unknown endpoint yields whatever the source returns for it
/// (normally a failure, which degrades to zero items).
///
/// Create a `SearchEngine` using the [`SearchEngineBuilder`].
///
/// # Examples
///
/// ```rust
/// use compendium::prelude::*;
/// use std::sync::Arc;
///
/// struct Spells;
///
/// impl ItemSource for Spells {
///     fn list_items(&self, _endpoint: &str) -> Result<ItemList, SourceError> {
///         Ok(ItemList {
///             count: 1,
///             results: vec![Item::new("fireball", "Fireball", "/api/2014/spells/fireball")],
///         })
///     }
///
///     fn get_item_detail(&self, _: &str, _: &str) -> Result<serde_json::Value, SourceError> {
///         Ok(serde_json::Value::Null)
///     }
/// }
///
/// let engine = SearchEngine::builder(Arc::new(Spells))
///     .registry(Arc::new(StaticRegistry::new(["spells"])))
///     .build();
///
/// let hits = engine.search("fire", &[], 10);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].matched_field, MatchedField::Name);
/// ```
pub struct SearchEngine {
  /// Per-endpoint item lists, populated on demand.
  cache: CacheStore,
  /// The endpoints searched when a caller names none.
  registry: Arc<dyn EndpointRegistry>,
}

impl SearchEngine {
  /// Creates a new `SearchEngineBuilder` over the given item source.
  pub fn builder(source: Arc<dyn ItemSource>) -> SearchEngineBuilder {
    SearchEngineBuilder::new(source)
  }

  /// Searches a single endpoint.
  ///
  /// Each item is tested on `name` first, then `index`; an item matching
  /// both is recorded as a name match. Hits are sorted by descending score
  /// with a stable sort, so ties keep upstream list order, and then cut to
  /// `max_results`. A `max_results` of zero returns no hits.
  ///
  /// # Arguments
  ///
  /// * `query` - Text to look for, case-insensitively.
  /// * `endpoint` - The collection to search.
  /// * `max_results` - Upper bound on the number of hits returned.
  pub fn search_in_endpoint(&self, query: &str, endpoint: &str, max_results: usize) -> Vec<Hit> {
    let items = self.cache.get_or_fetch(endpoint);

    let mut hits: Vec<Hit> = items
      .iter()
      .filter_map(|item| {
        let field = match_item(item, query)?;
        Some(Hit {
          item: Arc::clone(item),
          matched_field: field,
          relevance_score: score(item, query, Some(field)),
          endpoint: endpoint.to_string(),
        })
      })
      .collect();

    rank(&mut hits, max_results);
    hits
  }

  /// Searches several endpoints and merges the results.
  ///
  /// ## Search Lifecycle
  ///
  /// 1.  **Targets**: `endpoints`, or every registered endpoint when empty.
  /// 2.  **Per-endpoint search**: each target goes through
  ///     [`search_in_endpoint`](Self::search_in_endpoint) with the same
  ///     `max_results`, so every endpoint is already truncated before the
  ///     merge. With the `parallel` feature the endpoints are searched
  ///     concurrently; the merge order is the same either way.
  /// 3.  **Merge**: hits are concatenated in target order.
  /// 4.  **Ranking**: the merged list is stably sorted by descending score,
  ///     so ties keep target order and then upstream list order.
  /// 5.  **Limit**: the merged list is cut to `max_results`.
  pub fn search(&self, query: &str, endpoints: &[Endpoint], max_results: usize) -> Vec<Hit> {
    let targets = if endpoints.is_empty() {
      self.registry.all_endpoints()
    } else {
      endpoints.to_vec()
    };

    #[cfg(feature = "parallel")]
    let per_endpoint: Vec<Vec<Hit>> = targets
      .par_iter()
      .map(|endpoint| self.search_in_endpoint(query, endpoint, max_results))
      .collect();

    #[cfg(not(feature = "parallel"))]
    let per_endpoint: Vec<Vec<Hit>> = targets
      .iter()
      .map(|endpoint| self.search_in_endpoint(query, endpoint, max_results))
      .collect();

    let mut merged: Vec<Hit> = per_endpoint.into_iter().flatten().collect();
    rank(&mut merged, max_results);

    tracing::debug!(
      query,
      endpoints = targets.len(),
      hits = merged.len(),
      "search finished"
    );
    merged
  }

  /// Eagerly caches the given endpoints, or every registered endpoint when
  /// `endpoints` is empty. Failures are logged and skipped.
  pub fn preload(&self, endpoints: &[Endpoint]) -> PreloadReport {
    self.cache.preload(endpoints)
  }

  /// Drops all cached item lists.
  pub fn clear_cache(&self) {
    self.cache.clear();
  }

  /// Item counts of the currently cached endpoints.
  pub fn cache_stats(&self) -> CacheStats {
    self.cache.stats()
  }

  /// The registry this engine enumerates when no endpoints are given.
  pub fn registry(&self) -> &Arc<dyn EndpointRegistry> {
    &self.registry
  }
}

/// Stable sort by descending relevance, then truncate.
fn rank(hits: &mut Vec<Hit>, max_results: usize) {
  hits.sort_by(|a, b| {
    b.relevance_score
      .partial_cmp(&a.relevance_score)
      .unwrap_or(std::cmp::Ordering::Equal)
  });
  hits.truncate(max_results);
}

/// A builder for creating `SearchEngine` instances.
///
/// The registry defaults to the built-in [`StaticRegistry`].
pub struct SearchEngineBuilder {
  source: Arc<dyn ItemSource>,
  registry: Option<Arc<dyn EndpointRegistry>>,
}

impl SearchEngineBuilder {
  /// Creates a builder over the given item source.
  pub fn new(source: Arc<dyn ItemSource>) -> Self {
    Self {
      source,
      registry: None,
    }
  }

  /// Sets the endpoint registry.
  pub fn registry(mut self, registry: Arc<dyn EndpointRegistry>) -> Self {
    self.registry = Some(registry);
    self
  }

  /// Builds the `SearchEngine` with an empty cache.
  pub fn build(self) -> SearchEngine {
    let registry = self
      .registry
      .unwrap_or_else(|| Arc::new(StaticRegistry::default()) as Arc<dyn EndpointRegistry>);
    SearchEngine {
      cache: CacheStore::new(self.source, Arc::clone(&registry)),
      registry,
    }
  }
}
