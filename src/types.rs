//! Core data types for the catalog search layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Name of a catalog collection, e.g. `"spells"` or `"monsters"`.
///
/// Endpoint names come from a fixed, externally owned set (see
/// [`EndpointRegistry`](crate::source::EndpointRegistry)); the search core
/// never invents or mutates them.
pub type Endpoint = String;

/// Number of cached items per endpoint, for endpoints currently in the cache.
pub type CacheStats = BTreeMap<Endpoint, usize>;

/// A single catalog entry as listed by an endpoint.
///
/// Items are immutable once fetched. The cache owns them behind an `Arc` and
/// every [`Hit`] that references an item shares that same allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  /// Stable identifier, unique within its endpoint.
  #[serde(default)]
  pub index: String,
  /// Human-readable display name. Empty when upstream omits it.
  #[serde(default)]
  pub name: String,
  /// Upstream locator of the full detail record. Opaque to the search core.
  #[serde(default)]
  pub url: String,
}

impl Item {
  /// Creates an item from its three fields.
  pub fn new(index: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
    Self {
      index: index.into(),
      name: name.into(),
      url: url.into(),
    }
  }
}

/// The list response of an endpoint: upstream count plus the items in
/// upstream order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemList {
  #[serde(default)]
  pub count: usize,
  #[serde(default)]
  pub results: Vec<Item>,
}

/// Which field of an item satisfied the containment test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedField {
  Name,
  Index,
}

impl MatchedField {
  /// The wire tag of the field, `"name"` or `"index"`.
  pub fn as_str(&self) -> &'static str {
    match self {
      MatchedField::Name => "name",
      MatchedField::Index => "index",
    }
  }
}

impl fmt::Display for MatchedField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A scored match of a cached item against a query.
///
/// Hits are produced per search call and never retained by the engine.
#[derive(Debug, Clone, Serialize)]
pub struct Hit {
  /// The matched item, shared with the cache entry it came from.
  pub item: Arc<Item>,
  /// The field that satisfied the containment test.
  pub matched_field: MatchedField,
  /// Relevance in `[0, 1]`; higher is better.
  pub relevance_score: f32,
  /// The collection the item belongs to.
  pub endpoint: Endpoint,
}
