//! Defines the `ItemSource` and `EndpointRegistry` traits for pluggable
//! upstream backends.

use crate::error::SourceError;
use crate::types::{Endpoint, ItemList};

/// A trait for backends that can list and fetch catalog items.
///
/// `ItemSource` abstracts the upstream reference-data API so the search
/// engine can be driven by an HTTP client in production and by an in-memory
/// double in tests.
///
/// The `Send` and `Sync` bounds are required to allow the source to be
/// shared across threads.
pub trait ItemSource: Send + Sync {
  /// Fetches the item list of an endpoint.
  ///
  /// # Arguments
  ///
  /// * `endpoint` - The collection name, e.g. `"spells"`.
  ///
  /// # Returns
  ///
  /// The upstream count and the items in upstream order, or a
  /// `SourceError` on transport or parse failure.
  fn list_items(&self, endpoint: &str) -> Result<ItemList, SourceError>;

  /// Fetches the full detail record of one item.
  ///
  /// # Arguments
  ///
  /// * `endpoint` - The collection name.
  /// * `index` - The item's index within that collection.
  ///
  /// # Returns
  ///
  /// The raw structured record as returned by upstream.
  fn get_item_detail(&self, endpoint: &str, index: &str) -> Result<serde_json::Value, SourceError>;
}

/// The fixed set of valid endpoint names.
pub trait EndpointRegistry: Send + Sync {
  /// All endpoint names, in a stable order.
  fn all_endpoints(&self) -> Vec<Endpoint>;

  /// Whether `endpoint` names a known collection.
  fn is_valid(&self, endpoint: &str) -> bool;
}
