//! Request and response types for the query gateway.

use crate::types::{Endpoint, Hit, Item};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsResponse {
  pub endpoints: Vec<Endpoint>,
  pub total_count: usize,
}

/// One page of an endpoint's item list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRequest {
  pub endpoint: Endpoint,
  #[serde(default)]
  pub page: usize,
  #[serde(default = "default_page_size")]
  pub page_size: usize,
}

fn default_page_size() -> usize {
  20
}

impl ListRequest {
  pub fn new(endpoint: impl Into<Endpoint>) -> Self {
    Self {
      endpoint: endpoint.into(),
      page: 0,
      page_size: default_page_size(),
    }
  }

  pub fn page(mut self, page: usize) -> Self {
    self.page = page;
    self
  }

  pub fn page_size(mut self, page_size: usize) -> Self {
    self.page_size = page_size;
    self
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
  pub endpoint: Endpoint,
  pub items: Vec<Item>,
  /// The count reported by upstream, not the page length.
  pub total_count: usize,
  pub page: usize,
  pub page_size: usize,
  pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRequest {
  pub endpoint: Endpoint,
  pub index: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
  pub item: Item,
  /// The upstream detail record as compact JSON text.
  pub raw_data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
  pub query: String,
  /// Endpoints to search. Empty means all of them.
  #[serde(default)]
  pub endpoints: Vec<Endpoint>,
  /// Result cap. Falls back to the gateway's configured default.
  #[serde(default)]
  pub max_results: Option<usize>,
}

impl SearchRequest {
  pub fn new(query: impl Into<String>) -> Self {
    Self {
      query: query.into(),
      endpoints: Vec::new(),
      max_results: None,
    }
  }

  pub fn endpoints<I, S>(mut self, endpoints: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<Endpoint>,
  {
    self.endpoints = endpoints.into_iter().map(Into::into).collect();
    self
  }

  pub fn max_results(mut self, max_results: usize) -> Self {
    self.max_results = Some(max_results);
    self
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
  pub query: String,
  pub total_found: usize,
  pub results: Vec<Hit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServingStatus {
  Serving,
  NotServing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
  pub status: ServingStatus,
  pub message: String,
  /// Milliseconds since the Unix epoch.
  pub timestamp_ms: i64,
}
