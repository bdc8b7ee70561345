//! Transport-agnostic query service.
//!
//! The gateway is what an RPC or HTTP layer binds to. It validates requests
//! against the endpoint registry, forwards searches to the [`SearchEngine`]
//! and answers list and item lookups straight from the [`ItemSource`],
//! bypassing the cache.

pub mod types;

pub use types::*;

use crate::config::DEFAULT_MAX_RESULTS;
use crate::engine::SearchEngine;
use crate::error::GatewayError;
use crate::source::{EndpointRegistry, ItemSource};
use crate::types::Item;
use std::sync::Arc;

pub struct QueryGateway {
  engine: SearchEngine,
  source: Arc<dyn ItemSource>,
  registry: Arc<dyn EndpointRegistry>,
  default_max_results: usize,
}

impl QueryGateway {
  /// Creates a gateway, and the search engine behind it, over one source.
  pub fn new(source: Arc<dyn ItemSource>, registry: Arc<dyn EndpointRegistry>) -> Self {
    let engine = SearchEngine::builder(Arc::clone(&source))
      .registry(Arc::clone(&registry))
      .build();
    Self {
      engine,
      source,
      registry,
      default_max_results: DEFAULT_MAX_RESULTS,
    }
  }

  /// Sets the result cap used when a search request names none.
  pub fn with_default_max_results(mut self, max_results: usize) -> Self {
    self.default_max_results = max_results;
    self
  }

  pub fn engine(&self) -> &SearchEngine {
    &self.engine
  }

  fn check_endpoint(&self, endpoint: &str) -> Result<(), GatewayError> {
    if self.registry.is_valid(endpoint) {
      Ok(())
    } else {
      Err(GatewayError::InvalidEndpoint(endpoint.to_string()))
    }
  }

  pub fn endpoints(&self) -> EndpointsResponse {
    let endpoints = self.registry.all_endpoints();
    EndpointsResponse {
      total_count: endpoints.len(),
      endpoints,
    }
  }

  /// Returns one page of an endpoint's items, fetched fresh from upstream.
  ///
  /// The page covers `[page * page_size, page * page_size + page_size)`,
  /// clipped to the list; a page past the end is empty.
  pub fn list(&self, request: &ListRequest) -> Result<ListResponse, GatewayError> {
    self.check_endpoint(&request.endpoint)?;
    let list = self.source.list_items(&request.endpoint)?;

    let len = list.results.len();
    let start = request.page.saturating_mul(request.page_size).min(len);
    let end = start.saturating_add(request.page_size).min(len);

    Ok(ListResponse {
      endpoint: request.endpoint.clone(),
      total_count: list.count,
      page: request.page,
      page_size: request.page_size,
      has_more: end < len,
      items: list.results[start..end].to_vec(),
    })
  }

  /// Fetches one item's full record.
  pub fn item(&self, request: &ItemRequest) -> Result<ItemResponse, GatewayError> {
    self.check_endpoint(&request.endpoint)?;
    let record = self
      .source
      .get_item_detail(&request.endpoint, &request.index)?;

    let text_field = |key: &str| {
      record
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
    };

    Ok(ItemResponse {
      item: Item::new(request.index.clone(), text_field("name"), text_field("url")),
      raw_data: record.to_string(),
    })
  }

  /// Runs a search after rejecting empty queries and unknown endpoints.
  pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse, GatewayError> {
    if request.query.is_empty() {
      return Err(GatewayError::EmptyQuery);
    }
    for endpoint in &request.endpoints {
      self.check_endpoint(endpoint)?;
    }

    let max_results = request.max_results.unwrap_or(self.default_max_results);
    let results = self
      .engine
      .search(&request.query, &request.endpoints, max_results);

    Ok(SearchResponse {
      query: request.query.clone(),
      total_found: results.len(),
      results,
    })
  }

  /// Reports serving as long as there is at least one endpoint to serve.
  pub fn health(&self) -> HealthResponse {
    let (status, message) = if self.registry.all_endpoints().is_empty() {
      (ServingStatus::NotServing, "no endpoints available")
    } else {
      (ServingStatus::Serving, "server is healthy")
    };
    HealthResponse {
      status,
      message: message.to_string(),
      timestamp_ms: chrono::Utc::now().timestamp_millis(),
    }
  }
}
