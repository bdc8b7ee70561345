//! HTTP-backed item source using a blocking reqwest client.

use crate::config::Settings;
use crate::error::SourceError;
use crate::source::adapter::{EndpointRegistry, ItemSource};
use crate::types::ItemList;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Fetches item lists and detail records from the upstream REST API.
///
/// Endpoint names are checked against the registry before any request is
/// made, so an unknown collection never reaches the network.
pub struct HttpItemSource {
  client: reqwest::blocking::Client,
  base_url: String,
  registry: Arc<dyn EndpointRegistry>,
}

impl HttpItemSource {
  /// Creates a source for `base_url` with the given request timeout.
  pub fn new(
    base_url: impl Into<String>,
    timeout: Duration,
    user_agent: &str,
    registry: Arc<dyn EndpointRegistry>,
  ) -> Result<Self, SourceError> {
    let client = reqwest::blocking::Client::builder()
      .timeout(timeout)
      .user_agent(user_agent)
      .build()
      .map_err(|e| SourceError::Transport(e.to_string()))?;

    Ok(Self {
      client,
      base_url: base_url.into().trim_end_matches('/').to_string(),
      registry,
    })
  }

  /// Creates a source from loaded settings.
  pub fn from_settings(
    settings: &Settings,
    registry: Arc<dyn EndpointRegistry>,
  ) -> Result<Self, SourceError> {
    Self::new(
      settings.base_url.clone(),
      Duration::from_secs(settings.timeout_secs),
      &settings.user_agent,
      registry,
    )
  }

  /// The base URL every request is built from.
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn list_url(&self, endpoint: &str) -> String {
    format!("{}/{}", self.base_url, endpoint)
  }

  fn item_url(&self, endpoint: &str, index: &str) -> String {
    format!("{}/{}/{}", self.base_url, endpoint, index)
  }

  fn check_endpoint(&self, endpoint: &str) -> Result<(), SourceError> {
    if self.registry.is_valid(endpoint) {
      Ok(())
    } else {
      Err(SourceError::InvalidEndpoint(endpoint.to_string()))
    }
  }

  fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
    tracing::debug!(url, "GET");

    let response = self
      .client
      .get(url)
      .send()
      .map_err(|e| transport_error(url, e))?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
      return Err(SourceError::Status {
        url: url.to_string(),
        status: status.as_u16(),
      });
    }

    let body = response.text().map_err(|e| transport_error(url, e))?;
    serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))
  }
}

fn transport_error(url: &str, err: reqwest::Error) -> SourceError {
  if err.is_timeout() {
    SourceError::Timeout {
      url: url.to_string(),
    }
  } else {
    SourceError::Transport(err.to_string())
  }
}

impl ItemSource for HttpItemSource {
  fn list_items(&self, endpoint: &str) -> Result<ItemList, SourceError> {
    self.check_endpoint(endpoint)?;
    self.get_json(&self.list_url(endpoint))
  }

  fn get_item_detail(&self, endpoint: &str, index: &str) -> Result<serde_json::Value, SourceError> {
    self.check_endpoint(endpoint)?;
    self.get_json(&self.item_url(endpoint, index))
  }
}
