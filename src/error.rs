//! Error types for the item source, the query gateway and configuration.
//!
//! The search core itself has no error type: upstream failures are absorbed
//! by the cache and surface as empty item lists.

use thiserror::Error;

/// Failure fetching from the upstream catalog.
#[derive(Debug, Error)]
pub enum SourceError {
  #[error("invalid endpoint: {0}")]
  InvalidEndpoint(String),

  #[error("request to {url} timed out")]
  Timeout { url: String },

  #[error("request to {url} returned HTTP {status}")]
  Status { url: String, status: u16 },

  #[error("transport error: {0}")]
  Transport(String),

  #[error("failed to parse response: {0}")]
  Parse(String),
}

/// Coarse classification of a gateway failure, for transports that need to
/// map faults onto protocol status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
  InvalidArgument,
  Internal,
}

/// Failure of a gateway operation.
#[derive(Debug, Error)]
pub enum GatewayError {
  #[error("invalid endpoint: {0}")]
  InvalidEndpoint(String),

  #[error("search query cannot be empty")]
  EmptyQuery,

  #[error("upstream request failed: {0}")]
  Upstream(#[from] SourceError),
}

impl GatewayError {
  /// The status class a transport should report for this error.
  pub fn code(&self) -> StatusCode {
    match self {
      GatewayError::InvalidEndpoint(_) | GatewayError::EmptyQuery => StatusCode::InvalidArgument,
      GatewayError::Upstream(SourceError::InvalidEndpoint(_)) => StatusCode::InvalidArgument,
      GatewayError::Upstream(_) => StatusCode::Internal,
    }
  }
}

/// Failure loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error(transparent)]
  Figment(#[from] Box<figment::Error>),

  #[error("invalid configuration: {0}")]
  Invalid(String),
}

impl From<figment::Error> for ConfigError {
  fn from(err: figment::Error) -> Self {
    ConfigError::Figment(Box::new(err))
  }
}
