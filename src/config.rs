//! Layered settings loader.
//!
//! Uses Figment to merge built-in defaults, an optional `compendium.toml`
//! and `COMPENDIUM_*` environment variables, in that order.

use crate::error::ConfigError;
use crate::source::StaticRegistry;
use crate::types::Endpoint;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default upstream catalog location.
pub const DEFAULT_BASE_URL: &str = "https://www.dnd5eapi.co/api/2014";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("compendium/", env!("CARGO_PKG_VERSION"));

/// Default result cap for searches that do not name one.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Settings file read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "compendium.toml";

/// Prefix of the environment variables that override file settings.
pub const ENV_PREFIX: &str = "COMPENDIUM_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub default_max_results: usize,
    /// Endpoints to warm when preloading. Empty means every endpoint.
    pub preload: Vec<Endpoint>,
    pub preload_on_start: bool,
    /// Replaces the built-in endpoint list when set.
    pub endpoints: Option<Vec<Endpoint>>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_max_results: DEFAULT_MAX_RESULTS,
            preload: Vec::new(),
            preload_on_start: false,
            endpoints: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// The provider stack: defaults, then the TOML file, then the environment.
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load and validate settings. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(path))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let settings: Settings = figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".into()));
        }
        if let Some(endpoints) = &self.endpoints {
            if endpoints.is_empty() {
                return Err(ConfigError::Invalid("endpoints override must not be empty".into()));
            }
        }
        Ok(())
    }

    /// The endpoint registry these settings describe.
    pub fn registry(&self) -> StaticRegistry {
        match &self.endpoints {
            Some(endpoints) => StaticRegistry::new(endpoints.iter().cloned()),
            None => StaticRegistry::default(),
        }
    }
}
