//! Compendium - a caching search layer over a tabletop ruleset catalog.
//!
//! The catalog is organised into named collections ("endpoints") such as
//! `spells` or `monsters`. Compendium fetches each endpoint's item list once,
//! keeps it in memory, and answers substring searches across one or many
//! endpoints with a simple tiered relevance score.

pub mod types;
pub mod error;
pub mod scorer;
pub mod source;
pub mod cache;
pub mod engine;
pub mod gateway;
pub mod config;

pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::types::*;
    pub use crate::error::*;
    pub use crate::source::*;
    pub use crate::cache::*;
    pub use crate::engine::*;
    pub use crate::gateway::QueryGateway;
    pub use crate::config::Settings;
}
