//! Item sources and endpoint registries for the upstream catalog.

pub mod adapter;
#[cfg(feature = "http")]
pub mod http;
pub mod registry;

pub use adapter::{EndpointRegistry, ItemSource};
#[cfg(feature = "http")]
pub use http::HttpItemSource;
pub use registry::StaticRegistry;
