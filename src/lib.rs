//! # maplet-geosearch
//!
//! An address search control for maplet maps.
//!
//! The control overlays a collapsible search box on a map, resolves the typed
//! text to coordinates through a pluggable geocoding [`Provider`], and
//! recenters the map (optionally dropping a marker) at the best match.

pub mod core;
pub mod geocoding;
pub mod input;
pub mod plugins;
pub mod prelude;
pub mod runtime;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{ControlPosition, GeoSearchConfig, GeoSearchOptions},
    geo::LatLng,
    map::{HeadlessMap, MapHost, MarkerId},
};

pub use crate::geocoding::{
    fetch::{HttpFetch, ReqwestFetcher},
    provider::{resolve, Provider, ProviderConfig, Resolver, UrlTemplateProvider},
    result::{SearchOutcome, SearchResult},
};

pub use crate::input::events::{EventHandled, InputEvent, KeyCode, KeyModifiers, MapEvent};

pub use crate::plugins::{
    base::PluginTrait,
    geosearch::{Activity, ControlState, SearchControl},
};

pub use crate::ui::view::{ControlIcon, ControlRenderer, ControlView, TextRenderer};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum GeoSearchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Map host error: {0}")]
    Host(String),
}

/// Error type alias for convenience
pub type Error = GeoSearchError;

/// Install `env_logger` as the `log` backend. Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
