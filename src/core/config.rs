//! Configuration for the geosearch control
//!
//! A [`GeoSearchConfig`] is assembled once, either through its builder methods
//! or from serialized [`GeoSearchOptions`], and is frozen when the control is
//! constructed.

use crate::{
    core::constants::{
        DEFAULT_NOT_FOUND_MESSAGE, DEFAULT_SEARCH_LABEL, DEFAULT_SHOW_MARKER,
        DEFAULT_ZOOM_LEVEL, MAX_ZOOM_LEVEL,
    },
    geocoding::provider::{Provider, ProviderConfig},
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// Map corner the control is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Frozen options of a search control
#[derive(Debug, Clone)]
pub struct GeoSearchConfig {
    pub provider: Provider,
    pub search_label: String,
    pub not_found_message: String,
    pub zoom_level: u32,
    pub show_marker: bool,
    pub position: ControlPosition,
    /// Drop completions of searches superseded by a newer submit
    pub ignore_stale_results: bool,
}

impl GeoSearchConfig {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            search_label: DEFAULT_SEARCH_LABEL.to_string(),
            not_found_message: DEFAULT_NOT_FOUND_MESSAGE.to_string(),
            zoom_level: DEFAULT_ZOOM_LEVEL,
            show_marker: DEFAULT_SHOW_MARKER,
            position: ControlPosition::default(),
            ignore_stale_results: false,
        }
    }

    pub fn search_label(mut self, label: impl Into<String>) -> Self {
        self.search_label = label.into();
        self
    }

    pub fn not_found_message(mut self, message: impl Into<String>) -> Self {
        self.not_found_message = message.into();
        self
    }

    /// Zoom level used when showing a result, clamped to the tile zoom range
    pub fn zoom_level(mut self, zoom: u32) -> Self {
        self.zoom_level = zoom.min(MAX_ZOOM_LEVEL);
        self
    }

    pub fn show_marker(mut self, show: bool) -> Self {
        self.show_marker = show;
        self
    }

    pub fn position(mut self, position: ControlPosition) -> Self {
        self.position = position;
        self
    }

    pub fn ignore_stale_results(mut self, ignore: bool) -> Self {
        self.ignore_stale_results = ignore;
        self
    }

    /// Build a configuration from deserialized options.
    ///
    /// Empty labels and a zero zoom level fall back to the defaults, matching
    /// how the options object of the Leaflet control was read.
    pub fn from_options(options: GeoSearchOptions) -> Result<Self> {
        let provider = options
            .provider
            .ok_or_else(|| Error::Config("a geocoding provider is required".to_string()))?
            .build()?;

        let mut config = Self::new(provider);
        if let Some(label) = options.search_label.filter(|l| !l.is_empty()) {
            config = config.search_label(label);
        }
        if let Some(message) = options.not_found_message.filter(|m| !m.is_empty()) {
            config = config.not_found_message(message);
        }
        if let Some(zoom) = options.zoom_level.filter(|z| *z > 0) {
            if zoom > MAX_ZOOM_LEVEL {
                return Err(Error::Config(format!(
                    "zoomLevel {} exceeds the maximum of {}",
                    zoom, MAX_ZOOM_LEVEL
                )));
            }
            config = config.zoom_level(zoom);
        }
        if let Some(show) = options.show_marker {
            config = config.show_marker(show);
        }
        if let Some(position) = options.position {
            config = config.position(position);
        }
        if let Some(ignore) = options.ignore_stale_results {
            config = config.ignore_stale_results(ignore);
        }
        Ok(config)
    }

    /// Parse a JSON options object, e.g. `{"provider": {"type": "openstreetmap"}, "zoomLevel": 10}`
    pub fn from_json(json: &str) -> Result<Self> {
        let options: GeoSearchOptions = serde_json::from_str(json)?;
        Self::from_options(options)
    }
}

/// Serializable control options; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoSearchOptions {
    pub provider: Option<ProviderConfig>,
    pub search_label: Option<String>,
    pub not_found_message: Option<String>,
    pub zoom_level: Option<u32>,
    pub show_marker: Option<bool>,
    pub position: Option<ControlPosition>,
    pub ignore_stale_results: Option<bool>,
}
