//! Prelude module for common maplet-geosearch types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use maplet_geosearch::prelude::*;`

pub use crate::core::{
    config::{ControlPosition, GeoSearchConfig, GeoSearchOptions},
    geo::LatLng,
    map::{HeadlessMap, MapHost, MarkerId},
};

pub use crate::geocoding::{
    fetch::{HttpFetch, ReqwestFetcher},
    provider::{resolve, Provider, ProviderConfig, Resolver, UrlTemplateProvider},
    providers::{
        BingProvider, CoordinateResolver, EsriProvider, Gazetteer, GoogleProvider,
        OpenStreetMapProvider,
    },
    result::{SearchOutcome, SearchResult},
};

pub use crate::plugins::{
    base::PluginTrait,
    geosearch::{Activity, ControlState, SearchControl},
};

pub use crate::input::events::{EventHandled, InputEvent, KeyCode, KeyModifiers, MapEvent};

pub use crate::runtime::{init_runtime, runtime, spawn, AsyncHandle, AsyncSpawner};

pub use crate::ui::view::{ControlIcon, ControlRenderer, ControlView, TextRenderer};

#[cfg(feature = "egui")]
pub use crate::ui::egui_control::SearchBox;

pub use crate::{Error as GeoSearchError, Result};

pub use std::{
    pin::Pin,
    sync::Arc,
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub use futures::Future;
