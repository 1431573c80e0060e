pub mod config;
pub mod constants;
pub mod geo;
pub mod map;

pub use config::{ControlPosition, GeoSearchConfig, GeoSearchOptions};
pub use geo::LatLng;
pub use map::{HeadlessMap, MapHost, MarkerId};
