//! Control defaults carried over from the Leaflet geosearch control.
//! Keeping them in a single place makes it easier to tweak plugin-wide defaults.

/// Placeholder and button title of the search box.
pub const DEFAULT_SEARCH_LABEL: &str = "Enter address";

/// Message shown when a search yields nothing or fails.
pub const DEFAULT_NOT_FOUND_MESSAGE: &str = "Sorry, that address could not be found.";

/// Zoom level the map is set to when a result is shown.
pub const DEFAULT_ZOOM_LEVEL: u32 = 17;

/// Whether a position marker is dropped on the result.
pub const DEFAULT_SHOW_MARKER: bool = true;

/// Highest zoom level a tile map can display.
pub const MAX_ZOOM_LEVEL: u32 = 22;

/// Plugin name used when registering the control with a map.
pub const PLUGIN_NAME: &str = "geosearch";

/// User agent sent with geocoding requests.
pub const USER_AGENT: &str = "maplet-geosearch/0.1.0";

/// Transport timeout of the shared HTTP client, in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;
