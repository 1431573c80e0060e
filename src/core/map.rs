use crate::{core::geo::LatLng, prelude::HashMap, Error, Result};
use serde::{Deserialize, Serialize};

/// Handle to a marker owned by a [`MapHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

/// The map a control is attached to.
///
/// Controls only ever drive the map through this trait; rendering, tiles and
/// the marker's appearance stay with the host.
pub trait MapHost {
    /// Recenter the map at `center` and jump to `zoom` without animation
    fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()>;

    /// Add a marker at `position` and return its handle
    fn add_marker(&mut self, position: LatLng) -> Result<MarkerId>;

    /// Move an existing marker
    fn set_marker_position(&mut self, marker: MarkerId, position: LatLng) -> Result<()>;

    /// Remove a marker; removing an unknown marker is not an error
    fn remove_marker(&mut self, marker: MarkerId) -> Result<()>;
}

/// A map without any rendering surface.
///
/// Keeps the current view and the marker table, which is all a control needs.
/// Useful for server-side processing, command line tools and tests.
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    center: LatLng,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    markers: HashMap<MarkerId, LatLng>,
    next_marker_id: u64,
}

impl HeadlessMap {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            min_zoom: 0.0,
            max_zoom: crate::core::constants::MAX_ZOOM_LEVEL as f64,
            markers: HashMap::default(),
            next_marker_id: 1,
        }
    }

    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
        self
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn marker(&self, marker: MarkerId) -> Option<LatLng> {
        self.markers.get(&marker).copied()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerId, LatLng)> + '_ {
        self.markers.iter().map(|(id, pos)| (*id, *pos))
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new(LatLng::default(), 2.0)
    }
}

impl MapHost for HeadlessMap {
    fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        if !center.is_valid() {
            return Err(Error::InvalidCoordinates(format!(
                "cannot center map at {}",
                center
            )));
        }
        self.center = center;
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        log::debug!("map view set to {} at zoom {}", self.center, self.zoom);
        Ok(())
    }

    fn add_marker(&mut self, position: LatLng) -> Result<MarkerId> {
        let id = MarkerId(self.next_marker_id);
        self.next_marker_id += 1;
        self.markers.insert(id, position);
        log::debug!("marker {:?} added at {}", id, position);
        Ok(id)
    }

    fn set_marker_position(&mut self, marker: MarkerId, position: LatLng) -> Result<()> {
        match self.markers.get_mut(&marker) {
            Some(pos) => {
                *pos = position;
                Ok(())
            }
            None => Err(Error::Host(format!("unknown marker {:?}", marker))),
        }
    }

    fn remove_marker(&mut self, marker: MarkerId) -> Result<()> {
        self.markers.remove(&marker);
        Ok(())
    }
}
