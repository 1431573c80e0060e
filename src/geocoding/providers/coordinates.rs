use crate::{
    core::geo::LatLng,
    geocoding::{provider::Resolver, result::SearchResult},
    Result,
};
use async_trait::async_trait;

/// Resolves typed coordinates such as `48.8566, 2.3522` or `48.8566 2.3522`.
///
/// Longitudes outside [-180, 180] are wrapped; latitudes outside [-90, 90]
/// are not a location and yield no result.
#[derive(Debug, Clone, Default)]
pub struct CoordinateResolver;

impl CoordinateResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, query: &str) -> Option<LatLng> {
        let mut parts = query
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|p| !p.is_empty());

        let lat = parts.next()?.parse::<f64>().ok()?;
        let lng = parts.next()?.parse::<f64>().ok()?;
        if parts.next().is_some() || !lat.is_finite() || !lng.is_finite() {
            return None;
        }

        let position = LatLng::new(lat, LatLng::wrap_lng(lng));
        position.is_valid().then_some(position)
    }
}

#[async_trait]
impl Resolver for CoordinateResolver {
    fn name(&self) -> &str {
        "Coordinates"
    }

    async fn locate(&self, query: &str) -> Result<Vec<SearchResult>> {
        Ok(self
            .parse(query)
            .map(|p| SearchResult::new(p.lng, p.lat, format!("{:.5}, {:.5}", p.lat, p.lng)))
            .into_iter()
            .collect())
    }
}
