use super::{build_url, decode};
use crate::{
    geocoding::{provider::UrlTemplateProvider, result::SearchResult},
    Result,
};
use serde::Deserialize;

const ARCGIS_FIND_URL: &str =
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/find";

/// ArcGIS World Geocoding Service, `find` operation
#[derive(Debug, Clone)]
pub struct EsriProvider {
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    locations: Vec<FindLocation>,
}

#[derive(Debug, Deserialize)]
struct FindLocation {
    name: String,
    feature: Feature,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    x: f64,
    y: f64,
}

impl EsriProvider {
    pub fn new() -> Self {
        Self {
            base_url: ARCGIS_FIND_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for EsriProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlTemplateProvider for EsriProvider {
    fn name(&self) -> &str {
        "Esri"
    }

    fn build_query_url(&self, query: &str) -> Result<String> {
        build_url(&self.base_url, &[("text", query), ("f", "pjson")])
    }

    fn parse_response(&self, body: serde_json::Value) -> Result<Vec<SearchResult>> {
        let response: FindResponse = decode(self.name(), body)?;
        Ok(response
            .locations
            .into_iter()
            .map(|l| SearchResult::new(l.feature.geometry.x, l.feature.geometry.y, l.name))
            .collect())
    }
}
