use super::{build_url, decode};
use crate::{
    geocoding::{provider::UrlTemplateProvider, result::SearchResult},
    Error, Result,
};
use serde::Deserialize;

const LOCATIONS_URL: &str = "https://dev.virtualearth.net/REST/v1/Locations";

/// Bing Maps Locations API
#[derive(Debug, Clone)]
pub struct BingProvider {
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationsResponse {
    #[serde(default)]
    resource_sets: Vec<ResourceSet>,
}

#[derive(Debug, Deserialize)]
struct ResourceSet {
    #[serde(default)]
    resources: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
struct Resource {
    name: String,
    point: BingPoint,
}

#[derive(Debug, Deserialize)]
struct BingPoint {
    /// `[lat, lng]`
    coordinates: Vec<f64>,
}

impl BingProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: LOCATIONS_URL.to_string(),
            api_key: api_key.into(),
        }
    }
}

impl UrlTemplateProvider for BingProvider {
    fn name(&self) -> &str {
        "Bing"
    }

    fn build_query_url(&self, query: &str) -> Result<String> {
        build_url(&self.base_url, &[("query", query), ("key", &self.api_key)])
    }

    fn parse_response(&self, body: serde_json::Value) -> Result<Vec<SearchResult>> {
        let response: LocationsResponse = decode(self.name(), body)?;
        let Some(set) = response.resource_sets.into_iter().next() else {
            return Ok(Vec::new());
        };

        set.resources
            .into_iter()
            .map(|r| match r.point.coordinates.as_slice() {
                [lat, lng] => Ok(SearchResult::new(*lng, *lat, r.name)),
                other => Err(Error::Parse(format!(
                    "bing point needs [lat, lng], got {} values",
                    other.len()
                ))),
            })
            .collect()
    }
}
