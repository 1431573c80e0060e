use super::{build_url, decode};
use crate::{
    geocoding::{provider::UrlTemplateProvider, result::SearchResult},
    Error, Result,
};
use serde::Deserialize;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Google Geocoding API
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

impl GoogleProvider {
    pub fn new() -> Self {
        Self {
            base_url: GEOCODE_URL.to_string(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl Default for GoogleProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlTemplateProvider for GoogleProvider {
    fn name(&self) -> &str {
        "Google"
    }

    fn build_query_url(&self, query: &str) -> Result<String> {
        match &self.api_key {
            Some(key) => build_url(&self.base_url, &[("address", query), ("key", key)]),
            None => build_url(&self.base_url, &[("address", query)]),
        }
    }

    fn parse_response(&self, body: serde_json::Value) -> Result<Vec<SearchResult>> {
        let response: GeocodeResponse = decode(self.name(), body)?;
        match response.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(response
                .results
                .into_iter()
                .map(|r| {
                    SearchResult::new(
                        r.geometry.location.lng,
                        r.geometry.location.lat,
                        r.formatted_address,
                    )
                })
                .collect()),
            status => Err(Error::Provider(format!(
                "google geocoder answered {}{}",
                status,
                response
                    .error_message
                    .map(|m| format!(": {}", m))
                    .unwrap_or_default()
            ))),
        }
    }
}
