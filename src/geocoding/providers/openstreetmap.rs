use super::{build_url, decode, parse_degrees};
use crate::{
    geocoding::{provider::UrlTemplateProvider, result::SearchResult},
    Result,
};
use serde::Deserialize;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// OpenStreetMap Nominatim search
#[derive(Debug, Clone)]
pub struct OpenStreetMapProvider {
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

impl OpenStreetMapProvider {
    pub fn new() -> Self {
        Self {
            base_url: NOMINATIM_URL.to_string(),
        }
    }

    /// Point at a self-hosted Nominatim instance
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for OpenStreetMapProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlTemplateProvider for OpenStreetMapProvider {
    fn name(&self) -> &str {
        "OpenStreetMap"
    }

    fn build_query_url(&self, query: &str) -> Result<String> {
        build_url(&self.base_url, &[("format", "json"), ("q", query)])
    }

    fn parse_response(&self, body: serde_json::Value) -> Result<Vec<SearchResult>> {
        let places: Vec<NominatimPlace> = decode(self.name(), body)?;
        places
            .into_iter()
            .map(|place| {
                Ok(SearchResult::new(
                    parse_degrees(&place.lon)?,
                    parse_degrees(&place.lat)?,
                    place.display_name,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    #[test]
    fn test_query_url() {
        let url = OpenStreetMapProvider::new().build_query_url("New York").unwrap();
        assert_eq!(
            url,
            "https://nominatim.openstreetmap.org/search?format=json&q=New+York"
        );

        let url = OpenStreetMapProvider::new()
            .with_base_url("http://localhost:8080/search")
            .build_query_url("x")
            .unwrap();
        assert!(url.starts_with("http://localhost:8080/search?"));
    }

    #[test]
    fn test_parse_keeps_order() {
        let body = json!([
            {"lat": "48.8566969", "lon": "2.3514616", "display_name": "Paris, Île-de-France, France", "importance": 0.9},
            {"lat": "33.6617962", "lon": "-95.555513", "display_name": "Paris, Lamar County, Texas"}
        ]);
        let results = OpenStreetMapProvider::new().parse_response(body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label(), "Paris, Île-de-France, France");
        assert_eq!(results[0].x(), 2.3514616);
        assert_eq!(results[0].y(), 48.8566969);
        assert_eq!(results[1].x(), -95.555513);
    }

    #[test]
    fn test_parse_empty_and_malformed() {
        let provider = OpenStreetMapProvider::new();
        assert!(provider.parse_response(json!([])).unwrap().is_empty());
        assert!(matches!(
            provider.parse_response(json!({"error": "Unable to geocode"})),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            provider.parse_response(json!([{"lat": "n/a", "lon": "2", "display_name": "?"}])),
            Err(Error::Parse(_))
        ));
    }
}
