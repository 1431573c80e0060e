//! Stock geocoding providers

pub mod bing;
pub mod coordinates;
pub mod esri;
pub mod gazetteer;
pub mod google;
pub mod openstreetmap;

pub use bing::BingProvider;
pub use coordinates::CoordinateResolver;
pub use esri::EsriProvider;
pub use gazetteer::Gazetteer;
pub use google::GoogleProvider;
pub use openstreetmap::OpenStreetMapProvider;

use crate::{Error, Result};
use serde::de::DeserializeOwned;

/// Decode a response body into the provider's payload type
pub(crate) fn decode<T: DeserializeOwned>(provider: &str, body: serde_json::Value) -> Result<T> {
    serde_json::from_value(body)
        .map_err(|e| Error::Parse(format!("unexpected {} response: {}", provider, e)))
}

/// Append query parameters to `base`, percent-encoding them
pub(crate) fn build_url(base: &str, params: &[(&str, &str)]) -> Result<String> {
    reqwest::Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|e| Error::Config(format!("invalid geocoder url {}: {}", base, e)))
}

/// Some services send coordinates as strings
pub(crate) fn parse_degrees(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::Parse(format!("not a coordinate: {:?}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_query() {
        let url = build_url("https://example.com/search", &[("q", "Rue de Rivoli & Co")]).unwrap();
        assert_eq!(url, "https://example.com/search?q=Rue+de+Rivoli+%26+Co");
    }

    #[test]
    fn test_build_url_rejects_bad_base() {
        assert!(matches!(build_url("not a url", &[]), Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_degrees() {
        assert_eq!(parse_degrees(" 48.85 ").unwrap(), 48.85);
        assert!(matches!(parse_degrees("north"), Err(Error::Parse(_))));
    }
}
