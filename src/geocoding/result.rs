use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A geocoded location: longitude `X`, latitude `Y` and a display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "X")]
    x: f64,
    #[serde(rename = "Y")]
    y: f64,
    #[serde(rename = "Label")]
    label: String,
}

impl SearchResult {
    pub fn new(x: f64, y: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            label: label.into(),
        }
    }

    /// Longitude
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Latitude
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.y, self.x)
    }
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.lat_lng())
    }
}

/// What a finished search amounts to for the control
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(SearchResult),
    NotFound,
}

impl SearchOutcome {
    /// Results are ordered best match first; only the head is ever used
    pub fn from_results(results: Vec<SearchResult>) -> Self {
        match results.into_iter().next() {
            Some(best) => Self::Found(best),
            None => Self::NotFound,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl From<Vec<SearchResult>> for SearchOutcome {
    fn from(results: Vec<SearchResult>) -> Self {
        Self::from_results(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_swaps_axes() {
        let result = SearchResult::new(2.35, 48.85, "Paris, France");
        assert_eq!(result.lat_lng(), LatLng::new(48.85, 2.35));
    }

    #[test]
    fn test_outcome_takes_first_result() {
        let outcome = SearchOutcome::from_results(vec![
            SearchResult::new(2.35, 48.85, "Paris, France"),
            SearchResult::new(-95.55, 33.66, "Paris, Texas"),
        ]);
        assert_eq!(
            outcome,
            SearchOutcome::Found(SearchResult::new(2.35, 48.85, "Paris, France"))
        );
        assert_eq!(SearchOutcome::from_results(Vec::new()), SearchOutcome::NotFound);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(SearchResult::new(1.5, -2.5, "X")).unwrap();
        assert_eq!(json, serde_json::json!({"X": 1.5, "Y": -2.5, "Label": "X"}));
    }
}
