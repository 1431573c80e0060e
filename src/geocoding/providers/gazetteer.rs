use crate::{
    geocoding::{provider::Resolver, result::SearchResult},
    Result,
};
use async_trait::async_trait;

/// An in-memory list of named places.
///
/// Matching ignores case. Exact label matches rank first, then labels starting
/// with the query, then labels containing it; ties keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    places: Vec<SearchResult>,
    max_results: Option<usize>,
}

impl Gazetteer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, place: SearchResult) -> Self {
        self.places.push(place);
        self
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    pub fn insert(&mut self, place: SearchResult) {
        self.places.push(place);
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn lookup(&self, query: &str) -> Vec<SearchResult> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<(u8, &SearchResult)> = self
            .places
            .iter()
            .filter_map(|place| {
                let label = place.label().to_lowercase();
                if label == needle {
                    Some((0, place))
                } else if label.starts_with(&needle) {
                    Some((1, place))
                } else if label.contains(&needle) {
                    Some((2, place))
                } else {
                    None
                }
            })
            .collect();
        // stable, so insertion order survives within a rank
        ranked.sort_by_key(|(rank, _)| *rank);

        let limit = self.max_results.unwrap_or(usize::MAX);
        ranked.into_iter().take(limit).map(|(_, p)| p.clone()).collect()
    }
}

impl FromIterator<SearchResult> for Gazetteer {
    fn from_iter<I: IntoIterator<Item = SearchResult>>(iter: I) -> Self {
        Self {
            places: iter.into_iter().collect(),
            max_results: None,
        }
    }
}

#[async_trait]
impl Resolver for Gazetteer {
    fn name(&self) -> &str {
        "Gazetteer"
    }

    async fn locate(&self, query: &str) -> Result<Vec<SearchResult>> {
        Ok(self.lookup(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn places() -> Gazetteer {
        [
            SearchResult::new(-95.555, 33.661, "Paris, Texas"),
            SearchResult::new(2.35, 48.85, "Paris"),
            SearchResult::new(-0.12, 51.50, "London"),
            SearchResult::new(2.29, 48.86, "Eiffel Tower, Paris"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_ranking() {
        let labels: Vec<String> = places()
            .lookup("paris")
            .iter()
            .map(|r| r.label().to_string())
            .collect();
        assert_eq!(labels, vec!["Paris", "Paris, Texas", "Eiffel Tower, Paris"]);
    }

    #[test]
    fn test_limit_and_blank() {
        let gazetteer = places().with_max_results(1);
        assert_eq!(gazetteer.lookup("PARIS").len(), 1);
        assert!(gazetteer.lookup("   ").is_empty());
        assert!(gazetteer.lookup("Berlin").is_empty());
    }
}
