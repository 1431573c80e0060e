use crate::{
    geocoding::{
        fetch::HttpFetch,
        providers::{
            BingProvider, CoordinateResolver, EsriProvider, GoogleProvider, OpenStreetMapProvider,
        },
        result::SearchResult,
    },
    Error, Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A provider that owns its whole lookup, transport included
#[async_trait]
pub trait Resolver: Send + Sync {
    fn name(&self) -> &str;

    /// Resolve `query` into results ordered best match first. An empty list
    /// means nothing was found.
    async fn locate(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// A provider that only describes a remote geocoding API
pub trait UrlTemplateProvider: Send + Sync {
    fn name(&self) -> &str;

    /// URL to GET for `query`
    fn build_query_url(&self, query: &str) -> Result<String>;

    /// Turn the decoded response body into results ordered best match first.
    /// Malformed payloads are an [`Error::Parse`].
    fn parse_response(&self, body: serde_json::Value) -> Result<Vec<SearchResult>>;
}

/// A geocoding provider, tagged by calling convention
#[derive(Clone)]
pub enum Provider {
    Resolver(Arc<dyn Resolver>),
    UrlTemplate(Arc<dyn UrlTemplateProvider>),
}

impl Provider {
    pub fn resolver(resolver: impl Resolver + 'static) -> Self {
        Self::Resolver(Arc::new(resolver))
    }

    pub fn url_template(provider: impl UrlTemplateProvider + 'static) -> Self {
        Self::UrlTemplate(Arc::new(provider))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Resolver(r) => r.name(),
            Self::UrlTemplate(p) => p.name(),
        }
    }

    /// Whether searches through this provider go through [`HttpFetch`]
    pub fn needs_fetch(&self) -> bool {
        matches!(self, Self::UrlTemplate(_))
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolver(r) => f.debug_tuple("Resolver").field(&r.name()).finish(),
            Self::UrlTemplate(p) => f.debug_tuple("UrlTemplate").field(&p.name()).finish(),
        }
    }
}

/// Resolve `query` with `provider`, fetching through `fetcher` when the
/// provider is a URL template.
pub async fn resolve(
    provider: &Provider,
    fetcher: &dyn HttpFetch,
    query: &str,
) -> Result<Vec<SearchResult>> {
    match provider {
        Provider::Resolver(resolver) => resolver.locate(query).await,
        Provider::UrlTemplate(template) => {
            let url = template.build_query_url(query)?;
            let body = fetcher.get_json(&url).await?;
            template.parse_response(body)
        }
    }
}

/// Selects one of the stock providers by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// Nominatim, free, no API key
    OpenStreetMap {
        #[serde(default)]
        base_url: Option<String>,
    },
    /// ArcGIS World Geocoding Service `find` endpoint
    Esri {
        #[serde(default)]
        base_url: Option<String>,
    },
    /// Google Geocoding API
    Google {
        #[serde(default)]
        api_key: Option<String>,
    },
    /// Bing Maps Locations API, key required
    Bing {
        #[serde(default)]
        api_key: Option<String>,
    },
    /// `lat, lng` text, no network
    Coordinates,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::OpenStreetMap { base_url: None }
    }
}

impl ProviderConfig {
    pub fn build(self) -> Result<Provider> {
        let provider = match self {
            Self::OpenStreetMap { base_url } => {
                let mut osm = OpenStreetMapProvider::new();
                if let Some(url) = base_url {
                    osm = osm.with_base_url(url);
                }
                Provider::url_template(osm)
            }
            Self::Esri { base_url } => {
                let mut esri = EsriProvider::new();
                if let Some(url) = base_url {
                    esri = esri.with_base_url(url);
                }
                Provider::url_template(esri)
            }
            Self::Google { api_key } => {
                let mut google = GoogleProvider::new();
                if let Some(key) = api_key {
                    google = google.with_api_key(key);
                }
                Provider::url_template(google)
            }
            Self::Bing { api_key } => {
                let key = api_key
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| Error::Config("the bing provider needs an api_key".to_string()))?;
                Provider::url_template(BingProvider::new(key))
            }
            Self::Coordinates => Provider::resolver(CoordinateResolver::new()),
        };
        Ok(provider)
    }
}
