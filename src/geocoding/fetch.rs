use crate::{
    core::constants::{HTTP_TIMEOUT_SECS, USER_AGENT},
    Error, Result,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Shared async HTTP client for geocoding requests
pub(crate) static HTTP_CLIENT: Lazy<std::result::Result<reqwest::Client, String>> =
    Lazy::new(|| {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| e.to_string())
    });

/// The host's HTTP facility, used for URL-template providers
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// GET `url` and decode the body as JSON. Non-2xx statuses are errors.
    async fn get_json(&self, url: &str) -> Result<serde_json::Value>;
}

/// [`HttpFetch`] over `reqwest`
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
    client: Option<reqwest::Client>,
}

impl ReqwestFetcher {
    /// Fetcher using the shared client
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetcher using a caller-configured client (proxies, custom timeouts, ...)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: Some(client),
        }
    }

    fn client(&self) -> Result<&reqwest::Client> {
        match &self.client {
            Some(client) => Ok(client),
            None => HTTP_CLIENT
                .as_ref()
                .map_err(|e| Error::Runtime(format!("failed to build HTTP client: {}", e))),
        }
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        log::debug!("GET {}", url);
        let response = self.client()?.get(url).send().await?.error_for_status()?;
        let body = response.json::<serde_json::Value>().await?;
        Ok(body)
    }
}
