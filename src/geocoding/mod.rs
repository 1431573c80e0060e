//! Geocoding: turning free-text queries into coordinates
//!
//! Providers come in two shapes. A [`Resolver`](provider::Resolver) owns its
//! whole lookup; a [`UrlTemplateProvider`](provider::UrlTemplateProvider) only
//! describes a remote HTTP API and leaves the fetch to an
//! [`HttpFetch`](fetch::HttpFetch) implementation.

pub mod fetch;
pub mod provider;
pub mod providers;
pub mod result;

pub use fetch::{HttpFetch, ReqwestFetcher};
pub use provider::{resolve, Provider, ProviderConfig, Resolver, UrlTemplateProvider};
pub use result::{SearchOutcome, SearchResult};
