// src/fetch/mod.rs
// =============================================================================
// Page retrieval.
//
// Every stage of the harvest gets its HTML through the `PageFetcher` trait, so
// the pipeline can run against the real site (`HttpFetcher`) or against
// canned pages in tests.
//
// Submodules:
// - http: reqwest-backed fetcher with a request timeout
// =============================================================================

mod http;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

pub use http::HttpFetcher;

/// A fetched HTML page together with the URL it was fetched from.
///
/// The URL is kept so relative links on the page can be resolved.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub html: String,
}

impl Page {
    pub fn new(url: Url, html: impl Into<String>) -> Self {
        Self {
            url,
            html: html.into(),
        }
    }
}

/// Retrieves one URL. No retries: any failure is final for that call.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Page>;
}
