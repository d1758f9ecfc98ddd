// src/fetch/http.rs
// =============================================================================
// Fetches pages over HTTP with reqwest.
//
// One Client is shared by every task (it pools connections internally and is
// cheap to clone). A response that is not 2xx is an error for that call.
//
// Connections are released when the Response is dropped, so returning early
// on a bad status (without reading the body) does not leak anything.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::trace;
use url::Url;

use super::{Page, PageFetcher};
use crate::error::{HarvestError, Result};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> std::result::Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Page> {
        trace!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| HarvestError::request(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            // `response` is dropped here, body unread
            return Err(HarvestError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Redirects may have moved us; relative links resolve against the final URL
        let final_url = response.url().clone();
        let html = response
            .text()
            .await
            .map_err(|e| HarvestError::request(url.as_str(), e))?;

        Ok(Page::new(final_url, html))
    }
}
