//! Downloading blocklists from the catalog.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::{CatalogSource, Source};
use crate::error::{HostsError, Result};

/// Default timeout for HTTP requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User-Agent header value for HTTP requests.
const USER_AGENT: &str = concat!("hosts-manager/", env!("CARGO_PKG_VERSION"));

/// Blocking downloader for catalog sources.
///
/// Sources are fetched one at a time and nothing is cached.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher with the default 30 second timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::ClientBuild`] if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a fetcher with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::ClientBuild`] if the HTTP client cannot be created.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(HostsError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Downloads one source and returns its raw text.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Network`] if the request or body read fails, and
    /// [`HostsError::HttpStatus`] for any non-success status.
    pub fn fetch(&self, source: &CatalogSource) -> Result<Source> {
        tracing::info!(source = source.name, url = source.url, "Downloading hosts source");

        let network = |e: reqwest::Error| HostsError::Network {
            url: source.url.to_string(),
            source: e,
        };

        let response = self.client.get(source.url).send().map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(HostsError::HttpStatus {
                url: source.url.to_string(),
                status: status.as_u16(),
            });
        }

        let raw_text = response.text().map_err(network)?;
        tracing::debug!(source = source.name, bytes = raw_text.len(), "Downloaded hosts source");
        Ok(Source::new(source.name, raw_text))
    }

    /// Downloads every source in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::NoSourcesSelected`] for an empty selection, or
    /// the first download error.
    pub fn fetch_all(&self, sources: &[&CatalogSource]) -> Result<Vec<Source>> {
        if sources.is_empty() {
            return Err(HostsError::NoSourcesSelected);
        }
        sources.iter().map(|s| self.fetch(s)).collect()
    }
}
