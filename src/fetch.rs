//! Listing-page fetching.
//!
//! One GET per source per run: fixed browser-style User-Agent, 15 second
//! timeout, no cookies, no retries. A failing fetch is non-fatal: the source
//! simply contributes zero articles and the run continues with the rest.

use crate::error::FetchError;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument};

/// Identification header sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request timeout. A hanging source delays the run by at most this much.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the shared HTTP client used for every listing fetch.
pub fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// Fetch one listing page and return its raw markup.
///
/// # Errors
///
/// [`FetchError::Network`] on transport failure or timeout,
/// [`FetchError::Status`] on any non-2xx response.
#[instrument(level = "info", skip(client), fields(%url))]
pub async fn fetch_listing(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status { status });
    }

    let body = response.text().await?;
    info!(bytes = body.len(), "Fetched listing page");
    Ok(body)
}
