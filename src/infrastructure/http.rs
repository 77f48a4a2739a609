//! # HTTP JSON Client
//!
//! `reqwest`-backed implementation of `JsonFetcher`. One client is built at
//! startup and shared by every request; the timeout applies per call.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::domain::errors::QuoteError;
use crate::domain::traits::JsonFetcher;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

/// Host part of a URL, used to label upstream errors.
fn service_name(url: &str) -> &str {
    url.split("://")
        .nth(1)
        .and_then(|rest| rest.split('/').next())
        .unwrap_or(url)
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn get_json(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, QuoteError> {
        let service = service_name(url);
        tracing::debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| QuoteError::api(service, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(QuoteError::api(service, format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| QuoteError::api(service, format!("Failed to parse response: {}", e)))
    }
}
