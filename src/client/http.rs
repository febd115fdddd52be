//! # HTTP Ambari Client
//!
//! reqwest-backed implementation of [`AmbariApi`].

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

use super::traits::{AmbariApi, Credentials};
use crate::error::{AmbariError, AmbariResult};

/// HTTP client for Ambari REST requests
pub struct HttpAmbariClient {
    client: Client,
    timeout_ms: u64,
}

impl std::fmt::Debug for HttpAmbariClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAmbariClient")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl HttpAmbariClient {
    /// Create a client whose requests time out after `timeout_ms`
    pub fn new(timeout_ms: u64) -> AmbariResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(format!("ambari-check/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!("Created HttpAmbariClient, timeout: {}ms", timeout_ms);

        Ok(Self { client, timeout_ms })
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}

#[async_trait]
impl AmbariApi for HttpAmbariClient {
    async fn request(&self, url: &str, auth: &Credentials) -> AmbariResult<Value> {
        let url = Url::parse(url).map_err(|e| AmbariError::invalid_url(url, e.to_string()))?;

        debug!("Requesting Ambari resource: {}", url);

        let response = self
            .client
            .get(url.clone())
            .basic_auth(&auth.username, Some(&auth.password))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: Value = response.json().await?;
            Ok(body)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            error!("Ambari request to {} failed: {} - {}", url, status, error_text);
            Err(AmbariError::api_error(status.as_u16(), error_text))
        }
    }
}
