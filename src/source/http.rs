//! HTTP client for the backend's `/api/status` endpoint.

use async_trait::async_trait;
use std::time::Duration;

use super::{FetchError, StatusSource};
use crate::model::{Period, StatusResponse};

/// Fetches status data from a remote probe backend.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    description: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            description: format!("http {}", base_url),
            base_url,
            timeout,
        })
    }

    pub fn status_url(&self, period: Period) -> String {
        format!("{}/api/status?period={}", self.base_url, period)
    }
}

#[async_trait]
impl StatusSource for HttpSource {
    async fn fetch(&self, period: Period) -> Result<StatusResponse, FetchError> {
        let url = self.status_url(period);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout)
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout)
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let parsed: StatusResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        tracing::debug!("Fetched {} records from {}", parsed.data.len(), url);
        Ok(parsed)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
