//! Sources of raw status data.
//!
//! The probe backend is an external collaborator. `HttpSource` talks to it
//! over its `/api/status` contract; `MockSource` generates conforming data
//! locally.

mod http;
mod mock;

pub use http::*;
pub use mock::*;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::model::{Period, StatusResponse};

/// Fetch error types.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Transport(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    /// `transport` for failures to reach the backend, `protocol` for
    /// responses it should not have sent.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Timeout(_) | FetchError::Transport(_) => "transport",
            FetchError::Status(_) | FetchError::Decode(_) => "protocol",
        }
    }
}

/// Something that can produce a status response for a period.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self, period: Period) -> Result<StatusResponse, FetchError>;

    /// Human-readable description, used in logs.
    fn description(&self) -> &str;
}
