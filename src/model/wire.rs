//! Inbound `/api/status` contract published by the probe backend.
//!
//! Decoding is lenient: optional fields fall back to defaults, and a record
//! that does not decode is skipped rather than failing the whole response.

use serde::{Deserialize, Deserializer, Serialize};

use super::status::StatusCounts;

/// Top-level response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub meta: ResponseMeta,
    #[serde(deserialize_with = "skip_malformed")]
    pub data: Vec<MonitorRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub count: usize,
}

/// One provider/service/channel as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorRecord {
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_url: Option<String>,
    pub service: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sponsor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor_url: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub current_status: Option<CurrentStatus>,
    #[serde(default)]
    pub timeline: Vec<TimePoint>,
}

/// Latest single probe for a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentStatus {
    pub status: i64,
    #[serde(default)]
    pub latency: i64,
    #[serde(default)]
    pub timestamp: i64,
}

/// One pre-aggregated timeline bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub timestamp: i64,
    pub status: i64,
    #[serde(default)]
    pub latency: i64,
    /// Percentage in [0, 100], or -1 when the bucket holds no probes.
    #[serde(default)]
    pub availability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_counts: Option<StatusCounts>,
}

/// Decode `data` record by record, dropping the ones that do not fit.
///
/// A `null` array is treated as empty.
fn skip_malformed<'de, D>(deserializer: D) -> Result<Vec<MonitorRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();

    let records = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<MonitorRecord>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping malformed status record #{}: {}", i, e);
                None
            }
        })
        .collect();

    Ok(records)
}
