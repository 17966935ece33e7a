//! Presentation records produced by the pipeline.

use serde::{Deserialize, Serialize};

use super::status::{Status, StatusCounts};

/// Who operates a monitored provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Commercial,
    Public,
    /// A value the backend sent that is not one of the known kinds.
    Other(String),
}

impl Category {
    /// Parse the backend's category string. Blank values yield `None`;
    /// unknown ones are kept verbatim so they can still be filtered on.
    pub fn from_wire(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        Some(match value.to_ascii_lowercase().as_str() {
            "commercial" => Category::Commercial,
            "public" => Category::Public,
            _ => Category::Other(value.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Commercial => "commercial",
            Category::Public => "public",
            Category::Other(raw) => raw,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_wire(&value).unwrap_or(Category::Other(value))
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// One slot of an entity's history series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub index: usize,
    /// Human-readable label, e.g. `14:00` or `2024-03-01`.
    pub time: String,
    /// Unix seconds.
    pub timestamp: i64,
    /// Status of the last probe folded into the bucket.
    pub status: Status,
    /// Mean latency in milliseconds.
    pub latency: i64,
    /// Percentage in [0, 100]; -1 when the bucket holds no probes; `None`
    /// when the collaborator did not report one.
    pub availability: Option<f64>,
    pub status_counts: StatusCounts,
}

impl Bucket {
    /// True when the bucket carries the "no data" sentinel.
    pub fn is_empty(&self) -> bool {
        matches!(self.availability, Some(a) if a < 0.0)
    }
}

/// One monitored (provider, service, channel) tuple ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: String,
    pub provider: String,
    pub provider_name: String,
    pub provider_url: Option<String>,
    pub service: String,
    pub category: Option<Category>,
    pub sponsor: Option<String>,
    pub sponsor_url: Option<String>,
    pub channel: Option<String>,
    /// Oldest first.
    pub history: Vec<Bucket>,
    pub current_status: Status,
    pub last_check_latency: Option<i64>,
    pub last_check_timestamp: Option<i64>,
    pub uptime: f64,
}
