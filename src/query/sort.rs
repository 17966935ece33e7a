//! Sorting of the entity view.

use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

use crate::model::Entity;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortParseError {
    #[error("unknown sort field: {0}")]
    Key(String),
    #[error("unknown sort direction: {0}")]
    Direction(String),
}

/// Field an entity view can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Uptime,
    /// Ordered by status weight, not by name.
    CurrentStatus,
    ProviderName,
    ServiceType,
    Channel,
    Category,
    LastCheckLatency,
    LastCheckTimestamp,
}

impl FromStr for SortKey {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "uptime" => Ok(SortKey::Uptime),
            "currentStatus" | "current_status" | "status" => Ok(SortKey::CurrentStatus),
            "providerName" | "provider_name" | "provider" => Ok(SortKey::ProviderName),
            "serviceType" | "service_type" | "service" => Ok(SortKey::ServiceType),
            "channel" => Ok(SortKey::Channel),
            "category" => Ok(SortKey::Category),
            "lastCheckLatency" | "last_check_latency" | "latency" => Ok(SortKey::LastCheckLatency),
            "lastCheckTimestamp" | "last_check_timestamp" | "lastCheck" => {
                Ok(SortKey::LastCheckTimestamp)
            }
            other => Err(SortParseError::Key(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(SortParseError::Direction(other.to_string())),
        }
    }
}

/// Sort field and direction. Without a key the input order is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: Some(SortKey::Uptime),
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Keep the canonical order.
    pub fn unsorted() -> Self {
        Self {
            key: None,
            direction: SortDirection::Asc,
        }
    }
}

fn compare(a: &Entity, b: &Entity, key: SortKey) -> Ordering {
    match key {
        SortKey::Uptime => a.uptime.total_cmp(&b.uptime),
        SortKey::CurrentStatus => a.current_status.weight().cmp(&b.current_status.weight()),
        SortKey::ProviderName => a.provider_name.cmp(&b.provider_name),
        SortKey::ServiceType => a.service.cmp(&b.service),
        SortKey::Channel => a.channel.cmp(&b.channel),
        SortKey::Category => a
            .category
            .as_ref()
            .map(|c| c.as_str())
            .cmp(&b.category.as_ref().map(|c| c.as_str())),
        SortKey::LastCheckLatency => a.last_check_latency.cmp(&b.last_check_latency),
        SortKey::LastCheckTimestamp => a.last_check_timestamp.cmp(&b.last_check_timestamp),
    }
}

/// Stable sort of a view. Ties keep their relative order in both directions.
pub fn sort_view(view: &mut [&Entity], spec: SortSpec) {
    let Some(key) = spec.key else {
        return;
    };

    view.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match spec.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!("uptime".parse::<SortKey>().unwrap(), SortKey::Uptime);
        assert_eq!("currentStatus".parse::<SortKey>().unwrap(), SortKey::CurrentStatus);
        assert_eq!("providerName".parse::<SortKey>().unwrap(), SortKey::ProviderName);
        assert_eq!("serviceType".parse::<SortKey>().unwrap(), SortKey::ServiceType);
        assert!(matches!("colour".parse::<SortKey>(), Err(SortParseError::Key(_))));
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("up".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_default_spec() {
        let spec = SortSpec::default();
        assert_eq!(spec.key, Some(SortKey::Uptime));
        assert_eq!(spec.direction, SortDirection::Desc);
    }
}
