//! Entity normalization: one presentation record per backend record.

use reqwest::Url;
use std::collections::HashSet;

use super::bucket::reduce_timeline;
use super::uptime::uptime;
use crate::model::{Category, Entity, MonitorRecord, Status, StatusResponse};

/// Channel name used in identifiers when a record has none.
pub const DEFAULT_CHANNEL: &str = "default";

/// Stable identifier `{provider}-{service}-{channel}`.
pub fn entity_id(provider: &str, service: &str, channel: Option<&str>) -> String {
    format!("{}-{}-{}", provider, service, channel.unwrap_or(DEFAULT_CHANNEL))
}

/// Accept only well-formed absolute URLs. Anything else is dropped.
pub fn validate_url(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    match Url::parse(value) {
        Ok(_) => Some(value.to_string()),
        Err(e) => {
            tracing::warn!("Ignoring invalid URL {:?}: {}", value, e);
            None
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Build the presentation record for one backend record.
pub fn normalize_record(record: MonitorRecord) -> Entity {
    let channel = non_empty(record.channel);
    let id = entity_id(&record.provider, &record.service, channel.as_deref());

    let history = reduce_timeline(&record.timeline);
    let uptime = uptime(&history);

    // Current status comes only from the live check, never from history
    let current_status = record
        .current_status
        .map(|c| Status::from_code(c.status))
        .unwrap_or(Status::Unavailable);

    let category = record.category.as_deref().and_then(Category::from_wire);
    if let Some(Category::Other(raw)) = &category {
        tracing::debug!("Unrecognized category {:?} for {}", raw, id);
    }

    Entity {
        provider_url: validate_url(record.provider_url.as_deref()),
        sponsor_url: validate_url(record.sponsor_url.as_deref()),
        provider_name: record.provider.clone(),
        provider: record.provider,
        service: record.service,
        category,
        sponsor: non_empty(record.sponsor),
        channel,
        history,
        current_status,
        last_check_latency: record.current_status.map(|c| c.latency),
        last_check_timestamp: record.current_status.map(|c| c.timestamp),
        uptime,
        id,
    }
}

/// Normalize a whole response. A record repeating the provider, service
/// and channel of an earlier one is dropped.
pub fn normalize_response(response: StatusResponse) -> Vec<Entity> {
    let mut seen = HashSet::new();

    response
        .data
        .into_iter()
        .filter(|record| {
            let channel = non_empty(record.channel.clone());
            let fresh = seen.insert((record.provider.clone(), record.service.clone(), channel.clone()));
            if !fresh {
                tracing::warn!(
                    "Dropping duplicate status record {}",
                    entity_id(&record.provider, &record.service, channel.as_deref())
                );
            }
            fresh
        })
        .map(normalize_record)
        .collect()
}
