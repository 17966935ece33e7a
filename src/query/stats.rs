//! Fleet statistics and facet lists.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::model::{Entity, Status};

/// Health counts over a (filtered) view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub healthy: usize,
    pub issues: usize,
}

impl Stats {
    pub fn from_view(view: &[&Entity]) -> Self {
        let total = view.len();
        let healthy = view
            .iter()
            .filter(|e| e.current_status == Status::Available)
            .count();

        Self {
            total,
            healthy,
            issues: total - healthy,
        }
    }
}

/// Distinct values for filter dropdowns, always taken from the unfiltered collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub channels: Vec<String>,
    pub providers: Vec<String>,
}

impl Facets {
    pub fn from_entities(entities: &[Entity]) -> Self {
        let mut channels = BTreeSet::new();
        let mut providers = BTreeSet::new();

        for entity in entities {
            if let Some(channel) = entity.channel.as_deref().filter(|c| !c.is_empty()) {
                channels.insert(channel);
            }
            if !entity.provider.is_empty() {
                providers.insert(entity.provider.as_str());
            }
        }

        Self {
            channels: channels.into_iter().map(str::to_string).collect(),
            providers: providers.into_iter().map(str::to_string).collect(),
        }
    }
}
