//! Refresh state machine.
//!
//! Pure and synchronous: the async driver feeds it trigger events and fetch
//! outcomes. Every trigger bumps a generation counter, and only the outcome
//! carrying the latest generation may settle the machine.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::model::{Entity, Period};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Events that start a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Mount,
    RangeChanged(Period),
    ManualRefresh,
}

/// Identifies one fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub period: Period,
}

/// Immutable view of the machine handed to consumers.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    /// Selected range. Runs ahead of `data_period` while a range change loads.
    pub period: Period,
    /// Range the visible collection was fetched for; `None` before the first success.
    pub data_period: Option<Period>,
    pub loading: bool,
    pub error: Option<String>,
    /// Bumped each time a new collection is installed.
    pub version: u64,
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub entities: Arc<Vec<Entity>>,
}

#[derive(Debug)]
pub struct RefreshMachine {
    phase: Phase,
    period: Period,
    data_period: Option<Period>,
    generation: u64,
    entities: Arc<Vec<Entity>>,
    error: Option<String>,
    version: u64,
    last_updated: Option<DateTime<Utc>>,
}

impl RefreshMachine {
    pub fn new(period: Period) -> Self {
        Self {
            phase: Phase::Idle,
            period,
            data_period: None,
            generation: 0,
            entities: Arc::new(Vec::new()),
            error: None,
            version: 0,
            last_updated: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Enter `Loading` and hand out a ticket for the fetch to run.
    ///
    /// Returns `None` for a range change to the period already shown.
    /// The current collection and error stay visible until the fetch settles.
    pub fn trigger(&mut self, trigger: Trigger) -> Option<Ticket> {
        if let Trigger::RangeChanged(period) = trigger {
            if period == self.period && self.phase != Phase::Idle {
                return None;
            }
            self.period = period;
        }

        self.generation += 1;
        self.phase = Phase::Loading;

        Some(Ticket {
            generation: self.generation,
            period: self.period,
        })
    }

    /// True if no later trigger has superseded `ticket`.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// Install a freshly fetched collection. Stale tickets are ignored.
    pub fn resolve(&mut self, ticket: &Ticket, entities: Vec<Entity>, at: DateTime<Utc>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.entities = Arc::new(entities);
        self.data_period = Some(ticket.period);
        self.version += 1;
        self.phase = Phase::Ready;
        self.error = None;
        self.last_updated = Some(at);
        true
    }

    /// Record a failed fetch, keeping the last good collection. Stale tickets are ignored.
    pub fn reject(&mut self, ticket: &Ticket, message: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.phase = Phase::Error;
        self.error = Some(message);
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            period: self.period,
            data_period: self.data_period,
            loading: self.phase == Phase::Loading,
            error: self.error.clone(),
            version: self.version,
            last_updated: self.last_updated,
            entities: self.entities.clone(),
        }
    }
}
