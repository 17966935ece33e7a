//! Refresh/fetch orchestration.
//!
//! `Orchestrator` drives a `RefreshMachine`: each trigger spawns one fetch
//! task, and the settled state is published as an immutable `Snapshot` on
//! a watch channel.

mod machine;

pub use machine::*;

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::model::Period;
use crate::pipeline::normalize_response;
use crate::source::StatusSource;

/// Owns the canonical entity collection for the process lifetime.
pub struct Orchestrator {
    source: Arc<dyn StatusSource>,
    machine: Arc<Mutex<RefreshMachine>>,
    snapshot_tx: Arc<watch::Sender<Arc<Snapshot>>>,
}

impl Orchestrator {
    pub fn new(source: Arc<dyn StatusSource>, period: Period) -> Self {
        let machine = RefreshMachine::new(period);
        let (snapshot_tx, _) = watch::channel(Arc::new(machine.snapshot()));

        Self {
            source,
            machine: Arc::new(Mutex::new(machine)),
            snapshot_tx: Arc::new(snapshot_tx),
        }
    }

    /// Latest published state.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot_tx.borrow().clone()
    }

    /// Receive every published state change.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshot_tx.subscribe()
    }

    /// Initial load.
    pub async fn mount(&self) -> Option<JoinHandle<()>> {
        self.dispatch(Trigger::Mount).await
    }

    /// Switch the time range. A no-op when `period` is already selected.
    pub async fn set_period(&self, period: Period) -> Option<JoinHandle<()>> {
        self.dispatch(Trigger::RangeChanged(period)).await
    }

    /// Re-fetch the current range.
    pub async fn refresh(&self) -> Option<JoinHandle<()>> {
        self.dispatch(Trigger::ManualRefresh).await
    }

    async fn dispatch(&self, trigger: Trigger) -> Option<JoinHandle<()>> {
        let ticket = {
            let mut machine = self.machine.lock().await;
            let ticket = machine.trigger(trigger)?;
            self.snapshot_tx.send_replace(Arc::new(machine.snapshot()));
            ticket
        };

        tracing::debug!(
            "Fetch #{} for {} via {} ({:?})",
            ticket.generation,
            ticket.period,
            self.source.description(),
            trigger
        );

        let source = self.source.clone();
        let machine = self.machine.clone();
        let snapshot_tx = self.snapshot_tx.clone();

        Some(tokio::spawn(async move {
            let outcome = source.fetch(ticket.period).await.map(normalize_response);

            let mut machine = machine.lock().await;
            let applied = match outcome {
                Ok(entities) => {
                    let count = entities.len();
                    let applied = machine.resolve(&ticket, entities, Utc::now());
                    if applied {
                        tracing::info!(
                            "Loaded {} entities for {} (fetch #{})",
                            count,
                            ticket.period,
                            ticket.generation
                        );
                    }
                    applied
                }
                Err(e) => {
                    let applied = machine.reject(&ticket, e.to_string());
                    if applied {
                        tracing::error!(
                            "Fetch #{} for {} failed ({}): {}",
                            ticket.generation,
                            ticket.period,
                            e.kind(),
                            e
                        );
                    }
                    applied
                }
            };

            if applied {
                snapshot_tx.send_replace(Arc::new(machine.snapshot()));
            } else {
                tracing::debug!("Discarding superseded fetch #{}", ticket.generation);
            }
        }))
    }
}

/// Issue a manual refresh every `every`, skipping missed ticks.
pub fn spawn_auto_refresh(orchestrator: Arc<Orchestrator>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            orchestrator.refresh().await;
        }
    })
}
