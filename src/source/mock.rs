//! Locally generated status data for demos and development.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use super::{FetchError, StatusSource};
use crate::model::{
    CurrentStatus, MonitorRecord, Period, ResponseMeta, Status, StatusResponse, SubStatus, TimePoint,
};
use crate::pipeline::{fold_probes, Probe};

/// (provider, services) pairs the mock reports on.
const CATALOGUE: &[(&str, &[&str])] = &[
    ("88code", &["cc", "cx"]),
    ("xychatai", &["cx"]),
    ("duckcoding", &["cc", "cx"]),
    ("www.right.codes", &["cx"]),
];

const CHANNELS: [&str; 3] = ["vip-channel", "standard-channel", "test-channel"];
const CATEGORIES: [&str; 2] = ["commercial", "public"];
const SPONSORS: [&str; 4] = ["In-house", "Community", "duckcoding official", "Sample data"];

/// Probes generated per bucket slot.
const PROBES_PER_BUCKET: usize = 3;

/// Generates plausible `/api/status` responses without a backend.
#[derive(Debug, Clone)]
pub struct MockSource {
    delay: Duration,
    degraded_weight: f64,
    seed: Option<u64>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(600),
            degraded_weight: 0.7,
            seed: None,
        }
    }
}

impl MockSource {
    pub fn new(delay: Duration, degraded_weight: f64) -> Self {
        Self {
            delay,
            degraded_weight,
            seed: None,
        }
    }

    /// Use a fixed RNG seed so output is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build a response for `period` as seen at `now`.
    pub fn generate(&self, period: Period, now: DateTime<Utc>) -> StatusResponse {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut data = Vec::new();
        for (provider_index, (provider, services)) in CATALOGUE.iter().enumerate() {
            for service in services.iter() {
                let probes = random_probes(&mut rng, period, now);
                let timeline = fold_probes(&probes, period, now, self.degraded_weight)
                    .into_iter()
                    .map(|bucket| TimePoint {
                        time: bucket.time,
                        timestamp: bucket.timestamp,
                        status: status_code(bucket.status),
                        latency: bucket.latency,
                        availability: bucket.availability,
                        status_counts: Some(bucket.status_counts),
                    })
                    .collect();

                let (status, _) = random_status(&mut rng);
                let current_status = CurrentStatus {
                    status,
                    latency: random_latency(&mut rng),
                    timestamp: now.timestamp(),
                };

                data.push(MonitorRecord {
                    provider: provider.to_string(),
                    provider_url: Some(format!("https://{}", provider)),
                    service: service.to_string(),
                    category: Some(CATEGORIES[provider_index % CATEGORIES.len()].to_string()),
                    sponsor: Some(SPONSORS[provider_index % SPONSORS.len()].to_string()),
                    sponsor_url: None,
                    channel: Some(CHANNELS[provider_index % CHANNELS.len()].to_string()),
                    current_status: Some(current_status),
                    timeline,
                });
            }
        }

        StatusResponse {
            meta: ResponseMeta {
                period: period.to_string(),
                count: data.len(),
            },
            data,
        }
    }
}

#[async_trait]
impl StatusSource for MockSource {
    async fn fetch(&self, period: Period) -> Result<StatusResponse, FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.generate(period, Utc::now()))
    }

    fn description(&self) -> &str {
        "mock"
    }
}

fn status_code(status: Status) -> i64 {
    match status {
        Status::Available => 1,
        Status::Degraded => 2,
        Status::Unavailable => 0,
        Status::Missing => -1,
    }
}

fn random_latency<R: Rng>(rng: &mut R) -> i64 {
    180 + rng.gen_range(0..220)
}

/// Roll one probe outcome: 2% unconfigured, 3% down, 10% degraded.
fn random_status<R: Rng>(rng: &mut R) -> (i64, Option<SubStatus>) {
    let roll: f64 = rng.gen();
    if roll > 0.98 {
        (3, None)
    } else if roll > 0.95 {
        let sub = match rng.gen_range(0..4) {
            0 => SubStatus::ServerError,
            1 => SubStatus::ClientError,
            2 => SubStatus::NetworkError,
            _ => SubStatus::ContentMismatch,
        };
        (0, Some(sub))
    } else if roll > 0.85 {
        let sub = if rng.gen_bool(0.5) {
            SubStatus::SlowLatency
        } else {
            SubStatus::RateLimit
        };
        (2, Some(sub))
    } else {
        (1, None)
    }
}

fn random_probes<R: Rng>(rng: &mut R, period: Period, now: DateTime<Utc>) -> Vec<Probe> {
    let width = period.bucket_width().num_seconds();
    let mut probes = Vec::new();

    for slot in 0..period.points() as i64 {
        // Occasionally leave a whole slot without data
        if rng.gen_bool(0.02) {
            continue;
        }

        let slot_end = now - ChronoDuration::seconds(slot * width);
        for _ in 0..PROBES_PER_BUCKET {
            let (status, sub_status) = random_status(rng);
            let latency = if status == 3 { 0 } else { random_latency(rng) };
            let offset = rng.gen_range(0..width);
            probes.push(Probe {
                status,
                sub_status,
                latency,
                timestamp: slot_end.timestamp() - offset,
            });
        }
    }

    probes
}
