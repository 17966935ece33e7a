//! Canonical health states, sub-reasons and per-bucket status counts.

use serde::{Deserialize, Serialize};

/// Canonical health state of a probe, bucket or entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Available,
    Degraded,
    Unavailable,
    Missing,
}

impl Status {
    /// Map a raw collaborator status code to a canonical status.
    ///
    /// `1` available, `2` degraded, `0` unavailable, `3` (unconfigured) and
    /// `-1` (no data) missing. Anything else is treated as down.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Status::Available,
            2 => Status::Degraded,
            0 => Status::Unavailable,
            3 | -1 => Status::Missing,
            other => {
                tracing::warn!("Unknown status code {}, treating as unavailable", other);
                Status::Unavailable
            }
        }
    }

    /// Weight used when sorting by current status. Higher is healthier.
    pub fn weight(self) -> u8 {
        match self {
            Status::Available => 3,
            Status::Degraded => 2,
            Status::Unavailable => 1,
            Status::Missing => 0,
        }
    }

    /// Per-bucket score used by the weighted-count uptime mode.
    pub fn score(self) -> f64 {
        match self {
            Status::Available | Status::Degraded => 100.0,
            Status::Missing => 50.0,
            Status::Unavailable => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Available => "AVAILABLE",
            Status::Degraded => "DEGRADED",
            Status::Unavailable => "UNAVAILABLE",
            Status::Missing => "MISSING",
        }
    }
}

/// Why a probe was degraded or unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubStatus {
    SlowLatency,
    RateLimit,
    ServerError,
    ClientError,
    AuthError,
    InvalidRequest,
    NetworkError,
    ContentMismatch,
}

impl SubStatus {
    /// The status this sub-reason refines.
    pub fn parent(self) -> Status {
        match self {
            SubStatus::SlowLatency | SubStatus::RateLimit => Status::Degraded,
            _ => Status::Unavailable,
        }
    }
}

/// Number of probes per status and sub-reason folded into one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusCounts {
    pub available: u32,
    pub degraded: u32,
    pub unavailable: u32,
    pub missing: u32,
    pub slow_latency: u32,
    pub rate_limit: u32,
    pub server_error: u32,
    pub client_error: u32,
    pub auth_error: u32,
    pub invalid_request: u32,
    pub network_error: u32,
    pub content_mismatch: u32,
}

impl StatusCounts {
    /// Counts for a single probe with the given status and no sub-reason.
    pub fn single(status: Status) -> Self {
        let mut counts = Self::default();
        counts.record(status, None);
        counts
    }

    /// Number of probes represented by these counts.
    pub fn total(&self) -> u32 {
        self.available + self.degraded + self.unavailable + self.missing
    }

    pub fn count(&self, status: Status) -> u32 {
        match status {
            Status::Available => self.available,
            Status::Degraded => self.degraded,
            Status::Unavailable => self.unavailable,
            Status::Missing => self.missing,
        }
    }

    /// Fold one probe into the counts.
    ///
    /// A sub-reason is only counted when it refines `status`.
    pub fn record(&mut self, status: Status, sub: Option<SubStatus>) {
        match status {
            Status::Available => self.available += 1,
            Status::Degraded => self.degraded += 1,
            Status::Unavailable => self.unavailable += 1,
            Status::Missing => self.missing += 1,
        }

        if let Some(sub) = sub.filter(|s| s.parent() == status) {
            *self.sub_mut(sub) += 1;
        }
    }

    pub fn sub_count(&self, sub: SubStatus) -> u32 {
        match sub {
            SubStatus::SlowLatency => self.slow_latency,
            SubStatus::RateLimit => self.rate_limit,
            SubStatus::ServerError => self.server_error,
            SubStatus::ClientError => self.client_error,
            SubStatus::AuthError => self.auth_error,
            SubStatus::InvalidRequest => self.invalid_request,
            SubStatus::NetworkError => self.network_error,
            SubStatus::ContentMismatch => self.content_mismatch,
        }
    }

    fn sub_mut(&mut self, sub: SubStatus) -> &mut u32 {
        match sub {
            SubStatus::SlowLatency => &mut self.slow_latency,
            SubStatus::RateLimit => &mut self.rate_limit,
            SubStatus::ServerError => &mut self.server_error,
            SubStatus::ClientError => &mut self.client_error,
            SubStatus::AuthError => &mut self.auth_error,
            SubStatus::InvalidRequest => &mut self.invalid_request,
            SubStatus::NetworkError => &mut self.network_error,
            SubStatus::ContentMismatch => &mut self.content_mismatch,
        }
    }

    /// Cap sub-reason counters so their sum never exceeds the parent count.
    ///
    /// Returns true if anything was changed.
    pub fn clamp_sub_reasons(&mut self) -> bool {
        const DEGRADED: [SubStatus; 2] = [SubStatus::SlowLatency, SubStatus::RateLimit];
        const UNAVAILABLE: [SubStatus; 6] = [
            SubStatus::ServerError,
            SubStatus::ClientError,
            SubStatus::AuthError,
            SubStatus::InvalidRequest,
            SubStatus::NetworkError,
            SubStatus::ContentMismatch,
        ];

        let mut changed = false;
        for (parent, subs) in [
            (Status::Degraded, &DEGRADED[..]),
            (Status::Unavailable, &UNAVAILABLE[..]),
        ] {
            let mut budget = self.count(parent);
            for &sub in subs {
                let slot = self.sub_mut(sub);
                let kept = (*slot).min(budget);
                if kept != *slot {
                    *slot = kept;
                    changed = true;
                }
                budget -= kept;
            }
        }
        changed
    }
}
