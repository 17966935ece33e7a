//! Bucket reduction.
//!
//! Two entry points produce the same `Bucket` series:
//! - `reduce_timeline` adapts a timeline the backend already aggregated
//!   (one wire point per bucket, order preserved).
//! - `fold_probes` aggregates raw probes into fixed-width slots for a period.

use chrono::{DateTime, Utc};

use crate::model::{Bucket, Period, Status, StatusCounts, SubStatus, TimePoint};

/// Availability value meaning "no probes in this bucket".
pub const NO_DATA: f64 = -1.0;

/// A single raw health check.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    /// Raw status code, see `Status::from_code`.
    pub status: i64,
    pub sub_status: Option<SubStatus>,
    /// Milliseconds.
    pub latency: i64,
    /// Unix seconds.
    pub timestamp: i64,
}

/// Convert a pre-aggregated wire timeline into buckets.
pub fn reduce_timeline(points: &[TimePoint]) -> Vec<Bucket> {
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let status = Status::from_code(point.status);
            let availability = point.availability.map(sanitize_availability);

            let status_counts = match point.status_counts {
                Some(mut counts) => {
                    if counts.clamp_sub_reasons() {
                        tracing::warn!(
                            "Bucket {} ({}) reported more sub-reasons than probes, clamped",
                            index,
                            point.time
                        );
                    }
                    reconcile_counts(index, point, status, availability, counts)
                }
                None => default_counts(status, availability),
            };

            Bucket {
                index,
                time: point.time.clone(),
                timestamp: point.timestamp,
                status,
                latency: point.latency,
                availability,
                status_counts,
            }
        })
        .collect()
}

/// Counts assumed for a point that carries none: one probe of its own
/// status, or nothing at all for a no-data bucket.
fn default_counts(status: Status, availability: Option<f64>) -> StatusCounts {
    match availability {
        Some(a) if a < 0.0 => StatusCounts::default(),
        _ => StatusCounts::single(status),
    }
}

/// Keep supplied counts consistent with the no-data sentinel: a no-data
/// bucket holds zero probes, any other bucket holds at least one.
fn reconcile_counts(
    index: usize,
    point: &TimePoint,
    status: Status,
    availability: Option<f64>,
    counts: StatusCounts,
) -> StatusCounts {
    let no_data = matches!(availability, Some(a) if a < 0.0);

    if no_data && counts.total() > 0 {
        tracing::warn!(
            "Bucket {} ({}) has no data but reported {} probes, counts dropped",
            index,
            point.time,
            counts.total()
        );
        StatusCounts::default()
    } else if !no_data && counts.total() == 0 {
        tracing::warn!(
            "Bucket {} ({}) has availability but reported no probes, assuming one",
            index,
            point.time
        );
        default_counts(status, availability)
    } else {
        counts
    }
}

/// Any negative value collapses to the no-data sentinel; the rest is capped at 100.
fn sanitize_availability(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        NO_DATA
    } else {
        value.min(100.0)
    }
}

#[derive(Default)]
struct SlotStats<'a> {
    total: u32,
    weighted_success: f64,
    latency_sum: i64,
    latency_samples: i64,
    last: Option<&'a Probe>,
    counts: StatusCounts,
}

/// Aggregate raw probes into `period.points()` slots ending at `now`, oldest first.
///
/// Probes older than the window are dropped; probes stamped in the future
/// land in the newest slot. `degraded_weight` is the success credit of a
/// degraded probe, between 0 and 1.
pub fn fold_probes(
    probes: &[Probe],
    period: Period,
    now: DateTime<Utc>,
    degraded_weight: f64,
) -> Vec<Bucket> {
    let count = period.points();
    let width = period.bucket_width();
    let width_secs = width.num_seconds().max(1);
    let now_ts = now.timestamp();
    let label_format = period.label_format();

    let mut slots: Vec<SlotStats> = (0..count).map(|_| SlotStats::default()).collect();

    for probe in probes {
        let age = (now_ts - probe.timestamp).max(0);
        let from_end = (age / width_secs) as usize;
        if from_end >= count {
            continue;
        }

        let slot = &mut slots[count - 1 - from_end];
        let status = Status::from_code(probe.status);

        slot.total += 1;
        slot.weighted_success += success_weight(status, degraded_weight);
        slot.counts.record(status, probe.sub_status);
        if status != Status::Missing {
            slot.latency_sum += probe.latency;
            slot.latency_samples += 1;
        }
        if slot.last.map_or(true, |last| probe.timestamp >= last.timestamp) {
            slot.last = Some(probe);
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            let Some(last) = slot.last else {
                let start = now - width * (count - index) as i32;
                return Bucket {
                    index,
                    time: start.format(label_format).to_string(),
                    timestamp: start.timestamp(),
                    status: Status::Missing,
                    latency: 0,
                    availability: Some(NO_DATA),
                    status_counts: StatusCounts::default(),
                };
            };

            let latency = if slot.latency_samples > 0 {
                (slot.latency_sum as f64 / slot.latency_samples as f64).round() as i64
            } else {
                0
            };

            Bucket {
                index,
                time: format_timestamp(last.timestamp, label_format),
                timestamp: last.timestamp,
                status: Status::from_code(last.status),
                latency,
                availability: Some(slot.weighted_success / slot.total as f64 * 100.0),
                status_counts: slot.counts,
            }
        })
        .collect()
}

fn success_weight(status: Status, degraded_weight: f64) -> f64 {
    match status {
        Status::Available => 1.0,
        Status::Degraded => degraded_weight.clamp(0.0, 1.0),
        Status::Unavailable | Status::Missing => 0.0,
    }
}

fn format_timestamp(ts: i64, format: &str) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format(format).to_string())
        .unwrap_or_default()
}
