//! Uptime scoring over a bucket series.

use crate::model::Bucket;

/// Availability percentage for an entity, in [0, 100], two decimals.
///
/// Buckets with a numeric availability contribute it directly, with the
/// no-data sentinel counted as 100 so freshly added entities are not
/// punished. Buckets without one fall back to their status score. An empty
/// series scores 0.
pub fn uptime(buckets: &[Bucket]) -> f64 {
    if buckets.is_empty() {
        return 0.0;
    }

    let total: f64 = buckets.iter().map(bucket_score).sum();
    round2(total / buckets.len() as f64)
}

fn bucket_score(bucket: &Bucket) -> f64 {
    match bucket.availability {
        Some(a) if a < 0.0 => 100.0,
        Some(a) => a.min(100.0),
        None => bucket.status.score(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Status, StatusCounts};

    fn bucket(status: Status, availability: Option<f64>) -> Bucket {
        Bucket {
            index: 0,
            time: String::new(),
            timestamp: 0,
            status,
            latency: 0,
            availability,
            status_counts: StatusCounts::default(),
        }
    }

    #[test]
    fn test_empty_series_is_zero() {
        assert_eq!(uptime(&[]), 0.0);
    }

    #[test]
    fn test_no_data_counts_as_full() {
        let buckets = vec![
            bucket(Status::Missing, Some(-1.0)),
            bucket(Status::Available, Some(80.0)),
            bucket(Status::Degraded, Some(60.0)),
        ];
        assert_eq!(uptime(&buckets), 80.0);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let buckets = vec![
            bucket(Status::Available, Some(90.0)),
            bucket(Status::Unavailable, Some(10.0)),
            bucket(Status::Missing, Some(-1.0)),
        ];
        assert_eq!(uptime(&buckets), 66.67);
    }

    #[test]
    fn test_weighted_count_mode() {
        let buckets = vec![
            bucket(Status::Available, None),
            bucket(Status::Degraded, None),
            bucket(Status::Missing, None),
            bucket(Status::Unavailable, None),
        ];
        assert_eq!(uptime(&buckets), 62.5);
    }

    #[test]
    fn test_mixed_modes() {
        let buckets = vec![bucket(Status::Unavailable, Some(40.0)), bucket(Status::Missing, None)];
        assert_eq!(uptime(&buckets), 45.0);
    }

    #[test]
    fn test_all_missing_is_full() {
        let buckets: Vec<_> = (0..24).map(|_| bucket(Status::Missing, Some(-1.0))).collect();
        assert_eq!(uptime(&buckets), 100.0);
    }
}
