//! Time ranges the dashboard can display.

use chrono::Duration as ChronoDuration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported period: {0}")]
pub struct PeriodParseError(pub String);

/// Width of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketUnit {
    Hour,
    Day,
}

/// A requested history range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    #[default]
    Day,
    Week,
    HalfMonth,
    Month,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Day, Period::Week, Period::HalfMonth, Period::Month];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Day => "24h",
            Period::Week => "7d",
            Period::HalfMonth => "15d",
            Period::Month => "30d",
        }
    }

    /// Number of buckets in the range.
    pub fn points(self) -> usize {
        match self {
            Period::Day => 24,
            Period::Week => 7,
            Period::HalfMonth => 15,
            Period::Month => 30,
        }
    }

    pub fn unit(self) -> BucketUnit {
        match self {
            Period::Day => BucketUnit::Hour,
            _ => BucketUnit::Day,
        }
    }

    pub fn bucket_width(self) -> ChronoDuration {
        match self.unit() {
            BucketUnit::Hour => ChronoDuration::hours(1),
            BucketUnit::Day => ChronoDuration::days(1),
        }
    }

    /// chrono format string for bucket labels.
    pub fn label_format(self) -> &'static str {
        match self.unit() {
            BucketUnit::Hour => "%H:%M",
            BucketUnit::Day => "%Y-%m-%d",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "24h" | "1d" => Ok(Period::Day),
            "7d" => Ok(Period::Week),
            "15d" => Ok(Period::HalfMonth),
            "30d" => Ok(Period::Month),
            other => Err(PeriodParseError(other.to_string())),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_periods() {
        for period in Period::ALL {
            assert_eq!(period.as_str().parse::<Period>().unwrap(), period);
        }
        assert_eq!("1d".parse::<Period>().unwrap(), Period::Day);
        assert!("90d".parse::<Period>().is_err());
        assert!("".parse::<Period>().is_err());
    }

    #[test]
    fn test_points_and_units() {
        assert_eq!(Period::Day.points(), 24);
        assert_eq!(Period::Day.unit(), BucketUnit::Hour);
        assert_eq!(Period::Week.points(), 7);
        assert_eq!(Period::HalfMonth.points(), 15);
        assert_eq!(Period::Month.points(), 30);
        assert_eq!(Period::Month.unit(), BucketUnit::Day);
        assert_eq!(Period::Week.bucket_width(), ChronoDuration::days(1));
    }

    #[test]
    fn test_serde_as_string() {
        assert_eq!(serde_json::to_string(&Period::HalfMonth).unwrap(), "\"15d\"");
        let p: Period = serde_json::from_str("\"30d\"").unwrap();
        assert_eq!(p, Period::Month);
        assert!(serde_json::from_str::<Period>("\"1y\"").is_err());
    }
}
