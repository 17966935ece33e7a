//! Configuration module for statusboard.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

use crate::model::Period;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the web server (default: 8080)
    pub http_port: u16,
    /// Base URL of the probe backend serving `/api/status`
    pub api_base_url: String,
    /// Time range shown at startup (default: 24h)
    pub period: Period,
    /// Interval between automatic refreshes; `None` disables them (default: 60s)
    pub refresh_interval: Option<Duration>,
    /// Timeout for one upstream request (default: 10s)
    pub fetch_timeout: Duration,
    /// Serve generated data instead of calling the backend
    pub use_mock: bool,
    /// Success credit of a degraded probe in mock data (default: 0.7)
    pub degraded_weight: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            api_base_url: "http://localhost:8080".to_string(),
            period: Period::Day,
            refresh_interval: Some(Duration::from_secs(60)),
            fetch_timeout: Duration::from_secs(10),
            use_mock: false,
            degraded_weight: 0.7,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STATUSBOARD_HTTP_PORT`: HTTP port (default: 8080)
    /// - `STATUSBOARD_API_BASE_URL`: probe backend URL (default: "http://localhost:8080")
    /// - `STATUSBOARD_PERIOD`: initial range, one of 24h/7d/15d/30d (default: "24h")
    /// - `STATUSBOARD_REFRESH_INTERVAL`: seconds between refreshes, 0 disables (default: 60)
    /// - `STATUSBOARD_FETCH_TIMEOUT`: upstream request timeout in seconds (default: 10)
    /// - `STATUSBOARD_USE_MOCK`: "true"/"1" to use generated data (default: false)
    /// - `STATUSBOARD_DEGRADED_WEIGHT`: 0..=1 (default: 0.7)
    pub fn load() -> Self {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Values that fail to parse are ignored and the default is kept.
    pub fn load_from<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(port) = lookup("STATUSBOARD_HTTP_PORT").and_then(|v| v.parse().ok()) {
            cfg.http_port = port;
        }

        if let Some(url) = lookup("STATUSBOARD_API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            cfg.api_base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup("STATUSBOARD_PERIOD") {
            match raw.parse() {
                Ok(period) => cfg.period = period,
                Err(e) => tracing::warn!("Ignoring STATUSBOARD_PERIOD: {}", e),
            }
        }

        if let Some(secs) = lookup("STATUSBOARD_REFRESH_INTERVAL").and_then(|v| v.parse::<u64>().ok()) {
            cfg.refresh_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(secs) = lookup("STATUSBOARD_FETCH_TIMEOUT").and_then(|v| v.parse::<u64>().ok()) {
            if secs > 0 {
                cfg.fetch_timeout = Duration::from_secs(secs);
            }
        }

        if let Some(flag) = lookup("STATUSBOARD_USE_MOCK") {
            cfg.use_mock = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        if let Some(weight) = lookup("STATUSBOARD_DEGRADED_WEIGHT").and_then(|v| v.parse::<f64>().ok()) {
            if (0.0..=1.0).contains(&weight) {
                cfg.degraded_weight = weight;
            }
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::load_from(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.http_port, 8080);
        assert_eq!(cfg.api_base_url, "http://localhost:8080");
        assert_eq!(cfg.period, Period::Day);
        assert_eq!(cfg.refresh_interval, Some(Duration::from_secs(60)));
        assert!(!cfg.use_mock);
    }

    #[test]
    fn test_load_overrides() {
        let cfg = load(&[
            ("STATUSBOARD_HTTP_PORT", "9090"),
            ("STATUSBOARD_API_BASE_URL", "https://probe.example"),
            ("STATUSBOARD_PERIOD", "15d"),
            ("STATUSBOARD_REFRESH_INTERVAL", "0"),
            ("STATUSBOARD_FETCH_TIMEOUT", "3"),
            ("STATUSBOARD_USE_MOCK", "TRUE"),
            ("STATUSBOARD_DEGRADED_WEIGHT", "0.5"),
        ]);
        assert_eq!(cfg.http_port, 9090);
        assert_eq!(cfg.api_base_url, "https://probe.example");
        assert_eq!(cfg.period, Period::HalfMonth);
        assert_eq!(cfg.refresh_interval, None);
        assert_eq!(cfg.fetch_timeout, Duration::from_secs(3));
        assert!(cfg.use_mock);
        assert_eq!(cfg.degraded_weight, 0.5);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let cfg = load(&[
            ("STATUSBOARD_HTTP_PORT", "http"),
            ("STATUSBOARD_PERIOD", "1y"),
            ("STATUSBOARD_REFRESH_INTERVAL", "-5"),
            ("STATUSBOARD_DEGRADED_WEIGHT", "1.5"),
        ]);
        assert_eq!(cfg.http_port, 8080);
        assert_eq!(cfg.period, Period::Day);
        assert_eq!(cfg.refresh_interval, Some(Duration::from_secs(60)));
        assert_eq!(cfg.degraded_weight, 0.7);
    }
}
