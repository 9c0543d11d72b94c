// Runtime configuration
//
// Defaults match the original dashboard deployment; every knob can be
// overridden through SENTINEL_* environment variables.

use std::time::Duration;

use crate::model::GeoPoint;

/// Configuration for the dashboard core pipeline.
#[derive(Debug, Clone)]
pub struct SentinelConfig {
    /// Events endpoint (polled).
    pub events_url: String,
    /// Summary endpoint (polled).
    pub summary_url: String,
    /// On-demand AI analysis endpoint.
    pub analysis_url: String,
    /// Event poll interval.
    pub events_interval: Duration,
    /// Summary poll interval.
    pub summary_interval: Duration,
    /// Fixed reference coordinate every arc terminates at.
    pub hq: GeoPoint,
    /// Most recent events kept per cycle; older ones are dropped.
    pub event_window: usize,
    /// Timeout for every backend request in milliseconds.
    pub request_timeout_ms: u64,
    /// User agent string.
    pub user_agent: String,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        let base =
            std::env::var("SENTINEL_BACKEND_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
        let base = base.trim_end_matches('/');

        Self {
            events_url: format!("{}/events/stream", base),
            summary_url: format!("{}/summary", base),
            analysis_url: format!("{}/ai/analyze", base),
            events_interval: Duration::from_millis(4000),
            summary_interval: Duration::from_millis(5000),
            hq: GeoPoint {
                lat: 20.5937,
                lng: 78.9629,
            },
            event_window: 50,
            request_timeout_ms: 10_000,
            user_agent: "sentinel-core/0.1".to_string(),
        }
    }
}

impl SentinelConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(ms) = env_u64("SENTINEL_EVENTS_INTERVAL_MS") {
            cfg.events_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = env_u64("SENTINEL_SUMMARY_INTERVAL_MS") {
            cfg.summary_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = env_u64("SENTINEL_REQUEST_TIMEOUT_MS") {
            cfg.request_timeout_ms = ms;
        }
        if let Some(n) = env_u64("SENTINEL_EVENT_WINDOW") {
            cfg.event_window = n as usize;
        }
        if let (Some(lat), Some(lng)) = (env_f64("SENTINEL_HQ_LAT"), env_f64("SENTINEL_HQ_LNG")) {
            cfg.hq = GeoPoint { lat, lng };
        }

        cfg
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
