// Backend boundary
//
// ThreatBackend is the seam between the pipeline and the network; the
// HTTP implementation wraps the three dashboard endpoints. Wire-shape
// structs live here: a missing `events` key is a poll failure, while a
// missing `top_attack_formats` key degrades to an empty list.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::SentinelConfig;
use crate::model::{SummaryEntry, ThreatEvent};
use crate::{Result, SentinelError};

/// Data source for the dashboard pipeline.
#[async_trait]
pub trait ThreatBackend: Send + Sync {
    /// Fetch the current event window, oldest first.
    async fn fetch_events(&self) -> Result<Vec<ThreatEvent>>;

    /// Fetch the aggregate top-N attack format counters.
    async fn fetch_summary(&self) -> Result<Vec<SummaryEntry>>;

    /// Request an AI-generated narrative report.
    async fn fetch_analysis(&self) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    events: Vec<ThreatEvent>,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    top_attack_formats: Vec<SummaryEntry>,
}

#[derive(Debug, Deserialize)]
struct AnalysisResponse {
    analysis: String,
}

/// HTTP backend over the dashboard REST endpoints.
pub struct HttpBackend {
    cfg: SentinelConfig,
    http_client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(cfg: SentinelConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .user_agent(&cfg.user_agent)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { cfg, http_client }
    }

    async fn get(&self, url: &str, what: &str) -> Result<reqwest::Response> {
        let response = self.http_client.get(url).send().await.map_err(|e| {
            warn!(target: "backend", error = %e, url = %url, "{} request failed", what);
            SentinelError::BackendError(format!("{} request failed: {}", what, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(target: "backend", status = %status, url = %url, "{} returned error status", what);
            return Err(SentinelError::BackendError(format!(
                "{} returned status: {}",
                what, status
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl ThreatBackend for HttpBackend {
    async fn fetch_events(&self) -> Result<Vec<ThreatEvent>> {
        debug!(target: "backend", url = %self.cfg.events_url, "Fetching events");

        let response = self.get(&self.cfg.events_url, "Events").await?;
        let body: EventsResponse = response.json().await.map_err(|e| {
            warn!(target: "backend", error = %e, "Failed to parse events response");
            SentinelError::BackendError(format!("Failed to parse events response: {}", e))
        })?;

        Ok(body.events)
    }

    async fn fetch_summary(&self) -> Result<Vec<SummaryEntry>> {
        debug!(target: "backend", url = %self.cfg.summary_url, "Fetching summary");

        let response = self.get(&self.cfg.summary_url, "Summary").await?;
        let body: SummaryResponse = response.json().await.map_err(|e| {
            warn!(target: "backend", error = %e, "Failed to parse summary response");
            SentinelError::BackendError(format!("Failed to parse summary response: {}", e))
        })?;

        Ok(body.top_attack_formats)
    }

    async fn fetch_analysis(&self) -> Result<String> {
        debug!(target: "backend", url = %self.cfg.analysis_url, "Requesting analysis");

        let response = self.get(&self.cfg.analysis_url, "Analysis").await?;
        let body: AnalysisResponse = response.json().await.map_err(|e| {
            warn!(target: "backend", error = %e, "Failed to parse analysis response");
            SentinelError::BackendError(format!("Failed to parse analysis response: {}", e))
        })?;

        Ok(body.analysis)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Semaphore;

    /// In-memory backend that replays queued responses, for tests.
    pub(crate) struct ScriptedBackend {
        events: Mutex<VecDeque<Result<Vec<ThreatEvent>>>>,
        summaries: Mutex<VecDeque<Result<Vec<SummaryEntry>>>>,
        analyses: Mutex<VecDeque<Result<String>>>,
        pub(crate) analysis_calls: AtomicUsize,
        /// When set, fetch_analysis blocks until a permit is released.
        analysis_gate: Option<Arc<Semaphore>>,
    }

    impl ScriptedBackend {
        pub(crate) fn new() -> Self {
            Self {
                events: Mutex::new(VecDeque::new()),
                summaries: Mutex::new(VecDeque::new()),
                analyses: Mutex::new(VecDeque::new()),
                analysis_calls: AtomicUsize::new(0),
                analysis_gate: None,
            }
        }

        pub(crate) fn gated(gate: Arc<Semaphore>) -> Self {
            let mut backend = Self::new();
            backend.analysis_gate = Some(gate);
            backend
        }

        pub(crate) fn push_events(&self, response: Result<Vec<ThreatEvent>>) {
            self.events.lock().unwrap().push_back(response);
        }

        pub(crate) fn push_summary(&self, response: Result<Vec<SummaryEntry>>) {
            self.summaries.lock().unwrap().push_back(response);
        }

        pub(crate) fn push_analysis(&self, response: Result<String>) {
            self.analyses.lock().unwrap().push_back(response);
        }

        fn exhausted<T>() -> Result<T> {
            Err(SentinelError::BackendError("script exhausted".to_string()))
        }
    }

    #[async_trait]
    impl ThreatBackend for ScriptedBackend {
        async fn fetch_events(&self) -> Result<Vec<ThreatEvent>> {
            let next = self.events.lock().unwrap().pop_front();
            next.unwrap_or_else(Self::exhausted)
        }

        async fn fetch_summary(&self) -> Result<Vec<SummaryEntry>> {
            let next = self.summaries.lock().unwrap().pop_front();
            next.unwrap_or_else(Self::exhausted)
        }

        async fn fetch_analysis(&self) -> Result<String> {
            self.analysis_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.analysis_gate {
                let _permit = gate.acquire().await.map_err(|_| {
                    SentinelError::BackendError("analysis gate closed".to_string())
                })?;
            }
            let next = self.analyses.lock().unwrap().pop_front();
            next.unwrap_or_else(Self::exhausted)
        }
    }
}
