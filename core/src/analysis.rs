// Analysis request lifecycle
//
// Drives the on-demand AI report: idle -> pending -> {ready, failed},
// re-armed after every resolution. At most one request is in flight;
// triggers while pending are ignored. Failures surface as a fixed
// fallback report, never as a raw error.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::backend::ThreatBackend;
use crate::state::RenderState;

/// Report text shown when the analysis request fails.
pub const ANALYSIS_FALLBACK_TEXT: &str = "Error connecting to AI Command Link.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Idle,
    Pending,
    Ready,
    Failed,
}

/// Current analysis slot value; status and text move atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub status: AnalysisStatus,
    pub text: Option<String>,
}

impl Default for AnalysisReport {
    fn default() -> Self {
        Self {
            status: AnalysisStatus::Idle,
            text: None,
        }
    }
}

impl AnalysisReport {
    fn pending() -> Self {
        Self {
            status: AnalysisStatus::Pending,
            text: None,
        }
    }

    fn ready(text: String) -> Self {
        Self {
            status: AnalysisStatus::Ready,
            text: Some(text),
        }
    }

    fn failed() -> Self {
        Self {
            status: AnalysisStatus::Failed,
            text: Some(ANALYSIS_FALLBACK_TEXT.to_string()),
        }
    }
}

/// Manages the single in-flight on-demand analysis request.
pub struct AnalysisLifecycle {
    backend: Arc<dyn ThreatBackend>,
    state: Arc<RenderState>,
    in_flight: AtomicBool,
    shutdown_rx: watch::Receiver<bool>,
}

impl AnalysisLifecycle {
    pub fn new(
        backend: Arc<dyn ThreatBackend>,
        state: Arc<RenderState>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            backend,
            state,
            in_flight: AtomicBool::new(false),
            shutdown_rx,
        }
    }

    /// Start an analysis request. Returns false (and does nothing) if a
    /// request is already pending. Any previous report text is cleared
    /// before the request goes out.
    pub fn trigger(self: &Arc<Self>) -> bool {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!(target: "analysis", "Trigger ignored: request already pending");
            return false;
        }

        info!(target: "analysis", "Analysis requested");
        self.state.publish_analysis(AnalysisReport::pending());

        let this = Arc::clone(self);
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = shutdown.changed() => {
                    // Dashboard torn down; discard whatever the
                    // backend eventually answers.
                    debug!(target: "analysis", "Shutdown during analysis request; discarding");
                }
                result = this.backend.fetch_analysis() => {
                    match result {
                        Ok(text) => {
                            info!(target: "analysis", chars = text.len(), "Analysis ready");
                            this.state.publish_analysis(AnalysisReport::ready(text));
                        }
                        Err(e) => {
                            warn!(target: "analysis", error = %e, "Analysis request failed");
                            this.state.publish_analysis(AnalysisReport::failed());
                        }
                    }
                }
            }
            this.in_flight.store(false, Ordering::SeqCst);
        });

        true
    }
}
