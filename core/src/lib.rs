// Sentinel Core Library
// Live threat dashboard data pipeline

pub mod analysis;
pub mod backend;
pub mod config;
pub mod feed;
pub mod model;
pub mod poller;
pub mod severity;
pub mod state;

// Export core types
pub use analysis::{AnalysisLifecycle, AnalysisReport, AnalysisStatus, ANALYSIS_FALLBACK_TEXT};
pub use backend::{HttpBackend, ThreatBackend};
pub use config::SentinelConfig;
pub use feed::{feed_rows, FeedRow, FeedTier};
pub use model::{GeoPoint, GlobeConfig, GlobeScene, SummaryEntry, ThreatArc, ThreatEvent};
pub use poller::{arcs_from_events, EventPoller, SummaryPoller};
pub use severity::Severity;
pub use state::RenderState;

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentinelError {
    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
pub type Result<T> = std::result::Result<T, SentinelError>;

/// Dashboard core runtime
///
/// Owns the render state, the shutdown signal, and the two poller
/// tasks. `start()` brings the polling timelines up; `shutdown()`
/// cancels them and waits until they are gone, so no timer keeps
/// firing after teardown.
pub struct Sentinel {
    pub state: Arc<RenderState>,
    pub analysis: Arc<AnalysisLifecycle>,
    cfg: SentinelConfig,
    backend: Arc<dyn ThreatBackend>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl Sentinel {
    /// Build the runtime against the HTTP backend from `cfg`.
    pub fn new(cfg: SentinelConfig) -> Self {
        let backend = Arc::new(HttpBackend::new(cfg.clone()));
        Self::with_backend(cfg, backend)
    }

    /// Build the runtime against any backend implementation.
    pub fn with_backend(cfg: SentinelConfig, backend: Arc<dyn ThreatBackend>) -> Self {
        let state = Arc::new(RenderState::new(GlobeConfig::default()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let analysis = Arc::new(AnalysisLifecycle::new(
            Arc::clone(&backend),
            Arc::clone(&state),
            shutdown_rx.clone(),
        ));

        Self {
            state,
            analysis,
            cfg,
            backend,
            shutdown_tx,
            shutdown_rx,
            tasks: Vec::new(),
        }
    }

    /// Spawn the event and summary pollers.
    pub fn start(&mut self) {
        tracing::info!("Starting Sentinel...");

        let events = EventPoller::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.state),
            &self.cfg,
        );
        self.tasks.push(events.spawn(self.shutdown_rx.clone()));

        let summary = SummaryPoller::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.state),
            &self.cfg,
        );
        self.tasks.push(summary.spawn(self.shutdown_rx.clone()));

        tracing::info!("Sentinel started successfully");
    }

    /// Stop all timelines and wait for them to finish. In-flight
    /// fetches are abandoned without touching the render state.
    pub async fn shutdown(&mut self) {
        tracing::info!("Shutting down Sentinel...");

        let _ = self.shutdown_tx.send(true);
        for task in self.tasks.drain(..) {
            let _ = task.await;
        }

        tracing::info!("Sentinel shut down successfully");
    }
}
