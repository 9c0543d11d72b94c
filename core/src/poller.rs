// Periodic pollers
//
// The event and summary pollers are independent repeating tasks: fixed
// interval, one fetch in flight at a time, wholesale replacement of
// their container slot on success. A failed cycle logs and keeps the
// previous value; the next tick is the retry. Both stop on the shared
// shutdown signal, abandoning any in-flight fetch without touching
// state.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::backend::ThreatBackend;
use crate::config::SentinelConfig;
use crate::model::{GeoPoint, ThreatArc, ThreatEvent};
use crate::state::RenderState;

/// Map an event batch to renderable arcs.
///
/// Keeps at most the last `window` events (the backend reports oldest
/// first), terminating every arc at `hq`. `order` is the dense index
/// into the produced batch.
pub fn arcs_from_events(events: &[ThreatEvent], hq: GeoPoint, window: usize) -> Vec<ThreatArc> {
    let skip = events.len().saturating_sub(window);
    events[skip..]
        .iter()
        .enumerate()
        .map(|(i, event)| ThreatArc {
            order: i,
            start_lat: event.lat,
            start_lng: event.lng,
            end_lat: hq.lat,
            end_lng: hq.lng,
            arc_alt: event.severity.altitude(),
            color: event.severity.color().to_string(),
            attack_format: event.attack_format.clone(),
            severity: event.severity,
        })
        .collect()
}

/// Polls the events endpoint and republishes the arc batch.
pub struct EventPoller {
    backend: Arc<dyn ThreatBackend>,
    state: Arc<RenderState>,
    interval: Duration,
    hq: GeoPoint,
    window: usize,
}

impl EventPoller {
    pub fn new(
        backend: Arc<dyn ThreatBackend>,
        state: Arc<RenderState>,
        cfg: &SentinelConfig,
    ) -> Self {
        Self {
            backend,
            state,
            interval: cfg.events_interval,
            hq: cfg.hq,
            window: cfg.event_window,
        }
    }

    /// Run until the shutdown signal fires. The first cycle runs
    /// immediately, then once per interval.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(target: "poller", interval_ms = self.interval.as_millis() as u64, "Event poller started");

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown.changed() => break,
                    _ = async {
                        ticker.tick().await;
                        self.poll_once().await;
                    } => {}
                }
            }

            info!(target: "poller", "Event poller stopped");
        })
    }

    async fn poll_once(&self) {
        match self.backend.fetch_events().await {
            Ok(events) => {
                let arcs = arcs_from_events(&events, self.hq, self.window);
                debug!(target: "poller", events = events.len(), arcs = arcs.len(), "Events cycle complete");
                self.state.publish_arcs(arcs);
            }
            Err(e) => {
                // Stale arcs beat a blank globe; the next tick retries.
                warn!(target: "poller", error = %e, "Events poll failed; keeping previous arcs");
            }
        }
    }
}

/// Polls the summary endpoint and republishes the top-N counters.
pub struct SummaryPoller {
    backend: Arc<dyn ThreatBackend>,
    state: Arc<RenderState>,
    interval: Duration,
}

impl SummaryPoller {
    pub fn new(
        backend: Arc<dyn ThreatBackend>,
        state: Arc<RenderState>,
        cfg: &SentinelConfig,
    ) -> Self {
        Self {
            backend,
            state,
            interval: cfg.summary_interval,
        }
    }

    /// Run until the shutdown signal fires.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(target: "poller", interval_ms = self.interval.as_millis() as u64, "Summary poller started");

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown.changed() => break,
                    _ = async {
                        ticker.tick().await;
                        self.poll_once().await;
                    } => {}
                }
            }

            info!(target: "poller", "Summary poller stopped");
        })
    }

    async fn poll_once(&self) {
        match self.backend.fetch_summary().await {
            Ok(summary) => {
                debug!(target: "poller", entries = summary.len(), "Summary cycle complete");
                self.state.publish_summary(summary);
            }
            Err(e) => {
                warn!(target: "poller", error = %e, "Summary poll failed; keeping previous summary");
            }
        }
    }
}
