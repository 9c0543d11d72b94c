// Render state container
//
// Single owner of the values the (external) rendering layer reads:
// current arcs, summary counters, and the analysis report. Each slot
// is an independent watch channel, so an observer of one slot is
// never blocked or woken by writes to another.

use std::sync::Arc;
use tokio::sync::watch;

use crate::analysis::AnalysisReport;
use crate::model::{GlobeConfig, GlobeScene, SummaryEntry, ThreatArc};

/// Session-lifetime container for the dashboard's live data.
pub struct RenderState {
    arcs_tx: watch::Sender<Arc<Vec<ThreatArc>>>,
    summary_tx: watch::Sender<Vec<SummaryEntry>>,
    analysis_tx: watch::Sender<AnalysisReport>,
    globe_config: GlobeConfig,
}

impl RenderState {
    pub fn new(globe_config: GlobeConfig) -> Self {
        let (arcs_tx, _) = watch::channel(Arc::new(Vec::new()));
        let (summary_tx, _) = watch::channel(Vec::new());
        let (analysis_tx, _) = watch::channel(AnalysisReport::default());

        Self {
            arcs_tx,
            summary_tx,
            analysis_tx,
            globe_config,
        }
    }

    /// Replace the arc list wholesale. Consumers always see either the
    /// previous batch or the new one, never a mix, and each publish
    /// installs a fresh shared reference.
    pub fn publish_arcs(&self, arcs: Vec<ThreatArc>) {
        self.arcs_tx.send_replace(Arc::new(arcs));
    }

    /// Replace the summary list wholesale.
    pub fn publish_summary(&self, summary: Vec<SummaryEntry>) {
        self.summary_tx.send_replace(summary);
    }

    /// Replace the analysis report. Status and text always move together.
    pub fn publish_analysis(&self, report: AnalysisReport) {
        self.analysis_tx.send_replace(report);
    }

    /// Snapshot of the current arc batch.
    pub fn arcs(&self) -> Arc<Vec<ThreatArc>> {
        self.arcs_tx.borrow().clone()
    }

    /// Snapshot of the current summary counters.
    pub fn summary(&self) -> Vec<SummaryEntry> {
        self.summary_tx.borrow().clone()
    }

    /// Snapshot of the current analysis report.
    pub fn analysis(&self) -> AnalysisReport {
        self.analysis_tx.borrow().clone()
    }

    pub fn subscribe_arcs(&self) -> watch::Receiver<Arc<Vec<ThreatArc>>> {
        self.arcs_tx.subscribe()
    }

    pub fn subscribe_summary(&self) -> watch::Receiver<Vec<SummaryEntry>> {
        self.summary_tx.subscribe()
    }

    pub fn subscribe_analysis(&self) -> watch::Receiver<AnalysisReport> {
        self.analysis_tx.subscribe()
    }

    /// Current scene for the globe renderer.
    pub fn globe_scene(&self) -> GlobeScene {
        GlobeScene {
            globe_config: self.globe_config.clone(),
            data: self.arcs(),
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new(GlobeConfig::default())
    }
}
