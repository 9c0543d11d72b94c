// Core data model
//
// ThreatEvent is what the backend reports; ThreatArc is the derived
// renderable form consumed by the globe widget. Arc lists are rebuilt
// wholesale on every poll cycle, so no arc carries identity across
// cycles - `order` is only a stable draw index within one batch.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::severity::Severity;

/// A fixed geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// One discrete threat event as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatEvent {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub attack_format: Vec<String>,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub timestamp: i64,
}

/// Renderable directed link from an event's source to HQ.
///
/// Field names follow the renderer's wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatArc {
    /// Dense 0-based index matching array position; draw ordering only.
    pub order: usize,
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    pub arc_alt: f64,
    pub color: String,
    #[serde(rename = "attack_format")]
    pub attack_format: Vec<String>,
    pub severity: Severity,
}

/// One aggregate counter from the summary endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, u64)", into = "(String, u64)")]
pub struct SummaryEntry {
    pub label: String,
    pub count: u64,
}

// The backend emits summary entries as 2-element arrays.
impl From<(String, u64)> for SummaryEntry {
    fn from((label, count): (String, u64)) -> Self {
        Self { label, count }
    }
}

impl From<SummaryEntry> for (String, u64) {
    fn from(entry: SummaryEntry) -> Self {
        (entry.label, entry.count)
    }
}

/// Globe widget options recognized by the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobeConfig {
    pub base_color: String,
    pub ambient_light_color: String,
    pub point_light_color: String,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            base_color: "#0f172a".to_string(),
            ambient_light_color: "#38bdf8".to_string(),
            point_light_color: "#ffffff".to_string(),
            auto_rotate: true,
            auto_rotate_speed: 0.6,
        }
    }
}

/// Value object handed to the globe renderer.
///
/// `data` is a fresh shared reference on every arc publish, so the
/// renderer can rely on reference identity for change detection.
#[derive(Debug, Clone)]
pub struct GlobeScene {
    pub globe_config: GlobeConfig,
    pub data: Arc<Vec<ThreatArc>>,
}
