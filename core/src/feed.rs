// Live feed view-model
//
// Pure derivation of the "incoming packets" panel rows from the
// current arc batch. Display-only: reversing for recency never touches
// the stored draw order.

use serde::{Deserialize, Serialize};

use crate::model::ThreatArc;
use crate::severity::Severity;

/// Longest label shown before truncation kicks in.
const LABEL_MAX_CHARS: usize = 15;

/// Badge tier for a feed row. Only high severity renders CRIT; medium
/// and low collapse into WARN. That collapse matches the original
/// display and is kept on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedTier {
    Crit,
    Warn,
}

impl FeedTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedTier::Crit => "CRIT",
            FeedTier::Warn => "WARN",
        }
    }
}

/// One row of the live feed panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRow {
    pub label: String,
    pub tier: FeedTier,
    pub lat: f64,
    pub lng: f64,
    pub color: String,
}

/// Derive the display rows for the current arc batch, most recent
/// first.
pub fn feed_rows(arcs: &[ThreatArc]) -> Vec<FeedRow> {
    arcs.iter()
        .rev()
        .map(|arc| FeedRow {
            label: row_label(&arc.attack_format),
            tier: if arc.color == Severity::High.color() {
                FeedTier::Crit
            } else {
                FeedTier::Warn
            },
            lat: arc.start_lat,
            lng: arc.start_lng,
            color: arc.color.clone(),
        })
        .collect()
}

fn row_label(attack_format: &[String]) -> String {
    if attack_format.is_empty() {
        return "Unknown".to_string();
    }
    let joined = attack_format.join(", ");
    if joined.chars().count() > LABEL_MAX_CHARS {
        let mut label: String = joined.chars().take(LABEL_MAX_CHARS).collect();
        label.push_str("...");
        label
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GeoPoint;
    use crate::model::ThreatEvent;
    use crate::poller::arcs_from_events;

    fn arcs(events: Vec<ThreatEvent>) -> Vec<ThreatArc> {
        arcs_from_events(
            &events,
            GeoPoint {
                lat: 20.5937,
                lng: 78.9629,
            },
            50,
        )
    }

    fn event(attack_format: Vec<&str>, severity: Severity) -> ThreatEvent {
        ThreatEvent {
            lat: 10.0,
            lng: 20.0,
            attack_format: attack_format.into_iter().map(String::from).collect(),
            severity,
            timestamp: 1,
        }
    }

    #[test]
    fn test_rows_are_reverse_chronological() {
        let batch = arcs(vec![
            event(vec!["first"], Severity::Low),
            event(vec!["second"], Severity::Low),
            event(vec!["third"], Severity::Low),
        ]);

        let rows = feed_rows(&batch);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "third");
        assert_eq!(rows[2].label, "first");
        // Stored draw order is untouched.
        assert_eq!(batch[0].order, 0);
        assert_eq!(batch[2].order, 2);
    }

    #[test]
    fn test_empty_attack_format_shows_unknown() {
        let batch = arcs(vec![event(vec![], Severity::Low)]);
        let rows = feed_rows(&batch);
        assert_eq!(rows[0].label, "Unknown");
    }

    #[test]
    fn test_long_label_is_truncated_with_ellipsis() {
        let batch = arcs(vec![event(vec!["SQLi", "XSS", "RCE", "DDoS"], Severity::High)]);
        let rows = feed_rows(&batch);

        // "SQLi, XSS, RCE, DDoS" -> first 15 chars + marker.
        assert_eq!(rows[0].label, "SQLi, XSS, RCE,...");
    }

    #[test]
    fn test_short_label_is_untouched() {
        let batch = arcs(vec![event(vec!["SQLi", "XSS"], Severity::Low)]);
        let rows = feed_rows(&batch);
        assert_eq!(rows[0].label, "SQLi, XSS");
    }

    #[test]
    fn test_tier_collapses_medium_into_warn() {
        let batch = arcs(vec![
            event(vec!["a"], Severity::High),
            event(vec!["b"], Severity::Medium),
            event(vec!["c"], Severity::Low),
        ]);

        let rows = feed_rows(&batch);

        // Rows are reversed: low, medium, high.
        assert_eq!(rows[0].tier, FeedTier::Warn);
        assert_eq!(rows[1].tier, FeedTier::Warn);
        assert_eq!(rows[2].tier, FeedTier::Crit);
        assert_eq!(rows[2].tier.as_str(), "CRIT");
        assert_eq!(rows[1].tier.as_str(), "WARN");
    }
}
