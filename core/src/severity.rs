// Severity encoding - maps threat severity to its visual treatment
//
// The encoding is total: anything the backend sends that we do not
// recognize is rendered with the low-severity treatment so malformed
// data never blanks the display.

use serde::{Deserialize, Serialize};

/// Ordinal threat level reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    #[serde(other)]
    Low,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Low
    }
}

impl Severity {
    /// Display color (hex) for arcs and feed badges.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::High => "#ef4444",
            Severity::Medium => "#f59e0b",
            Severity::Low => "#10b981",
        }
    }

    /// Arc altitude weight for the globe renderer.
    pub fn altitude(&self) -> f64 {
        match self {
            Severity::High => 0.7,
            Severity::Medium => 0.4,
            Severity::Low => 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_encoding() {
        assert_eq!(Severity::High.color(), "#ef4444");
        assert_eq!(Severity::Medium.color(), "#f59e0b");
        assert_eq!(Severity::Low.color(), "#10b981");

        assert_eq!(Severity::High.altitude(), 0.7);
        assert_eq!(Severity::Medium.altitude(), 0.4);
        assert_eq!(Severity::Low.altitude(), 0.2);
    }

    #[test]
    fn test_known_labels_deserialize() {
        let high: Severity = serde_json::from_str("\"high\"").unwrap();
        let medium: Severity = serde_json::from_str("\"medium\"").unwrap();
        let low: Severity = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(high, Severity::High);
        assert_eq!(medium, Severity::Medium);
        assert_eq!(low, Severity::Low);
    }

    #[test]
    fn test_unrecognized_label_falls_back_to_low() {
        let sev: Severity = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(sev, Severity::Low);
        assert_eq!(sev.color(), "#10b981");
        assert_eq!(sev.altitude(), 0.2);
    }
}
