// Sensitivity utilities
// Sensitivity moves the decision threshold only, never the raw probabilities.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionSensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl DetectionSensitivity {
    pub fn from_str(val: &str) -> Self {
        match val.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }

    /// `ai_probability` must exceed this to classify as AI-generated.
    pub fn decision_threshold(self) -> f64 {
        match self {
            Self::Low => 0.7,
            Self::Medium => 0.6,
            Self::High => 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_order() {
        let low = DetectionSensitivity::Low.decision_threshold();
        let mid = DetectionSensitivity::Medium.decision_threshold();
        let high = DetectionSensitivity::High.decision_threshold();
        assert!(low > mid);
        assert!(mid > high);
        assert_eq!(mid, 0.6);
    }

    #[test]
    fn test_unknown_falls_back_to_medium() {
        assert_eq!(DetectionSensitivity::from_str(" HIGH "), DetectionSensitivity::High);
        assert_eq!(DetectionSensitivity::from_str("paranoid"), DetectionSensitivity::Medium);
    }
}
