// Per-component outcome
// A signal either produced a real score or fell back to neutral with a reason.

use crate::error::DetectionError;

/// Score used whenever a component has no usable evidence.
pub const NEUTRAL_SCORE: f64 = 0.5;

#[derive(Debug)]
pub enum ComponentScore {
    Scored(f64),
    Neutral(DetectionError),
}

impl ComponentScore {
    pub fn from_result(result: Result<f64, DetectionError>) -> Self {
        match result {
            Ok(v) => Self::from_value(v),
            Err(e) => Self::Neutral(e),
        }
    }

    /// Non-finite values are treated as a tokenization failure.
    pub fn from_value(value: f64) -> Self {
        if value.is_finite() {
            Self::Scored(value.clamp(0.0, 1.0))
        } else {
            Self::Neutral(DetectionError::TokenizationFailure(format!(
                "component produced {value}"
            )))
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Self::Scored(v) => *v,
            Self::Neutral(_) => NEUTRAL_SCORE,
        }
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self, Self::Neutral(_))
    }

    pub fn reason(&self) -> Option<&DetectionError> {
        match self {
            Self::Scored(_) => None,
            Self::Neutral(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scored_values_are_clamped() {
        assert_eq!(ComponentScore::from_value(1.3).value(), 1.0);
        assert_eq!(ComponentScore::from_value(-0.2).value(), 0.0);
        assert!(!ComponentScore::from_value(0.7).is_neutral());
    }

    #[test]
    fn test_failures_resolve_to_neutral() {
        let nan = ComponentScore::from_value(f64::NAN);
        assert!(nan.is_neutral());
        assert_eq!(nan.value(), NEUTRAL_SCORE);
        assert!(matches!(nan.reason(), Some(DetectionError::TokenizationFailure(_))));

        let empty = ComponentScore::from_result(Err(DetectionError::EmptyOrDegenerateInput));
        assert_eq!(empty.value(), NEUTRAL_SCORE);
    }
}
