// Score Combiner / Classifier
// Fuses the three component scores into an AI probability with a
// consensus confidence and applies the decision threshold.

use super::sensitivity::DetectionSensitivity;
use crate::error::{DetectionError, Result};
use crate::models::{DetectionResult, ScoreTriple};
use crate::services::text_processor::{mean, std_dev};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PATTERN_WEIGHT: f64 = 0.4;
pub const DEFAULT_LINGUISTIC_WEIGHT: f64 = 0.4;
pub const DEFAULT_STRUCTURAL_WEIGHT: f64 = 0.2;
/// Uncalibrated; tune against labeled data before relying on it.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

pub const CONFIDENCE_FLOOR: f64 = 0.5;
pub const CONFIDENCE_CEILING: f64 = 0.95;

/// Fusion weights and decision threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightProfile {
    pub pattern: f64,
    pub linguistic: f64,
    pub structural: f64,
    pub threshold: f64,
}

impl Default for WeightProfile {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN_WEIGHT,
            linguistic: DEFAULT_LINGUISTIC_WEIGHT,
            structural: DEFAULT_STRUCTURAL_WEIGHT,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl WeightProfile {
    pub fn for_sensitivity(sensitivity: DetectionSensitivity) -> Self {
        Self {
            threshold: sensitivity.decision_threshold(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [self.pattern, self.linguistic, self.structural];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(DetectionError::InvalidProfile(format!(
                "weights must be finite and non-negative, got {weights:?}"
            )));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(DetectionError::InvalidProfile("weights sum to zero".to_string()));
        }
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(DetectionError::InvalidProfile(format!(
                "threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }
}

#[inline]
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// `1 - std / mean` of the three scores, clamped to the confidence range.
/// Agreement between independent signals raises confidence.
pub fn consensus_confidence(scores: &[f64; 3]) -> f64 {
    let confidence = match mean(scores) {
        Some(m) if m > 0.0 => 1.0 - std_dev(scores) / m,
        _ => CONFIDENCE_FLOOR,
    };
    confidence.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
}

#[derive(Debug, Clone, Default)]
pub struct ScoreCombiner {
    profile: WeightProfile,
}

impl ScoreCombiner {
    pub fn new(profile: WeightProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self { profile })
    }

    pub fn profile(&self) -> &WeightProfile {
        &self.profile
    }

    pub fn classify(&self, scores: ScoreTriple) -> Result<DetectionResult> {
        let values = [scores.pattern_score, scores.linguistic_score, scores.structural_score];
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || !(0.0..=1.0).contains(*v)) {
            return Err(DetectionError::CombinerFailure(format!(
                "component score {bad} outside [0, 1]"
            )));
        }

        let p = &self.profile;
        let ai_probability = (p.pattern * scores.pattern_score
            + p.linguistic * scores.linguistic_score
            + p.structural * scores.structural_score)
            .clamp(0.0, 1.0);
        if !ai_probability.is_finite() {
            return Err(DetectionError::CombinerFailure("fused probability is not finite".to_string()));
        }

        let confidence = consensus_confidence(&values);
        let is_ai_generated = ai_probability > p.threshold;
        let ai_probability = round3(ai_probability);

        Ok(DetectionResult {
            is_ai_generated,
            confidence: round3(confidence),
            ai_probability,
            human_probability: round3(1.0 - ai_probability),
            breakdown: ScoreTriple {
                pattern_score: round3(scores.pattern_score),
                linguistic_score: round3(scores.linguistic_score),
                structural_score: round3(scores.structural_score),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combiner() -> ScoreCombiner {
        ScoreCombiner::new(WeightProfile::default()).unwrap()
    }

    fn triple(p: f64, l: f64, s: f64) -> ScoreTriple {
        ScoreTriple {
            pattern_score: p,
            linguistic_score: l,
            structural_score: s,
        }
    }

    #[test]
    fn test_weighted_fusion() {
        let r = combiner().classify(triple(0.78, 0.5813, 0.8)).unwrap();
        assert_eq!(r.ai_probability, 0.705);
        assert_eq!(r.human_probability, 0.295);
        assert!(r.is_ai_generated);
        assert_eq!(r.breakdown.linguistic_score, 0.581);
    }

    #[test]
    fn test_probabilities_are_complements() {
        for (p, l, s) in [(0.1, 0.2, 0.3), (0.333, 0.777, 0.5), (1.0, 1.0, 1.0), (0.0, 0.0, 0.0)] {
            let r = combiner().classify(triple(p, l, s)).unwrap();
            assert!((r.ai_probability + r.human_probability - 1.0).abs() < 1e-9);
            assert!((0.0..=1.0).contains(&r.ai_probability));
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let r = combiner().classify(triple(0.55, 0.55, 0.55)).unwrap();
        assert!(!r.is_ai_generated);
        // Fuses to exactly the threshold.
        let at = combiner().classify(triple(0.6, 0.6, 0.6)).unwrap();
        assert_eq!(at.ai_probability, DEFAULT_THRESHOLD);
        assert!(!at.is_ai_generated);
        let low = ScoreCombiner::new(WeightProfile::for_sensitivity(DetectionSensitivity::Low)).unwrap();
        assert!(!low.classify(triple(0.7, 0.7, 0.7)).unwrap().is_ai_generated);
        let high = ScoreCombiner::new(WeightProfile::for_sensitivity(DetectionSensitivity::High)).unwrap();
        assert!(high.classify(triple(0.55, 0.55, 0.55)).unwrap().is_ai_generated);
    }

    #[test]
    fn test_confidence_tracks_agreement() {
        assert_eq!(consensus_confidence(&[0.7, 0.7, 0.7]), CONFIDENCE_CEILING);
        assert_eq!(consensus_confidence(&[0.0, 0.0, 0.0]), CONFIDENCE_FLOOR);
        assert_eq!(consensus_confidence(&[0.0, 0.0, 1.0]), CONFIDENCE_FLOOR);
        let mid = consensus_confidence(&[0.6, 0.7, 0.8]);
        assert!(mid > CONFIDENCE_FLOOR && mid < CONFIDENCE_CEILING);
    }

    #[test]
    fn test_rejects_invalid_scores() {
        assert!(matches!(
            combiner().classify(triple(f64::NAN, 0.5, 0.5)),
            Err(DetectionError::CombinerFailure(_))
        ));
        assert!(combiner().classify(triple(1.5, 0.5, 0.5)).is_err());
    }

    #[test]
    fn test_profile_validation() {
        let negative = WeightProfile { pattern: -0.1, ..WeightProfile::default() };
        assert!(ScoreCombiner::new(negative).is_err());
        let zero = WeightProfile { pattern: 0.0, linguistic: 0.0, structural: 0.0, threshold: 0.6 };
        assert!(zero.validate().is_err());
        let threshold = WeightProfile { threshold: 1.2, ..WeightProfile::default() };
        assert!(threshold.validate().is_err());
    }
}
