// Data Models
// Verdict, breakdown and request/response records exchanged at the boundary

use serde::{Deserialize, Serialize};

use crate::error::{DetectionError, Result};

pub use crate::services::detection::linguistic::FeatureVector;
pub use crate::services::detection::structural::StructuralFeatures;

/// Reference cap on input length, in characters.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 50_000;
pub const BATCH_MIN_TEXTS: usize = 2;
pub const BATCH_MAX_TEXTS: usize = 100;

// ============ Detection Result ============

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTriple {
    pub pattern_score: f64,
    pub linguistic_score: f64,
    pub structural_score: f64,
}

impl ScoreTriple {
    pub fn neutral() -> Self {
        Self {
            pattern_score: 0.5,
            linguistic_score: 0.5,
            structural_score: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub is_ai_generated: bool,
    pub confidence: f64,
    pub ai_probability: f64,
    pub human_probability: f64,
    #[serde(rename = "analysis_breakdown")]
    pub breakdown: ScoreTriple,
}

impl DetectionResult {
    /// The fail-neutral verdict.
    pub fn neutral() -> Self {
        Self {
            is_ai_generated: false,
            confidence: 0.5,
            ai_probability: 0.5,
            human_probability: 0.5,
            breakdown: ScoreTriple::neutral(),
        }
    }
}

// ============ Detailed Analysis ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorMatch {
    pub pattern: String,
    pub matches: Vec<String>,
    pub weight: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub text_length: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub ai_indicators: Vec<IndicatorMatch>,
    pub human_indicators: Vec<IndicatorMatch>,
    pub structural_features: StructuralFeatures,
    /// All `0.5` when the text has no extractable sentences or words.
    pub features: FeatureVector,
    pub result: DetectionResult,
}

// ============ Requests ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectRequest {
    pub text: String,
}

impl DetectRequest {
    pub fn validate(&self, max_chars: usize) -> Result<()> {
        validate_text(&self.text, max_chars)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDetectRequest {
    pub texts: Vec<String>,
}

impl BatchDetectRequest {
    pub fn validate(&self, max_chars: usize) -> Result<()> {
        if !(BATCH_MIN_TEXTS..=BATCH_MAX_TEXTS).contains(&self.texts.len()) {
            return Err(DetectionError::BatchSize(self.texts.len()));
        }
        self.texts.iter().try_for_each(|t| validate_text(t, max_chars))
    }
}

fn validate_text(text: &str, max_chars: usize) -> Result<()> {
    if text.trim().is_empty() {
        return Err(DetectionError::InputEmpty);
    }
    let len = text.chars().count();
    if len > max_chars {
        return Err(DetectionError::InputTooLong { len, max: max_chars });
    }
    Ok(())
}

// ============ Batch Response ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub ai_generated_count: usize,
    pub mean_ai_probability: f64,
    pub mean_confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDetectResponse {
    pub request_id: String,
    pub results: Vec<DetectionResult>,
    pub summary: BatchSummary,
    pub processing_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serializes_with_breakdown_key() {
        let json = serde_json::to_value(DetectionResult::neutral()).unwrap();
        assert_eq!(json["is_ai_generated"], false);
        assert_eq!(json["confidence"], 0.5);
        assert_eq!(json["analysis_breakdown"]["structural_score"], 0.5);
        assert!(json.get("breakdown").is_none());
    }

    #[test]
    fn test_validate_text_bounds() {
        let ok = DetectRequest { text: "hello".to_string() };
        assert!(ok.validate(DEFAULT_MAX_INPUT_CHARS).is_ok());

        let blank = DetectRequest { text: " \n ".to_string() };
        assert!(matches!(blank.validate(10), Err(DetectionError::InputEmpty)));

        // Limit counts characters, not bytes.
        let accented = DetectRequest { text: "é".repeat(10) };
        assert!(accented.validate(10).is_ok());
        assert!(matches!(
            accented.validate(9),
            Err(DetectionError::InputTooLong { len: 10, max: 9 })
        ));
    }

    #[test]
    fn test_validate_batch_size() {
        let one = BatchDetectRequest { texts: vec!["a".to_string()] };
        assert!(matches!(one.validate(100), Err(DetectionError::BatchSize(1))));

        let two = BatchDetectRequest { texts: vec!["a".to_string(), "b".to_string()] };
        assert!(two.validate(100).is_ok());

        let too_many = BatchDetectRequest { texts: vec!["a".to_string(); BATCH_MAX_TEXTS + 1] };
        assert!(too_many.validate(100).is_err());

        let with_blank = BatchDetectRequest { texts: vec!["a".to_string(), "".to_string()] };
        assert!(matches!(with_blank.validate(100), Err(DetectionError::InputEmpty)));
    }
}
