// Linguistic Feature Extractor
// Normalized sentence- and word-level metrics; their mean is the linguistic score.

use super::component::ComponentScore;
use crate::error::{DetectionError, Result};
use crate::services::text_processor::{
    coefficient_of_variation, mean, split_sentences, std_dev, tokenize_words,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-sentence complexity is `(words + 2 * commas) / COMPLEXITY_SCALE`.
const COMPLEXITY_SCALE: f64 = 20.0;
/// Mean word lengths are rescaled so `MIN_WORD_LEN` maps to 0 and
/// `MAX_WORD_LEN` to 1.
const MIN_WORD_LEN: f64 = 3.0;
const MAX_WORD_LEN: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub length_consistency: f64,
    pub vocabulary_sophistication: f64,
    pub word_repetition: f64,
    pub complexity_variation: f64,
}

impl FeatureVector {
    pub fn neutral() -> Self {
        Self {
            length_consistency: 0.5,
            vocabulary_sophistication: 0.5,
            word_repetition: 0.5,
            complexity_variation: 0.5,
        }
    }

    fn values(&self) -> [(&'static str, f64); 4] {
        [
            ("length_consistency", self.length_consistency),
            ("vocabulary_sophistication", self.vocabulary_sophistication),
            ("word_repetition", self.word_repetition),
            ("complexity_variation", self.complexity_variation),
        ]
    }

    /// Arithmetic mean of the metrics, clamped to `[0, 1]`.
    pub fn score(&self) -> f64 {
        let values = self.values().map(|(_, v)| v);
        (values.iter().sum::<f64>() / values.len() as f64).clamp(0.0, 1.0)
    }
}

/// Extract the feature vector.
///
/// Fails with `EmptyOrDegenerateInput` when the text has no sentences or no
/// words, and with `TokenizationFailure` if no word contains a letter or a
/// metric comes out non-finite.
pub fn extract_features(text: &str) -> Result<FeatureVector> {
    let sentences = split_sentences(text);
    let words = tokenize_words(text);
    if sentences.is_empty() || words.is_empty() {
        return Err(DetectionError::EmptyOrDegenerateInput);
    }
    if !words.iter().any(|w| w.chars().any(char::is_alphabetic)) {
        return Err(DetectionError::TokenizationFailure(
            "no alphabetic content".to_string(),
        ));
    }

    // Lower variation in sentence length reads as more AI-like.
    let sentence_lengths: Vec<f64> = sentences.iter().map(|s| s.word_count() as f64).collect();
    let length_consistency = if sentence_lengths.len() > 1 {
        match coefficient_of_variation(&sentence_lengths) {
            Some(cv) => 1.0 - cv.min(1.0),
            None => 0.5,
        }
    } else {
        0.5
    };

    let word_lengths: Vec<f64> = words.iter().map(|w| w.chars().count() as f64).collect();
    let avg_word_length = mean(&word_lengths).unwrap_or(0.0);
    let vocabulary_sophistication =
        ((avg_word_length - MIN_WORD_LEN) / (MAX_WORD_LEN - MIN_WORD_LEN)).clamp(0.0, 1.0);

    let mut freq: HashMap<String, usize> = HashMap::new();
    for w in &words {
        *freq.entry(w.to_lowercase()).or_insert(0) += 1;
    }
    let max_freq = freq.values().copied().max().unwrap_or(0);
    let word_repetition = (max_freq as f64 / words.len() as f64).min(1.0);

    let complexity: Vec<f64> = sentences
        .iter()
        .map(|s| {
            let raw = (s.word_count() + 2 * s.comma_count()) as f64 / COMPLEXITY_SCALE;
            raw.min(1.0)
        })
        .collect();
    let complexity_variation = 1.0 - std_dev(&complexity);

    let features = FeatureVector {
        length_consistency,
        vocabulary_sophistication,
        word_repetition,
        complexity_variation,
    };
    if let Some((name, _)) = features.values().iter().find(|(_, v)| !v.is_finite()) {
        return Err(DetectionError::TokenizationFailure(format!("{name} is not finite")));
    }
    Ok(features)
}

/// Feature vector, or the neutral vector when extraction fails.
pub fn features(text: &str) -> FeatureVector {
    extract_features(text).unwrap_or_else(|_| FeatureVector::neutral())
}

/// Linguistic contribution to the score triple; degenerate text is neutral.
pub fn linguistic_score(text: &str) -> ComponentScore {
    ComponentScore::from_result(extract_features(text).map(|f| f.score()))
}
