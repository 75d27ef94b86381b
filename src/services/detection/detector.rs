// AI Detector
// Runs the three independent extractors and fuses their scores.
//
// `detect` is total: component failures degrade that component to neutral,
// a combiner failure degrades the whole verdict to neutral.

use super::classifier::{ScoreCombiner, WeightProfile};
use super::component::ComponentScore;
use super::linguistic::{features, linguistic_score};
use super::pattern_matcher::PatternMatcher;
use super::signal_table::SignalTable;
use super::structural::StructuralAnalyzer;
use crate::error::Result;
use crate::models::{DetailedAnalysis, DetectionResult, ScoreTriple};
use crate::services::config_store::DetectionConfig;
use crate::services::text_processor::{split_sentences, whitespace_word_count};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct AiDetector {
    matcher: PatternMatcher,
    structural: StructuralAnalyzer,
    combiner: ScoreCombiner,
}

impl Default for AiDetector {
    fn default() -> Self {
        Self {
            matcher: PatternMatcher::new(SignalTable::shared()),
            structural: StructuralAnalyzer::new(SignalTable::shared()),
            combiner: ScoreCombiner::default(),
        }
    }
}

impl AiDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: Arc<SignalTable>, profile: WeightProfile) -> Result<Self> {
        Ok(Self {
            matcher: PatternMatcher::new(table.clone()),
            structural: StructuralAnalyzer::new(table),
            combiner: ScoreCombiner::new(profile)?,
        })
    }

    pub fn with_profile(profile: WeightProfile) -> Result<Self> {
        Self::with_table(SignalTable::shared(), profile)
    }

    pub fn from_config(config: &DetectionConfig) -> Result<Self> {
        Self::with_profile(config.weight_profile())
    }

    pub fn profile(&self) -> &WeightProfile {
        self.combiner.profile()
    }

    /// Component scores; each falls back to neutral independently.
    pub fn score_components(&self, text: &str) -> [ComponentScore; 3] {
        [
            ComponentScore::from_value(self.matcher.score(text)),
            linguistic_score(text),
            ComponentScore::from_value(self.structural.score(text)),
        ]
    }

    pub fn detect(&self, text: &str) -> DetectionResult {
        if text.trim().is_empty() {
            debug!("detect.empty_input");
            return DetectionResult::neutral();
        }

        let [pattern, linguistic, structural] = self.score_components(text);
        for (name, component) in [("pattern", &pattern), ("linguistic", &linguistic), ("structural", &structural)] {
            if let Some(reason) = component.reason() {
                warn!(component = name, reason = %reason, "detect.component_neutral");
            }
        }

        let scores = ScoreTriple {
            pattern_score: pattern.value(),
            linguistic_score: linguistic.value(),
            structural_score: structural.value(),
        };
        let result = self.verdict(scores);
        debug!(
            chars = text.chars().count(),
            pattern = scores.pattern_score,
            linguistic = scores.linguistic_score,
            structural = scores.structural_score,
            ai_probability = result.ai_probability,
            confidence = result.confidence,
            "detect.scored"
        );
        result
    }

    /// Fuse a score triple; a combiner failure yields the neutral verdict.
    pub fn verdict(&self, scores: ScoreTriple) -> DetectionResult {
        match self.combiner.classify(scores) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "detect.combiner_failed; returning neutral verdict");
                DetectionResult::neutral()
            }
        }
    }

    /// Verdict plus every matched cue and the raw measurements behind it.
    pub fn detailed_analysis(&self, text: &str) -> DetailedAnalysis {
        let (ai_indicators, human_indicators) = self.matcher.indicators(text);
        DetailedAnalysis {
            text_length: text.chars().count(),
            word_count: whitespace_word_count(text),
            sentence_count: split_sentences(text).len(),
            ai_indicators,
            human_indicators,
            structural_features: self.structural.features(text),
            features: features(text),
            result: self.detect(text),
        }
    }
}
