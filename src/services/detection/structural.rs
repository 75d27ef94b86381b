// Structural Analyzer
// Document-level organization: lists, sequencing, paragraph uniformity and
// transition density.

use super::signal_table::SignalTable;
use crate::services::text_processor::{coefficient_of_variation, split_paragraphs, whitespace_word_count};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const STRUCTURAL_BASELINE: f64 = 0.5;

const NUMBERED_LIST_MIN: usize = 3;
const NUMBERED_LIST_BONUS: f64 = 0.3;
const SEQUENTIAL_MARKER_MIN: usize = 2;
const SEQUENTIAL_MARKER_BONUS: f64 = 0.2;
const PARAGRAPH_CV_MAX: f64 = 0.5;
const PARAGRAPH_UNIFORMITY_BONUS: f64 = 0.2;
const TRANSITION_DENSITY_MIN: f64 = 0.02;
const TRANSITION_DENSITY_BONUS: f64 = 0.3;

/// Raw structural measurements behind the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralFeatures {
    pub numbered_items: usize,
    pub sequential_markers: usize,
    pub paragraph_count: usize,
    /// Coefficient of variation of paragraph word counts, when there is more
    /// than one paragraph.
    pub paragraph_length_cv: Option<f64>,
    pub transition_words: usize,
    pub word_count: usize,
    pub transition_density: f64,
}

impl StructuralFeatures {
    pub fn score(&self) -> f64 {
        let mut score = STRUCTURAL_BASELINE;
        if self.numbered_items >= NUMBERED_LIST_MIN {
            score += NUMBERED_LIST_BONUS;
        }
        if self.sequential_markers >= SEQUENTIAL_MARKER_MIN {
            score += SEQUENTIAL_MARKER_BONUS;
        }
        if self.paragraph_length_cv.is_some_and(|cv| cv < PARAGRAPH_CV_MAX) {
            score += PARAGRAPH_UNIFORMITY_BONUS;
        }
        if self.transition_density > TRANSITION_DENSITY_MIN {
            score += TRANSITION_DENSITY_BONUS;
        }
        score.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct StructuralAnalyzer {
    table: Arc<SignalTable>,
}

impl StructuralAnalyzer {
    pub fn new(table: Arc<SignalTable>) -> Self {
        Self { table }
    }

    pub fn features(&self, text: &str) -> StructuralFeatures {
        let cues = self.table.structural();

        let paragraphs = split_paragraphs(text);
        let paragraph_length_cv = if paragraphs.len() > 1 {
            let lengths: Vec<f64> = paragraphs
                .iter()
                .map(|p| whitespace_word_count(p) as f64)
                .collect();
            coefficient_of_variation(&lengths)
        } else {
            None
        };

        let word_count = whitespace_word_count(text);
        let transition_words = cues.transition_word.find_iter(text).count();
        let transition_density = if word_count > 0 {
            transition_words as f64 / word_count as f64
        } else {
            0.0
        };

        StructuralFeatures {
            numbered_items: cues.numbered_line.find_iter(text).count(),
            sequential_markers: cues.sequential_marker.find_iter(text).count(),
            paragraph_count: paragraphs.len(),
            paragraph_length_cv,
            transition_words,
            word_count,
            transition_density,
        }
    }

    /// Structural score in `[0, 1]`.
    pub fn score(&self, text: &str) -> f64 {
        self.features(text).score()
    }
}
