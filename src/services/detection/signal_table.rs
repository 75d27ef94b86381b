// Signal Table
// Immutable lexical and structural cue definitions shared by every extractor.
//
// AI-indicative cues carry positive weights, human-indicative cues negative
// ones. The table is built once and handed to components behind an `Arc`.

use crate::error::{DetectionError, Result};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::sync::{Arc, OnceLock};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    AiIndicative,
    HumanIndicative,
}

/// A single weighted lexical cue.
#[derive(Debug, Clone)]
pub struct SignalDefinition {
    pattern: String,
    regex: Regex,
    weight: f64,
}

impl SignalDefinition {
    /// Compile a case-insensitive cue. `multi_line` makes `^`/`$` match at
    /// line boundaries.
    pub fn new(pattern: &str, weight: f64, multi_line: bool) -> Result<Self> {
        if !weight.is_finite() || !(-1.0..=1.0).contains(&weight) {
            return Err(DetectionError::WeightOutOfRange(weight));
        }
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .multi_line(multi_line)
            .build()
            .map_err(|source| DetectionError::InvalidSignal {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            weight,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn kind(&self) -> SignalKind {
        if self.weight < 0.0 {
            SignalKind::HumanIndicative
        } else {
            SignalKind::AiIndicative
        }
    }

    /// Number of non-overlapping matches.
    pub fn count_matches(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    pub fn find_matches<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// Document-level cues used by the structural analyzer.
#[derive(Debug, Clone)]
pub struct StructuralCues {
    pub numbered_line: Regex,
    pub sequential_marker: Regex,
    pub transition_word: Regex,
}

impl StructuralCues {
    pub fn new(numbered_line: &str, sequential_marker: &str, transition_word: &str) -> Result<Self> {
        Ok(Self {
            numbered_line: compile_cue(numbered_line, true)?,
            sequential_marker: compile_cue(sequential_marker, false)?,
            transition_word: compile_cue(transition_word, false)?,
        })
    }

    fn standard() -> Result<Self> {
        Self::new(
            r"^[ \t]*\d+\.",
            r"\b(?:first|second|third|fourth|fifth|finally|in conclusion)\b",
            r"\b(?:however|therefore|furthermore|moreover|additionally|consequently|nevertheless)\b",
        )
    }
}

fn compile_cue(pattern: &str, multi_line: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(multi_line)
        .build()
        .map_err(|source| DetectionError::InvalidSignal {
            pattern: pattern.to_string(),
            source,
        })
}

const AI_SIGNALS: &[(&str, f64)] = &[
    // Strong indicators
    (r"\b(?:as an AI|I don't have personal|I cannot|I'm not able to|I don't actually)\b", 0.9),
    (r"\b(?:furthermore|moreover|additionally|consequently|therefore)\b.*?\b(?:furthermore|moreover|additionally|consequently|therefore)\b", 0.8),
    (r"\b(?:it's important to note|it's worth mentioning|keep in mind)\b", 0.7),
    (r"\b(?:comprehensive guide|step-by-step|in-depth analysis)\b", 0.6),
    // Medium
    (r"\b(?:cutting-edge|state-of-the-art|revolutionary|innovative)\b.*?\b(?:cutting-edge|state-of-the-art|revolutionary|innovative)\b", 0.6),
    (r"\b(?:optimize|streamline|enhance|facilitate|leverage)\b.*?\b(?:optimize|streamline|enhance|facilitate|leverage)\b", 0.5),
    (r"\b(?:in conclusion|to summarize|in summary)\b", 0.5),
    (r"\b(?:paradigm shift|game-changer|unlock potential)\b", 0.6),
    // Subtle
    (r"^\d+\.\s", 0.3),
    (r"\b(?:firstly|secondly|thirdly|finally)\b", 0.4),
    (r"\b(?:methodology|framework|systematic|strategic)\b", 0.3),
];

const HUMAN_SIGNALS: &[(&str, f64)] = &[
    (r"\b(?:I think|I believe|in my opinion|personally|from my experience)\b", -0.4),
    (r"\b(?:um|uh|well|you know|like|actually)\b", -0.6),
    (r"[.!?]{2,}", -0.3),
    (r"\b(?:lol|haha|omg|wtf|tbh|imo)\b", -0.7),
    (r#"['"]\w+['"]\s"#, -0.2),
    (r"\b(?:kinda|sorta|gonna|wanna)\b", -0.5),
    (r"(?::\)|:\(|:D|;\)|xD)", -0.6),
];

#[derive(Debug, Clone)]
pub struct SignalTable {
    ai_signals: Vec<SignalDefinition>,
    human_signals: Vec<SignalDefinition>,
    structural: StructuralCues,
}

impl SignalTable {
    pub fn new(
        ai_signals: Vec<SignalDefinition>,
        human_signals: Vec<SignalDefinition>,
        structural: StructuralCues,
    ) -> Result<Self> {
        if let Some(bad) = ai_signals.iter().find(|s| s.kind() != SignalKind::AiIndicative) {
            return Err(DetectionError::WeightOutOfRange(bad.weight()));
        }
        if let Some(bad) = human_signals.iter().find(|s| s.kind() != SignalKind::HumanIndicative) {
            return Err(DetectionError::WeightOutOfRange(bad.weight()));
        }
        Ok(Self {
            ai_signals,
            human_signals,
            structural,
        })
    }

    /// The English cue set.
    pub fn builtin() -> Result<Self> {
        // AI cues may anchor on line starts (numbered lists).
        let ai = AI_SIGNALS
            .iter()
            .map(|(p, w)| SignalDefinition::new(p, *w, true))
            .collect::<Result<Vec<_>>>()?;
        let human = HUMAN_SIGNALS
            .iter()
            .map(|(p, w)| SignalDefinition::new(p, *w, false))
            .collect::<Result<Vec<_>>>()?;
        Self::new(ai, human, StructuralCues::standard()?)
    }

    /// Process-wide built-in table, compiled on first use.
    pub fn shared() -> Arc<SignalTable> {
        static TABLE: OnceLock<Arc<SignalTable>> = OnceLock::new();
        TABLE
            .get_or_init(|| Arc::new(SignalTable::builtin().expect("built-in signal table")))
            .clone()
    }

    pub fn ai_signals(&self) -> &[SignalDefinition] {
        &self.ai_signals
    }

    pub fn human_signals(&self) -> &[SignalDefinition] {
        &self.human_signals
    }

    pub fn signals(&self) -> impl Iterator<Item = &SignalDefinition> {
        self.ai_signals.iter().chain(self.human_signals.iter())
    }

    pub fn structural(&self) -> &StructuralCues {
        &self.structural
    }
}
