// Pattern Matcher
// Scores text against the lexical cues of the signal table.

use super::signal_table::{SignalKind, SignalTable};
use crate::models::IndicatorMatch;
use std::sync::Arc;

/// Neutral starting point: no evidence either way.
pub const PATTERN_BASELINE: f64 = 0.5;
/// Contribution of one match is `weight * MATCH_SCALE`.
pub const MATCH_SCALE: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct PatternMatcher {
    table: Arc<SignalTable>,
}

impl PatternMatcher {
    pub fn new(table: Arc<SignalTable>) -> Self {
        Self { table }
    }

    /// Pattern score in `[0, 1]`.
    pub fn score(&self, text: &str) -> f64 {
        let score = self.table.signals().fold(PATTERN_BASELINE, |acc, signal| {
            let matches = signal.count_matches(text);
            acc + matches as f64 * signal.weight() * MATCH_SCALE
        });
        score.clamp(0.0, 1.0)
    }

    /// Every cue that matched, split by kind, with the matched substrings.
    pub fn indicators(&self, text: &str) -> (Vec<IndicatorMatch>, Vec<IndicatorMatch>) {
        let mut ai = Vec::new();
        let mut human = Vec::new();
        for signal in self.table.signals() {
            let matches = signal.find_matches(text);
            if matches.is_empty() {
                continue;
            }
            let indicator = IndicatorMatch {
                pattern: signal.pattern().to_string(),
                count: matches.len(),
                matches: matches.into_iter().map(str::to_string).collect(),
                weight: signal.weight(),
            };
            match signal.kind() {
                SignalKind::AiIndicative => ai.push(indicator),
                SignalKind::HumanIndicative => human.push(indicator),
            }
        }
        (ai, human)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::detection::signal_table::{SignalDefinition, StructuralCues};

    fn matcher() -> PatternMatcher {
        PatternMatcher::new(SignalTable::shared())
    }

    #[test]
    fn test_no_matches_is_neutral() {
        assert_eq!(matcher().score(""), PATTERN_BASELINE);
        assert_eq!(matcher().score("The cat sat on the mat."), PATTERN_BASELINE);
    }

    #[test]
    fn test_ai_phrases_raise_score() {
        // furthermore..moreover 0.8, two hype words 0.6, in conclusion 0.5,
        // paradigm shift 0.6, methodology 0.3
        let text = "Furthermore, moreover, additionally, it is important to note the comprehensive, \
                    cutting-edge, state-of-the-art methodology. In conclusion, this represents a paradigm shift.";
        let score = matcher().score(text);
        assert!((score - 0.78).abs() < 1e-9, "score = {score}");
    }

    #[test]
    fn test_slang_lowers_score() {
        // lol/tbh/haha 3 x -0.7, kinda/wanna 2 x -0.5, one emoticon -0.6
        let score = matcher().score("lol idk, kinda wanna just chill tbh :) haha that's so random");
        assert!((score - 0.13).abs() < 1e-9, "score = {score}");
    }

    #[test]
    fn test_score_is_clamped() {
        let text = "lol haha omg wtf tbh imo ".repeat(20);
        assert_eq!(matcher().score(&text), 0.0);
        let text = "As an AI, I cannot. ".repeat(20);
        assert_eq!(matcher().score(&text), 1.0);
    }

    #[test]
    fn test_numbered_lines_match_across_lines() {
        let text = "Steps:\n1. Plan\n2. Build\n3. Ship";
        assert!((matcher().score(text) - (0.5 + 3.0 * 0.03)).abs() < 1e-9);
    }

    #[test]
    fn test_custom_table() {
        let ai = SignalDefinition::new(r"\bsynergy\b", 1.0, false).unwrap();
        let human = SignalDefinition::new(r"\bnah\b", -1.0, false).unwrap();
        let cues = StructuralCues::new(r"^\d+\.", r"\bfirst\b", r"\bhowever\b").unwrap();
        let table = Arc::new(SignalTable::new(vec![ai], vec![human], cues).unwrap());
        let matcher = PatternMatcher::new(table);
        assert!((matcher.score("Synergy synergy") - 0.7).abs() < 1e-9);
        assert!((matcher.score("synergy nah") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_indicators_report_matches() {
        let (ai, human) = matcher().indicators("In conclusion, lol. In summary, haha.");
        assert_eq!(ai.len(), 1);
        assert_eq!(ai[0].count, 2);
        assert_eq!(ai[0].matches, vec!["In conclusion", "In summary"]);
        assert_eq!(human.len(), 1);
        assert_eq!(human[0].count, 2);
        assert!(human[0].weight < 0.0);
    }
}
