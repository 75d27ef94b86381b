// Text Processing Service
// Sentence, word and paragraph tokenization shared by the signal extractors

use regex::Regex;
use std::sync::OnceLock;

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[\p{L}\p{N}_]+(?:['\u{2019}\-][\p{L}\p{N}_]+)*").expect("word regex")
    })
}

fn paragraph_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("paragraph regex"))
}

#[derive(Debug, Clone)]
pub struct SentenceOffset {
    pub text: String,
    start: usize,
    end: usize,
}

impl SentenceOffset {
    /// Whitespace-delimited token count, punctuation included.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn comma_count(&self) -> usize {
        self.text.matches(',').count()
    }
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn is_closer(ch: char) -> bool {
    matches!(ch, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}')
}

fn is_list_marker(s: &str) -> bool {
    let trimmed = s.trim();
    let digits = trimmed.trim_end_matches('.');
    !digits.is_empty() && digits.len() < trimmed.len() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Split text into sentences with byte offsets.
///
/// A sentence ends at a run of `.`, `!` or `?` (plus any closing quotes or
/// brackets) followed by whitespace or the end of the text. Bare list markers
/// such as `3.` and fragments without alphanumeric content are folded into the
/// following sentence instead of standing alone.
pub fn split_sentences(text: &str) -> Vec<SentenceOffset> {
    let mut sentences = Vec::new();
    if text.trim().is_empty() {
        return sentences;
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let (_, ch) = chars[i];
        if !is_terminator(ch) {
            i += 1;
            continue;
        }

        // Absorb "?!", "..." and trailing closers into the same sentence.
        let mut j = i + 1;
        while j < chars.len() && (is_terminator(chars[j].1) || is_closer(chars[j].1)) {
            j += 1;
        }
        let end = chars.get(j).map(|(b, _)| *b).unwrap_or(text.len());
        let at_boundary = j >= chars.len() || chars[j].1.is_whitespace();

        if at_boundary {
            let candidate = &text[start..end];
            let has_content = candidate.chars().any(|c| c.is_alphanumeric());
            if has_content && !is_list_marker(candidate) {
                push_sentence(&mut sentences, text, start, end);
                start = end;
            }
        }
        i = j;
    }

    if start < text.len() {
        let rest = &text[start..];
        if rest.chars().any(|c| c.is_alphanumeric()) {
            push_sentence(&mut sentences, text, start, text.len());
        } else if let Some(last) = sentences.last_mut() {
            // Trailing punctuation with no words belongs to the previous sentence.
            last.end = text.len();
            last.text = text[last.start..last.end].trim().to_string();
        }
    }

    sentences
}

fn push_sentence(out: &mut Vec<SentenceOffset>, text: &str, start: usize, end: usize) {
    let raw = &text[start..end];
    let leading = raw.len() - raw.trim_start().len();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    out.push(SentenceOffset {
        text: trimmed.to_string(),
        start: start + leading,
        end: start + leading + trimmed.len(),
    });
}

/// Word tokens: letter/digit runs, keeping inner apostrophes and hyphens
/// (`state-of-the-art`, `that's`).
pub fn tokenize_words(text: &str) -> Vec<&str> {
    word_re().find_iter(text).map(|m| m.as_str()).collect()
}

/// Whitespace-delimited token count, the unit used for densities.
pub fn whitespace_word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Non-blank paragraphs separated by one or more blank lines.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    paragraph_break_re()
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    let Some(mean) = mean(values) else {
        return 0.0;
    };
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Coefficient of variation; `None` when the mean is not positive.
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    if mean <= 0.0 {
        return None;
    }
    Some(std_dev(values) / mean)
}
