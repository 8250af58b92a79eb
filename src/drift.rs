//! Drift detection - Keyword retention between an original and a refined prompt

use std::sync::LazyLock;

use ahash::AHashSet;

use crate::lexicon::STOP_WORDS;
use crate::types::DriftResult;

/// Retention below this ratio counts as drift
pub const DRIFT_THRESHOLD: f64 = 0.4;

/// Tokens this short carry no topic signal
const MIN_KEYWORD_LEN: usize = 3;

static STOP_WORD_SET: LazyLock<AHashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// Extract topic keywords, keeping duplicates and input order
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.len() >= MIN_KEYWORD_LEN)
        .filter(|token| !STOP_WORD_SET.contains(token))
        .map(str::to_string)
        .collect()
}

/// Fraction of original keywords that survive in the refined text (0.0-1.0).
///
/// Returns `None` when the original has no keywords to measure against.
pub fn keyword_retention(original: &str, refined: &str) -> Option<f64> {
    let original_keywords = extract_keywords(original);
    if original_keywords.is_empty() {
        return None;
    }

    let refined_keywords = extract_keywords(refined);
    let refined_set: AHashSet<&str> = refined_keywords.iter().map(String::as_str).collect();

    let retained = original_keywords
        .iter()
        .filter(|k| refined_set.contains(k.as_str()))
        .count();

    Some(retained as f64 / original_keywords.len() as f64)
}

/// Compare an original prompt with its refined version
pub fn detect_drift(original: &str, refined: &str) -> DriftResult {
    let Some(overlap) = keyword_retention(original, refined) else {
        return DriftResult::none();
    };

    if overlap >= DRIFT_THRESHOLD {
        return DriftResult::none();
    }

    let percent = (overlap * 100.0).round() as u32;
    DriftResult {
        drift_detected: true,
        drift_warning: format!(
            "Prompt drift detected: only {percent}% of the original keywords remain in the refined prompt. \
             It may no longer ask for what you originally wanted."
        ),
    }
}
