//! Four-dimension prompt quality scoring
//!
//! All adjustments are integer steps, so the same text and gap set always
//! produce the same card.

use std::sync::LazyLock;

use ahash::AHashSet;
use regex::Regex;

use crate::lexicon::ACTION_VERBS;
use crate::types::{ConstraintCategory, ScoreCard};

static SENTENCE_TERMINATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("Invalid regex pattern"));
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid regex pattern"));
static ACRONYM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{2,}").expect("Invalid regex pattern"));

const MAX_SCORE: i32 = 10;

/// Lexical features every dimension draws from
#[derive(Debug, Clone, PartialEq)]
pub struct TextFeatures {
    pub word_count: usize,
    pub sentence_count: usize,
    pub has_question: bool,
    pub has_period: bool,
    pub has_comma: bool,
    pub diversity: f64,
    pub has_digits: bool,
    pub has_acronym: bool,
    pub has_action_verb: bool,
}

impl TextFeatures {
    pub fn extract(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let word_count = words.len();

        let distinct: AHashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let diversity = if word_count == 0 {
            0.0
        } else {
            distinct.len() as f64 / word_count as f64
        };

        let text_lower = text.to_lowercase();

        Self {
            word_count,
            sentence_count: SENTENCE_TERMINATORS.find_iter(text).count().max(1),
            has_question: text.contains('?'),
            has_period: text.contains('.'),
            has_comma: text.contains(','),
            diversity,
            has_digits: DIGIT_RUN.is_match(text),
            has_acronym: ACRONYM_RUN.is_match(text),
            has_action_verb: ACTION_VERBS.iter().any(|v| text_lower.contains(v)),
        }
    }
}

fn bonus(condition: bool) -> i32 {
    i32::from(condition)
}

fn clamp(value: i32, floor: i32) -> u8 {
    value.clamp(floor, MAX_SCORE) as u8
}

pub fn clarity(f: &TextFeatures) -> u8 {
    let mut score = 3
        + bonus(f.word_count >= 5)
        + bonus(f.word_count >= 10)
        + bonus(f.word_count >= 20)
        + bonus(f.sentence_count >= 2)
        + bonus(f.has_comma)
        + bonus(f.has_question || f.has_period);
    if f.word_count < 3 {
        score = (score - 3).max(1);
    }
    clamp(score, 0)
}

pub fn completeness(f: &TextFeatures, gap_count: usize) -> u8 {
    let score = 10 - 2 * gap_count as i32 + bonus(f.word_count >= 15) + bonus(f.word_count >= 30);
    clamp(score, 1)
}

pub fn specificity(f: &TextFeatures) -> u8 {
    let score = 3
        + bonus(f.diversity > 0.6)
        + bonus(f.diversity > 0.8)
        + bonus(f.word_count >= 8)
        + bonus(f.word_count >= 15)
        + bonus(f.word_count >= 25)
        + bonus(f.has_digits)
        + bonus(f.has_acronym);
    clamp(score, 0)
}

pub fn intent_alignment(f: &TextFeatures) -> u8 {
    let mut score = 4 + 3 * bonus(f.has_action_verb) + bonus(f.has_question) + bonus(f.word_count >= 5);
    if f.word_count < 3 {
        score = (score - 2).max(1);
    }
    clamp(score, 0)
}

/// Score prompt text given the gaps detected for it
pub fn score(text: &str, gaps: &[ConstraintCategory]) -> ScoreCard {
    let features = TextFeatures::extract(text);
    tracing::trace!(?features, gaps = gaps.len(), "scoring prompt");

    ScoreCard::new(
        clarity(&features),
        completeness(&features, gaps.len()),
        specificity(&features),
        intent_alignment(&features),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaps::detect_gaps;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_word_fix() {
        let gaps = detect_gaps("fix").gaps;
        let card = score("fix", &gaps);
        assert_eq!(card.clarity, 1);
        assert_eq!(card.intent_alignment, 5);
        assert_eq!(card.completeness, 1);
        assert_eq!(card.specificity, 5);
        assert_eq!(card.total, 12);
    }

    #[test]
    fn test_features() {
        let f = TextFeatures::extract("Explain, the HTTP 404 error... Why? the end");
        assert_eq!(f.word_count, 8);
        assert_eq!(f.sentence_count, 2);
        assert!(f.has_question && f.has_period && f.has_comma);
        assert!(f.has_digits && f.has_acronym && f.has_action_verb);
        assert!((f.diversity - 7.0 / 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_only_ascii_digits_count() {
        assert!(!TextFeatures::extract("abc \u{663}").has_digits);
        assert_eq!(score("abc \u{663}", &[]).specificity, 5);
        assert!(TextFeatures::extract("abc 3").has_digits);
    }

    #[test]
    fn test_sentence_count_minimum_one() {
        assert_eq!(TextFeatures::extract("no terminator here").sentence_count, 1);
    }

    #[test]
    fn test_detailed_prompt_scores_high() {
        let text = "Write a Python function that parses ISO 8601 dates, validates them, \
                    and returns a list of errors. Target intermediate developers, keep it to at \
                    most 40 lines, and include one example of usage. Can you also explain edge cases?";
        let gaps = detect_gaps(text).gaps;
        let card = score(text, &gaps);
        assert_eq!(card.clarity, 9);
        assert_eq!(card.completeness, 10);
        assert_eq!(card.specificity, 10);
        assert_eq!(card.intent_alignment, 9);
        assert_eq!(card.total, 38);
    }

    #[test]
    fn test_total_is_sum_and_in_range() {
        for text in ["a", "hi there", "Tell me about the weather today, please.", "x y z w v u t s r q p"] {
            let card = score(text, &detect_gaps(text).gaps);
            assert_eq!(
                card.total,
                card.clarity + card.completeness + card.specificity + card.intent_alignment
            );
            for value in [card.clarity, card.specificity, card.intent_alignment] {
                assert!(value <= 10);
            }
            assert!((1..=10).contains(&card.completeness));
            assert!(card.total <= 40);
        }
    }
}
