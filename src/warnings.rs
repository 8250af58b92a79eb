//! User-facing warnings derived from scores, gaps and intent confidence

use crate::types::{Confidence, ConstraintCategory, Intent, ScoreCard, WarningList};

pub const HIGH_HALLUCINATION_RISK: &str = "High hallucination risk: the prompt is vague, so the model is likely \
     to invent details. Add specific names, numbers or context.";
pub const MODERATE_HALLUCINATION_RISK: &str =
    "Moderate hallucination risk: adding concrete details would make the answer more reliable.";
pub const MOST_CONSTRAINTS_MISSING: &str =
    "Most constraints are missing: specify the language, level, output format, scope or examples.";
pub const LOW_CLARITY: &str =
    "Low clarity: rephrase the prompt as complete sentences and add more context.";
pub const UNCLEAR_INTENT: &str =
    "Unclear intent: start with an action verb such as write, explain or compare.";
pub const LOW_CONFIDENCE: &str =
    "Low intent confidence: the type of request could not be determined.";
pub const LOW_QUALITY: &str =
    "Overall prompt quality is low. Consider rewriting it with more detail.";

/// Message listing a handful of missing constraints
pub fn missing_constraints_message(gaps: &[ConstraintCategory]) -> String {
    let names: Vec<&str> = gaps.iter().map(|g| g.label()).collect();
    format!("Missing constraints: {}.", names.join(", "))
}

/// Collect every warning that applies, in priority order
pub fn generate_warnings(scores: &ScoreCard, gaps: &[ConstraintCategory], intent: &Intent) -> WarningList {
    let mut warnings = WarningList::new();

    if scores.specificity <= 3 {
        warnings.push(HIGH_HALLUCINATION_RISK.to_string());
    } else if scores.specificity <= 5 {
        warnings.push(MODERATE_HALLUCINATION_RISK.to_string());
    }

    if gaps.len() >= 4 {
        warnings.push(MOST_CONSTRAINTS_MISSING.to_string());
    } else if gaps.len() >= 2 {
        warnings.push(missing_constraints_message(gaps));
    }

    if scores.clarity <= 3 {
        warnings.push(LOW_CLARITY.to_string());
    }

    if scores.intent_alignment <= 3 {
        warnings.push(UNCLEAR_INTENT.to_string());
    }

    if intent.confidence == Confidence::Low {
        warnings.push(LOW_CONFIDENCE.to_string());
    }

    if scores.total <= 12 {
        warnings.push(LOW_QUALITY.to_string());
    }

    warnings
}
