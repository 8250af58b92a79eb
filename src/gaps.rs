//! Constraint gap detection

use std::sync::LazyLock;

use regex::Regex;

use crate::lexicon::{default_suggestions, indicators_for};
use crate::types::{ConstraintCategory, GapReport};

/// Indicators this short are matched on word boundaries only
pub const SHORT_INDICATOR_LEN: usize = 3;

/// Word-boundary patterns for the short indicators, compiled once.
///
/// `\b` cannot be used because indicators such as "c#" and "c++" end in
/// non-word characters, so the boundary is "no ASCII word character
/// (alphanumeric or `_`) on either side" instead.
static SHORT_INDICATOR_PATTERNS: LazyLock<Vec<(ConstraintCategory, Regex)>> = LazyLock::new(|| {
    ConstraintCategory::ALL
        .into_iter()
        .flat_map(|category| {
            indicators_for(category)
                .iter()
                .filter(|i| i.len() <= SHORT_INDICATOR_LEN)
                .map(move |i| {
                    let pattern = format!("(?:^|[^a-z0-9_]){}(?:$|[^a-z0-9_])", regex::escape(i));
                    (category, Regex::new(&pattern).expect("Invalid regex pattern"))
                })
        })
        .collect()
});

/// Whether the lowercased text carries any indicator for `category`
pub fn has_constraint(text_lower: &str, category: ConstraintCategory) -> bool {
    let long_hit = indicators_for(category)
        .iter()
        .filter(|i| i.len() > SHORT_INDICATOR_LEN)
        .any(|i| text_lower.contains(i));

    long_hit
        || SHORT_INDICATOR_PATTERNS
            .iter()
            .filter(|(c, _)| *c == category)
            .any(|(_, pattern)| pattern.is_match(text_lower))
}

/// Detect which constraint categories the prompt leaves unspecified.
///
/// Gaps come back in canonical category order and every gap gets its static
/// default suggestions. Present categories appear in neither output.
pub fn detect_gaps(text: &str) -> GapReport {
    let text_lower = text.to_lowercase();
    let mut report = GapReport::default();

    for category in ConstraintCategory::ALL {
        if has_constraint(&text_lower, category) {
            continue;
        }
        report.gaps.push(category);
        report.suggestions.insert(
            category,
            default_suggestions(category)
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
    }

    report
}
