//! Intent classifier - First-match keyword scan over the rule table

use crate::lexicon::INTENT_RULES;
use crate::types::{Confidence, Intent, IntentKind, IntentSource};

/// Classify prompt text into an intent category.
///
/// Rules are tried in table order and the first rule with any keyword
/// contained in the lowercased text wins. A rule hit is reported with medium
/// confidence; no hit falls back to `general` with low confidence.
pub fn classify(text: &str) -> Intent {
    let text_lower = text.to_lowercase();

    INTENT_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text_lower.contains(k)))
        .map(|(kind, _)| Intent::new(*kind, Confidence::Medium, IntentSource::Rule))
        .unwrap_or_default()
}

/// Same as [`classify`] but also reports which keyword triggered the rule
pub fn classify_with_trigger(text: &str) -> (Intent, Option<&'static str>) {
    let text_lower = text.to_lowercase();

    for (kind, keywords) in INTENT_RULES {
        if let Some(keyword) = keywords.iter().find(|k| text_lower.contains(*k)) {
            return (
                Intent::new(*kind, Confidence::Medium, IntentSource::Rule),
                Some(*keyword),
            );
        }
    }

    (Intent::default(), None)
}

pub fn is_general(intent: &Intent) -> bool {
    intent.detected == IntentKind::General
}
