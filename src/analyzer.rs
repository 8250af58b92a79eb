//! Analyzer strategies - Rule-based pipeline and the optional AI-backed layer
//!
//! [`RuleBasedAnalyzer`] chains the pure passes (classify, gaps, score,
//! warnings, drift). [`EnhancedAnalyzer`] makes one call to an external
//! [`Generator`] and only trusts the reply if it validates completely;
//! anything else yields the rule-based result unchanged.

use std::collections::HashMap;

use serde::Deserialize;

use crate::config::{AnalyzerConfig, MIN_SUGGESTIONS};
use crate::drift::detect_drift;
use crate::gaps::detect_gaps;
use crate::intent::{classify, classify_with_trigger, is_general};
use crate::lexicon::default_suggestions;
use crate::scoring::score;
use crate::types::{
    Analysis, Confidence, ConstraintCategory, ConstraintSelection, GapReport, GapSet, Intent,
    IntentKind, IntentSource, PromptText, Refinement, SuggestionMap,
};
use crate::warnings::generate_warnings;

/// External text generator. `None` means unavailable; it must never panic.
pub trait Generator: Send + Sync {
    fn generate(&self, prompt: &str) -> Option<String>;
}

impl<F> Generator for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn generate(&self, prompt: &str) -> Option<String> {
        self(prompt)
    }
}

/// Generator that is never available
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGenerator;

impl Generator for NullGenerator {
    fn generate(&self, _prompt: &str) -> Option<String> {
        None
    }
}

pub trait TextAnalyzer: Send + Sync {
    /// Combined analysis: intent, gaps, suggestions, scores and warnings
    fn analyze(&self, text: &PromptText) -> Analysis;

    /// Fold the selected constraints into the prompt and analyze the result
    fn refine(&self, original: &PromptText, constraints: &ConstraintSelection) -> Refinement;

    fn name(&self) -> &'static str {
        "unknown"
    }
}

/// Score and warn over an already-decided intent and gap report
fn build_analysis(text: &str, intent: Intent, report: GapReport, max_suggestions: usize) -> Analysis {
    let GapReport {
        gaps,
        mut suggestions,
    } = report;
    for values in suggestions.values_mut() {
        values.truncate(max_suggestions);
    }

    let scores = score(text, &gaps);
    let warnings = generate_warnings(&scores, &gaps, &intent);

    Analysis {
        intent,
        gaps,
        suggestions,
        scores,
        warnings,
        refined: None,
    }
}

fn constraint_clause(category: ConstraintCategory, value: &str) -> String {
    match category {
        ConstraintCategory::Language => format!("Language: {value}."),
        ConstraintCategory::Level => format!("Target level: {value}."),
        ConstraintCategory::OutputFormat => format!("Output format: {value}."),
        ConstraintCategory::Scope => format!("Scope: {value}."),
        ConstraintCategory::Examples => format!("Examples: {value}."),
    }
}

/// Append one sentence per selected constraint, in category order.
///
/// Each sentence names its own category so the gap detector reads it as
/// present. Blank selections are ignored.
pub fn apply_constraints(original: &str, constraints: &ConstraintSelection) -> String {
    let clauses: Vec<String> = constraints
        .iter()
        .filter_map(|(category, value)| {
            let values = value.values();
            if values.is_empty() {
                return None;
            }
            Some(constraint_clause(*category, &values.join(", ")))
        })
        .collect();

    if clauses.is_empty() {
        return original.to_string();
    }
    format!("{}\n\n{}", original, clauses.join(" "))
}

fn is_selected(constraints: &ConstraintSelection, category: ConstraintCategory) -> bool {
    constraints.get(&category).is_some_and(|value| !value.is_blank())
}

/// Shared tail of every refine flow: analyze the refined text, drop the gaps
/// the user filled, and prepend any drift warning.
fn finish_refinement(
    original: &PromptText,
    refined_text: String,
    constraints: &ConstraintSelection,
    max_suggestions: usize,
) -> Refinement {
    let mut report = detect_gaps(&refined_text);
    report.gaps.retain(|gap| !is_selected(constraints, *gap));
    report
        .suggestions
        .retain(|gap, _| !is_selected(constraints, *gap));

    let intent = classify(&refined_text);
    let mut analysis = build_analysis(&refined_text, intent, report, max_suggestions);

    let drift = detect_drift(original.as_str(), &refined_text);
    if drift.drift_detected {
        tracing::debug!("refined prompt drifted from the original");
        analysis.warnings.insert(0, drift.drift_warning.clone());
    }

    Refinement {
        refined_text,
        analysis,
        drift_detected: drift.drift_detected,
        drift_warning: drift.drift_warning,
    }
}

/// Deterministic analyzer built only from the keyword passes
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAnalyzer {
    config: AnalyzerConfig,
}

impl RuleBasedAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }
}

impl TextAnalyzer for RuleBasedAnalyzer {
    fn analyze(&self, text: &PromptText) -> Analysis {
        let (intent, trigger) = classify_with_trigger(text.as_str());
        let report = detect_gaps(text.as_str());
        let analysis = build_analysis(text.as_str(), intent, report, self.config.max_suggestions);

        tracing::debug!(
            intent = intent.detected.as_str(),
            trigger = trigger.unwrap_or("-"),
            gaps = analysis.gaps.len(),
            total = analysis.scores.total,
            "rule-based analysis"
        );
        analysis
    }

    fn refine(&self, original: &PromptText, constraints: &ConstraintSelection) -> Refinement {
        let refined_text = apply_constraints(original.as_str(), constraints);
        finish_refinement(original, refined_text, constraints, self.config.max_suggestions)
    }

    fn name(&self) -> &'static str {
        "rule_based"
    }
}

#[derive(Debug, Deserialize)]
struct CombinedResponse {
    intent: String,
    gaps: Vec<String>,
    suggestions: HashMap<String, Vec<String>>,
    refined: String,
}

#[derive(Debug, Deserialize)]
struct RefineResponse {
    refined: String,
}

/// A combined reply that passed validation
#[derive(Debug, Clone, PartialEq)]
struct AcceptedAnalysis {
    intent: IntentKind,
    gaps: GapSet,
    suggestions: SuggestionMap,
    refined: String,
}

/// Models often wrap JSON in a markdown fence
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Clean a suggestion list: trim, drop blanks and duplicates, pad from the
/// static defaults up to the minimum, then cap.
fn normalize_suggestions(category: ConstraintCategory, values: &[String], max: usize) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    let candidates = values
        .iter()
        .map(|v| v.trim())
        .chain(default_suggestions(category).iter().copied());

    for (index, value) in candidates.enumerate() {
        let from_defaults = index >= values.len();
        if from_defaults && cleaned.len() >= MIN_SUGGESTIONS {
            break;
        }
        if value.is_empty() || cleaned.iter().any(|c| c.eq_ignore_ascii_case(value)) {
            continue;
        }
        cleaned.push(value.to_string());
    }

    cleaned.truncate(max);
    cleaned
}

fn parse_combined(raw: &str, max_suggestions: usize) -> Option<AcceptedAnalysis> {
    let response: CombinedResponse = serde_json::from_str(strip_code_fence(raw)).ok()?;

    let intent = IntentKind::from_name(&response.intent)?;

    let mut gaps = response
        .gaps
        .iter()
        .map(|name| ConstraintCategory::from_name(name))
        .collect::<Option<GapSet>>()?;
    gaps.sort();
    gaps.dedup();

    let by_category: HashMap<ConstraintCategory, &Vec<String>> = response
        .suggestions
        .iter()
        .filter_map(|(name, values)| ConstraintCategory::from_name(name).map(|c| (c, values)))
        .collect();

    let mut suggestions = SuggestionMap::new();
    for gap in &gaps {
        let values = by_category.get(gap)?;
        if values.iter().all(|v| v.trim().is_empty()) {
            return None;
        }
        suggestions.insert(*gap, normalize_suggestions(*gap, values, max_suggestions));
    }

    let refined = response.refined.trim();
    if refined.is_empty() {
        return None;
    }

    Some(AcceptedAnalysis {
        intent,
        gaps,
        suggestions,
        refined: refined.to_string(),
    })
}

fn parse_refined(raw: &str) -> Option<String> {
    let response: RefineResponse = serde_json::from_str(strip_code_fence(raw)).ok()?;
    let refined = response.refined.trim();
    (!refined.is_empty()).then(|| refined.to_string())
}

/// Combine the rule verdict with the model's verdict
fn merge_intent(rule: Intent, ai: IntentKind) -> Intent {
    if ai == IntentKind::General {
        rule
    } else if rule.detected == ai {
        Intent::new(ai, Confidence::High, IntentSource::Hybrid)
    } else if is_general(&rule) {
        Intent::new(ai, Confidence::Medium, IntentSource::Ai)
    } else {
        rule
    }
}

fn names<T: Copy>(items: &[T], name: impl Fn(T) -> &'static str) -> String {
    items.iter().map(|i| name(*i)).collect::<Vec<_>>().join(", ")
}

fn combined_prompt(text: &str) -> String {
    format!(
        "You review prompts written for an AI assistant.\n\
         Classify the intent as one of: {intents}.\n\
         List which of these constraints the prompt leaves unspecified: {categories}.\n\
         For every missing constraint give 3 to 6 short values the user could pick.\n\
         Finally rewrite the prompt so it is clear and specific without changing what it asks for.\n\
         Reply with only a JSON object: \
         {{\"intent\": \"...\", \"gaps\": [\"...\"], \"suggestions\": {{\"<gap>\": [\"...\"]}}, \"refined\": \"...\"}}\n\n\
         Prompt:\n{text}",
        intents = names(&IntentKind::ALL, IntentKind::as_str),
        categories = names(&ConstraintCategory::ALL, ConstraintCategory::as_str),
    )
}

fn refine_prompt(original: &str, constraints: &ConstraintSelection) -> String {
    let requested = apply_constraints("", constraints);
    format!(
        "Rewrite the prompt below so it is clear and specific and incorporates these constraints: {}\n\
         Keep the original request intact.\n\
         Reply with only a JSON object: {{\"refined\": \"...\"}}\n\n\
         Prompt:\n{original}",
        requested.trim(),
    )
}

/// Analyzer that asks a [`Generator`] for a combined verdict and falls back
/// to [`RuleBasedAnalyzer`] whenever the reply is missing or malformed.
pub struct EnhancedAnalyzer<G: Generator> {
    generator: G,
    fallback: RuleBasedAnalyzer,
    config: AnalyzerConfig,
}

impl<G: Generator> EnhancedAnalyzer<G> {
    pub fn new(generator: G) -> Self {
        Self::with_config(generator, AnalyzerConfig::default())
    }

    pub fn with_config(generator: G, config: AnalyzerConfig) -> Self {
        let config = config.normalized();
        Self {
            generator,
            fallback: RuleBasedAnalyzer::with_config(config.clone()),
            config,
        }
    }

    fn call(&self, prompt: &str) -> Option<String> {
        if !self.config.ai_enabled {
            return None;
        }
        self.generator.generate(prompt)
    }
}

impl<G: Generator> TextAnalyzer for EnhancedAnalyzer<G> {
    fn analyze(&self, text: &PromptText) -> Analysis {
        let rule_based = self.fallback.analyze(text);

        let Some(raw) = self.call(&combined_prompt(text.as_str())) else {
            tracing::debug!("generator unavailable, using rule-based analysis");
            return rule_based;
        };

        let Some(accepted) = parse_combined(&raw, self.config.max_suggestions) else {
            tracing::warn!("Discarding malformed generator reply ({} bytes)", raw.len());
            return rule_based;
        };

        let intent = merge_intent(rule_based.intent, accepted.intent);
        let report = GapReport {
            gaps: accepted.gaps,
            suggestions: accepted.suggestions,
        };
        let mut analysis = build_analysis(text.as_str(), intent, report, self.config.max_suggestions);
        analysis.refined = Some(accepted.refined);

        tracing::debug!(
            intent = analysis.intent.detected.as_str(),
            gaps = analysis.gaps.len(),
            total = analysis.scores.total,
            "enhanced analysis"
        );
        analysis
    }

    fn refine(&self, original: &PromptText, constraints: &ConstraintSelection) -> Refinement {
        let refined_text = self
            .call(&refine_prompt(original.as_str(), constraints))
            .and_then(|raw| {
                let parsed = parse_refined(&raw);
                if parsed.is_none() {
                    tracing::warn!("Discarding malformed generator refinement ({} bytes)", raw.len());
                }
                parsed
            })
            .unwrap_or_else(|| apply_constraints(original.as_str(), constraints));

        finish_refinement(original, refined_text, constraints, self.config.max_suggestions)
    }

    fn name(&self) -> &'static str {
        "enhanced"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConstraintValue;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn prompt(text: &str) -> PromptText {
        PromptText::new(text).unwrap()
    }

    const VALID_REPLY: &str = r#"```json
{
  "intent": "explanation",
  "gaps": ["examples", "level", "level"],
  "suggestions": {
    "level": ["Beginner", "  ", "beginner"],
    "examples": ["Two short snippets", "A counter closure", "None", "Lots", "More", "Even more", "Too many"]
  },
  "refined": "Explain closures in JavaScript for a beginner, with two short examples."
}
```"#;

    #[test]
    fn test_rule_based_analysis() {
        let analysis = RuleBasedAnalyzer::new().analyze(&prompt("Explain closures in JavaScript"));
        assert_eq!(analysis.intent.detected, IntentKind::Explanation);
        assert_eq!(analysis.intent.source, IntentSource::Rule);
        assert_eq!(analysis.gaps.len(), 4);
        assert_eq!(analysis.suggestions.len(), 4);
        assert_eq!(analysis.refined, None);
        assert_eq!(analysis.warnings[1], crate::warnings::MOST_CONSTRAINTS_MISSING);
    }

    #[test]
    fn test_max_suggestions_caps_defaults() {
        let config = AnalyzerConfig {
            max_suggestions: 3,
            ..AnalyzerConfig::default()
        };
        let analysis = RuleBasedAnalyzer::with_config(config).analyze(&prompt("hello there"));
        for values in analysis.suggestions.values() {
            assert_eq!(values.len(), 3);
        }
    }

    #[test]
    fn test_apply_constraints() {
        let mut selection = ConstraintSelection::new();
        selection.insert(
            ConstraintCategory::OutputFormat,
            ConstraintValue::Many(vec!["Bullet points".into(), "Table".into()]),
        );
        selection.insert(ConstraintCategory::Level, ConstraintValue::One("Beginner".into()));
        selection.insert(ConstraintCategory::Scope, ConstraintValue::One("  ".into()));

        assert_eq!(
            apply_constraints("Explain closures", &selection),
            "Explain closures\n\nTarget level: Beginner. Output format: Bullet points, Table."
        );
        assert_eq!(
            apply_constraints("Explain closures", &ConstraintSelection::new()),
            "Explain closures"
        );
    }

    #[test]
    fn test_rule_based_refine_fills_gaps() {
        let mut selection = ConstraintSelection::new();
        selection.insert(ConstraintCategory::Level, ConstraintValue::One("Beginner".into()));
        selection.insert(ConstraintCategory::OutputFormat, ConstraintValue::One("Table".into()));

        let refinement =
            RuleBasedAnalyzer::new().refine(&prompt("Explain closures in JavaScript"), &selection);
        assert_eq!(
            refinement.analysis.gaps,
            vec![ConstraintCategory::Scope, ConstraintCategory::Examples]
        );
        assert!(!refinement.drift_detected);
        assert!(refinement.drift_warning.is_empty());
        assert!(refinement.refined_text.starts_with("Explain closures in JavaScript"));
    }

    #[test]
    fn test_selected_category_excluded_even_without_indicator() {
        let mut selection = ConstraintSelection::new();
        selection.insert(ConstraintCategory::Language, ConstraintValue::One("Elixir".into()));
        // A generator that drops the constraint sentence entirely.
        let analyzer = EnhancedAnalyzer::new(|_: &str| {
            Some(r#"{"refined": "Explain closures clearly"}"#.to_string())
        });
        let refinement = analyzer.refine(&prompt("Explain closures"), &selection);
        assert_eq!(refinement.refined_text, "Explain closures clearly");
        assert!(!refinement.analysis.gaps.contains(&ConstraintCategory::Language));
        assert!(!refinement
            .analysis
            .suggestions
            .contains_key(&ConstraintCategory::Language));
    }

    #[test]
    fn test_enhanced_accepts_valid_reply() {
        let analyzer = EnhancedAnalyzer::new(|_: &str| Some(VALID_REPLY.to_string()));
        let analysis = analyzer.analyze(&prompt("Explain closures in JavaScript"));

        assert_eq!(
            analysis.intent,
            Intent::new(IntentKind::Explanation, Confidence::High, IntentSource::Hybrid)
        );
        assert_eq!(
            analysis.gaps,
            vec![ConstraintCategory::Level, ConstraintCategory::Examples]
        );
        assert_eq!(
            analysis.suggestions[&ConstraintCategory::Level],
            vec!["Beginner", "Intermediate", "Advanced"]
        );
        assert_eq!(analysis.suggestions[&ConstraintCategory::Examples].len(), 6);
        assert!(analysis.refined.is_some());
    }

    #[test]
    fn test_enhanced_falls_back_on_bad_replies() {
        let text = prompt("Explain closures in JavaScript");
        let expected = RuleBasedAnalyzer::new().analyze(&text);

        let replies = [
            None,
            Some("not json at all".to_string()),
            Some(r#"{"intent": "explanation", "gaps": ["tone"], "suggestions": {}, "refined": "x"}"#.to_string()),
            Some(r#"{"intent": "poetry", "gaps": [], "suggestions": {}, "refined": "x"}"#.to_string()),
            Some(r#"{"intent": "explanation", "gaps": ["level"], "suggestions": {}, "refined": "x"}"#.to_string()),
            Some(r#"{"intent": "explanation", "gaps": [], "suggestions": {}, "refined": "  "}"#.to_string()),
            Some(r#"{"intent": "explanation", "gaps": []}"#.to_string()),
        ];
        for reply in replies {
            let analyzer = EnhancedAnalyzer::new(move |_: &str| reply.clone());
            assert_eq!(analyzer.analyze(&text), expected);
        }
    }

    #[test]
    fn test_disabled_ai_never_calls_generator() {
        let calls = AtomicUsize::new(0);
        let config = AnalyzerConfig {
            ai_enabled: false,
            ..AnalyzerConfig::default()
        };
        let analyzer = EnhancedAnalyzer::with_config(
            |_: &str| {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(VALID_REPLY.to_string())
            },
            config,
        );
        let analysis = analyzer.analyze(&prompt("Explain closures in JavaScript"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(analysis.intent.source, IntentSource::Rule);
    }

    #[test]
    fn test_drift_warning_prepended() {
        let analyzer = EnhancedAnalyzer::new(|_: &str| {
            Some(r#"{"refined": "Tell me about French cooking history"}"#.to_string())
        });
        let refinement = analyzer.refine(
            &prompt("Write a Python function to sort a list"),
            &ConstraintSelection::new(),
        );
        assert!(refinement.drift_detected);
        assert_eq!(refinement.analysis.warnings[0], refinement.drift_warning);
    }

    #[test]
    fn test_merge_intent() {
        let rule = Intent::new(IntentKind::Debugging, Confidence::Medium, IntentSource::Rule);
        assert_eq!(merge_intent(rule, IntentKind::Explanation), rule);
        assert_eq!(merge_intent(rule, IntentKind::General), rule);
        assert_eq!(
            merge_intent(Intent::default(), IntentKind::Translation),
            Intent::new(IntentKind::Translation, Confidence::Medium, IntentSource::Ai)
        );
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_null_generator_is_rule_based() {
        let text = prompt("fix");
        assert_eq!(
            EnhancedAnalyzer::new(NullGenerator).analyze(&text),
            RuleBasedAnalyzer::new().analyze(&text)
        );
    }
}
