//! Core data types for analysis results

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PromptError;

/// Prompt text that has been trimmed and checked to be non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PromptText(String);

impl PromptText {
    pub fn new(text: impl AsRef<str>) -> Result<Self, PromptError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PromptError::EmptyPrompt);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PromptText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromptText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The action category a prompt is requesting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    CodeGeneration,
    Explanation,
    Debugging,
    CreativeWriting,
    DataAnalysis,
    Summarization,
    Translation,
    Comparison,
    Instruction,
    General,
}

impl IntentKind {
    pub const ALL: [IntentKind; 10] = [
        IntentKind::CodeGeneration,
        IntentKind::Explanation,
        IntentKind::Debugging,
        IntentKind::CreativeWriting,
        IntentKind::DataAnalysis,
        IntentKind::Summarization,
        IntentKind::Translation,
        IntentKind::Comparison,
        IntentKind::Instruction,
        IntentKind::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IntentKind::CodeGeneration => "code_generation",
            IntentKind::Explanation => "explanation",
            IntentKind::Debugging => "debugging",
            IntentKind::CreativeWriting => "creative_writing",
            IntentKind::DataAnalysis => "data_analysis",
            IntentKind::Summarization => "summarization",
            IntentKind::Translation => "translation",
            IntentKind::Comparison => "comparison",
            IntentKind::Instruction => "instruction",
            IntentKind::General => "general",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Where an intent verdict came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentSource {
    Rule,
    Ai,
    Hybrid,
}

/// Detected intent with confidence and provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub detected: IntentKind,
    pub confidence: Confidence,
    pub source: IntentSource,
}

impl Intent {
    pub fn new(detected: IntentKind, confidence: Confidence, source: IntentSource) -> Self {
        Self {
            detected,
            confidence,
            source,
        }
    }
}

impl Default for Intent {
    fn default() -> Self {
        Self::new(IntentKind::General, Confidence::Low, IntentSource::Rule)
    }
}

/// A constraint a well-formed prompt usually pins down.
///
/// The declaration order is the canonical gap order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintCategory {
    Language,
    Level,
    OutputFormat,
    Scope,
    Examples,
}

impl ConstraintCategory {
    pub const ALL: [ConstraintCategory; 5] = [
        ConstraintCategory::Language,
        ConstraintCategory::Level,
        ConstraintCategory::OutputFormat,
        ConstraintCategory::Scope,
        ConstraintCategory::Examples,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConstraintCategory::Language => "language",
            ConstraintCategory::Level => "level",
            ConstraintCategory::OutputFormat => "output_format",
            ConstraintCategory::Scope => "scope",
            ConstraintCategory::Examples => "examples",
        }
    }

    /// Name used in user-facing messages
    pub fn label(self) -> &'static str {
        match self {
            ConstraintCategory::OutputFormat => "output format",
            other => other.as_str(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|category| category.as_str() == name)
    }
}

impl fmt::Display for ConstraintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type GapSet = Vec<ConstraintCategory>;

pub type SuggestionMap = BTreeMap<ConstraintCategory, Vec<String>>;

pub type WarningList = Vec<String>;

/// Missing constraints together with the chips offered to fill them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapReport {
    pub gaps: GapSet,
    pub suggestions: SuggestionMap,
}

/// Upper bound of every score dimension
pub const MAX_DIMENSION_SCORE: u8 = 10;

/// Four 0-10 quality dimensions and their sum.
///
/// Deserialization rejects out-of-range dimensions and a `total` that is not
/// their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub clarity: u8,
    pub completeness: u8,
    pub specificity: u8,
    pub intent_alignment: u8,
    pub total: u8,
}

impl ScoreCard {
    /// Build a card whose total is always the sum of its parts.
    /// Dimensions above 10 are clamped.
    pub fn new(clarity: u8, completeness: u8, specificity: u8, intent_alignment: u8) -> Self {
        let clarity = clarity.min(MAX_DIMENSION_SCORE);
        let completeness = completeness.min(MAX_DIMENSION_SCORE);
        let specificity = specificity.min(MAX_DIMENSION_SCORE);
        let intent_alignment = intent_alignment.min(MAX_DIMENSION_SCORE);
        Self {
            clarity,
            completeness,
            specificity,
            intent_alignment,
            total: clarity + completeness + specificity + intent_alignment,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScoreCard {
    clarity: u8,
    completeness: u8,
    specificity: u8,
    intent_alignment: u8,
    total: u8,
}

impl RawScoreCard {
    fn validate(self) -> Result<ScoreCard, PromptError> {
        let dimensions = [self.clarity, self.completeness, self.specificity, self.intent_alignment];
        if dimensions.iter().any(|d| *d > MAX_DIMENSION_SCORE) {
            return Err(PromptError::InvalidScores(format!(
                "dimension above {}: {:?}",
                MAX_DIMENSION_SCORE, dimensions
            )));
        }

        let card = ScoreCard::new(self.clarity, self.completeness, self.specificity, self.intent_alignment);
        if card.total != self.total {
            return Err(PromptError::InvalidScores(format!(
                "total {} does not match sum {}",
                self.total, card.total
            )));
        }
        Ok(card)
    }
}

impl<'de> Deserialize<'de> for ScoreCard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        RawScoreCard::deserialize(deserializer)?
            .validate()
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftResult {
    pub drift_detected: bool,
    pub drift_warning: String,
}

impl DriftResult {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Output of the combined analysis entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub intent: Intent,
    pub gaps: GapSet,
    pub suggestions: SuggestionMap,
    pub scores: ScoreCard,
    pub warnings: WarningList,
    /// Rewrite proposed by the AI layer, if it produced an acceptable one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refined: Option<String>,
}

/// Output of the refine entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refinement {
    pub refined_text: String,
    #[serde(flatten)]
    pub analysis: Analysis,
    pub drift_detected: bool,
    pub drift_warning: String,
}

/// A user-chosen value for a constraint: either one string or several
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstraintValue {
    One(String),
    Many(Vec<String>),
}

impl ConstraintValue {
    /// Non-blank trimmed values
    pub fn values(&self) -> Vec<&str> {
        let values: Vec<&str> = match self {
            ConstraintValue::One(value) => vec![value.trim()],
            ConstraintValue::Many(values) => values.iter().map(|v| v.trim()).collect(),
        };
        values.into_iter().filter(|v| !v.is_empty()).collect()
    }

    pub fn is_blank(&self) -> bool {
        self.values().is_empty()
    }
}

pub type ConstraintSelection = BTreeMap<ConstraintCategory, ConstraintValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_text_trims_and_rejects_empty() {
        assert_eq!(PromptText::new("  hello \n").unwrap().as_str(), "hello");
        assert!(matches!(PromptText::new("   "), Err(PromptError::EmptyPrompt)));
    }

    #[test]
    fn test_score_card_serializes_camel_case() {
        let json = serde_json::to_string(&ScoreCard::new(1, 2, 3, 4)).unwrap();
        assert!(json.contains("\"intentAlignment\":4"));
        assert!(json.contains("\"total\":10"));
    }

    #[test]
    fn test_score_card_clamps_dimensions() {
        let card = ScoreCard::new(100, 200, 255, 11);
        assert_eq!(card, ScoreCard::new(10, 10, 10, 10));
        assert_eq!(card.total, 40);
    }

    #[test]
    fn test_score_card_deserialize_checks_total() {
        let card: ScoreCard = serde_json::from_str(
            r#"{"clarity":1,"completeness":2,"specificity":3,"intentAlignment":4,"total":10}"#,
        )
        .unwrap();
        assert_eq!(card, ScoreCard::new(1, 2, 3, 4));

        let err = serde_json::from_str::<ScoreCard>(
            r#"{"clarity":1,"completeness":1,"specificity":1,"intentAlignment":1,"total":99}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not match"));

        assert!(serde_json::from_str::<ScoreCard>(
            r#"{"clarity":11,"completeness":0,"specificity":0,"intentAlignment":0,"total":11}"#,
        )
        .is_err());
    }

    #[test]
    fn test_suggestion_map_keys_serialize_as_names() {
        let mut map = SuggestionMap::new();
        map.insert(ConstraintCategory::OutputFormat, vec!["Table".to_string()]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"output_format":["Table"]}"#);
    }

    #[test]
    fn test_constraint_selection_accepts_string_or_list() {
        let selection: ConstraintSelection =
            serde_json::from_str(r#"{"language": "Rust", "examples": ["One", " "], "scope": ""}"#)
                .unwrap();
        assert_eq!(selection[&ConstraintCategory::Language].values(), vec!["Rust"]);
        assert_eq!(selection[&ConstraintCategory::Examples].values(), vec!["One"]);
        assert!(selection[&ConstraintCategory::Scope].is_blank());
    }
}
