//! Analyzer configuration

use serde::{Deserialize, Serialize};

use crate::error::PromptError;

pub const MIN_SUGGESTIONS: usize = 3;
pub const MAX_SUGGESTIONS: usize = 6;

const ENV_AI_ENABLED: &str = "PROMPT_CORE_AI_ENABLED";
const ENV_MAX_SUGGESTIONS: &str = "PROMPT_CORE_MAX_SUGGESTIONS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// When false the enhanced analyzer never calls its generator
    pub ai_enabled: bool,
    /// Cap on chips per gap; clamped to 3-6
    pub max_suggestions: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            ai_enabled: true,
            max_suggestions: MAX_SUGGESTIONS,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json(json: &str) -> Result<Self, PromptError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Read overrides from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(ENV_AI_ENABLED) {
            match parse_bool(&raw) {
                Some(value) => config.ai_enabled = value,
                None => tracing::warn!("Ignoring invalid {}: {}", ENV_AI_ENABLED, raw),
            }
        }

        if let Ok(raw) = std::env::var(ENV_MAX_SUGGESTIONS) {
            match raw.trim().parse::<usize>() {
                Ok(value) => config.max_suggestions = value,
                Err(_) => tracing::warn!("Ignoring invalid {}: {}", ENV_MAX_SUGGESTIONS, raw),
            }
        }

        config.normalized()
    }

    pub fn normalized(mut self) -> Self {
        self.max_suggestions = self.max_suggestions.clamp(MIN_SUGGESTIONS, MAX_SUGGESTIONS);
        self
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
