//! Prompt core - Rule-based analysis of prompts written for AI models
//!
//! This crate provides intent classification, constraint gap detection,
//! quality scoring, warnings and drift detection for prompt text. Every
//! analysis pass is a pure function; the optional AI layer in [`analyzer`]
//! always degrades to the rule-based result.

pub mod types;
pub mod error;
pub mod lexicon;
pub mod intent;
pub mod gaps;
pub mod scoring;
pub mod warnings;
pub mod drift;
pub mod analyzer;
pub mod config;
pub mod logging;

pub use types::*;
pub use error::PromptError;
pub use intent::classify;
pub use gaps::detect_gaps;
pub use scoring::score;
pub use warnings::generate_warnings;
pub use drift::detect_drift;
pub use analyzer::{apply_constraints, EnhancedAnalyzer, Generator, NullGenerator, RuleBasedAnalyzer, TextAnalyzer};
pub use config::AnalyzerConfig;
pub use logging::init_logging;

// Python bindings
#[cfg(feature = "extension-module")]
pub mod py;

#[cfg(feature = "extension-module")]
use pyo3::prelude::*;

#[cfg(feature = "extension-module")]
#[pymodule]
fn prompt_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PyPromptAnalyzer>()?;
    m.add_function(wrap_pyfunction!(py_classify, m)?)?;
    m.add_function(wrap_pyfunction!(py_detect_gaps, m)?)?;
    m.add_function(wrap_pyfunction!(py_score, m)?)?;
    m.add_function(wrap_pyfunction!(py_detect_drift, m)?)?;
    m.add_function(wrap_pyfunction!(py_init_logging, m)?)?;
    Ok(())
}
