//! Python bindings for prompt core using PyO3
//!
//! Results cross the boundary as JSON strings.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::Serialize;

use crate::analyzer::{EnhancedAnalyzer, Generator, RuleBasedAnalyzer, TextAnalyzer};
use crate::config::AnalyzerConfig;
use crate::drift::detect_drift;
use crate::error::PromptError;
use crate::gaps::detect_gaps;
use crate::intent::classify;
use crate::logging::init_logging;
use crate::scoring::score;
use crate::types::{ConstraintCategory, ConstraintSelection, GapSet, PromptText};

fn to_py_err(err: PromptError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value)
        .map_err(|e| PyValueError::new_err(format!("Failed to serialize result: {}", e)))
}

fn prompt_text(text: &str) -> PyResult<PromptText> {
    PromptText::new(text).map_err(to_py_err)
}

/// Classify prompt intent (Python function)
#[pyfunction]
#[pyo3(name = "classify")]
pub fn py_classify(text: &str) -> PyResult<String> {
    let text = prompt_text(text)?;
    to_json(&classify(text.as_str()))
}

/// Detect missing constraints and their suggestion chips
#[pyfunction]
#[pyo3(name = "detect_gaps")]
pub fn py_detect_gaps(text: &str) -> PyResult<String> {
    let text = prompt_text(text)?;
    to_json(&detect_gaps(text.as_str()))
}

/// Score prompt text against a list of gap names
#[pyfunction]
#[pyo3(name = "score")]
pub fn py_score(text: &str, gaps: Vec<String>) -> PyResult<String> {
    let text = prompt_text(text)?;
    let gaps = gaps
        .iter()
        .map(|name| {
            ConstraintCategory::from_name(name)
                .ok_or_else(|| PyValueError::new_err(format!("Unknown constraint category: {}", name)))
        })
        .collect::<PyResult<GapSet>>()?;
    to_json(&score(text.as_str(), &gaps))
}

/// Compare an original prompt with a refined one
#[pyfunction]
#[pyo3(name = "detect_drift")]
pub fn py_detect_drift(original: &str, refined: &str) -> PyResult<String> {
    to_json(&detect_drift(original, refined))
}

#[pyfunction]
#[pyo3(name = "init_logging", signature = (verbose=false))]
pub fn py_init_logging(verbose: bool) -> PyResult<()> {
    init_logging(verbose).map_err(to_py_err)
}

/// Generator backed by a Python callable `(str) -> str | None`.
///
/// Exceptions and non-string returns count as unavailable.
struct PyGenerator {
    callable: Py<PyAny>,
}

impl Generator for PyGenerator {
    fn generate(&self, prompt: &str) -> Option<String> {
        Python::with_gil(|py| match self.callable.call1(py, (prompt,)) {
            Ok(result) => result.extract::<Option<String>>(py).ok().flatten(),
            Err(err) => {
                tracing::warn!("Python generator raised: {}", err);
                None
            }
        })
    }
}

/// Python wrapper for the analyzers
#[pyclass(name = "PromptAnalyzer")]
pub struct PyPromptAnalyzer {
    analyzer: Box<dyn TextAnalyzer>,
}

#[pymethods]
impl PyPromptAnalyzer {
    /// With a generator the enhanced analyzer is used, otherwise rule-based.
    /// `config` is a JSON object; without it the environment is read.
    #[new]
    #[pyo3(signature = (generator=None, config=None))]
    fn new(generator: Option<Py<PyAny>>, config: Option<&str>) -> PyResult<Self> {
        let config = match config {
            Some(json) => AnalyzerConfig::from_json(json).map_err(to_py_err)?,
            None => AnalyzerConfig::from_env(),
        };

        let analyzer: Box<dyn TextAnalyzer> = match generator {
            Some(callable) => Box::new(EnhancedAnalyzer::with_config(PyGenerator { callable }, config)),
            None => Box::new(RuleBasedAnalyzer::with_config(config)),
        };

        Ok(Self { analyzer })
    }

    /// Combined analysis as JSON
    fn analyze(&self, text: &str) -> PyResult<String> {
        let text = prompt_text(text)?;
        to_json(&self.analyzer.analyze(&text))
    }

    /// Refine with an optional JSON object of selected constraints
    #[pyo3(signature = (text, constraints=None))]
    fn refine(&self, text: &str, constraints: Option<&str>) -> PyResult<String> {
        let text = prompt_text(text)?;
        let constraints: ConstraintSelection = match constraints {
            Some(json) => serde_json::from_str(json)
                .map_err(|e| PyValueError::new_err(format!("Invalid constraints: {}", e)))?,
            None => ConstraintSelection::new(),
        };
        to_json(&self.analyzer.refine(&text, &constraints))
    }

    #[getter]
    fn name(&self) -> &'static str {
        self.analyzer.name()
    }
}
