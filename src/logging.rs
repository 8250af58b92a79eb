//! Tracing subscriber setup for hosts embedding the analyzer

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::PromptError;

const DEFAULT_LOG_FILTER: &str = "prompt_core=info";
const VERBOSE_LOG_FILTER: &str = "prompt_core=debug";

/// Install a stderr fmt subscriber. `RUST_LOG` wins over the defaults.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(verbose: bool) -> Result<(), PromptError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        })
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .try_init()
        .map_err(|e| PromptError::Logging(e.to_string()))
}
