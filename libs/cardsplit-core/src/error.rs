//! Error types for cardsplit-core.

use crate::types::StrategyKind;
use thiserror::Error;

/// Result type alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while preparing a parse.
///
/// Parsing itself never fails: content that matches no boundary yields an
/// empty card list. Every variant here is raised before any line is read.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{strategy} strategy requires {parameter}: {reason}")]
    Configuration {
        strategy: StrategyKind,
        parameter: &'static str,
        reason: String,
    },

    #[error("unknown parser strategy: {0}")]
    UnknownStrategy(String),

    #[error("invalid regex pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid config block at line {line}: {reason}")]
    ConfigParse { line: usize, reason: String },
}

impl Error {
    pub(crate) fn configuration(
        strategy: StrategyKind,
        parameter: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            strategy,
            parameter,
            reason: reason.into(),
        }
    }
}
