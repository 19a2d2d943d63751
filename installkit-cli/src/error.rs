//! CLI error type.

use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid arguments or environment.
    #[error("{0}")]
    Config(String),

    /// The installation did not complete.
    #[error("{0}")]
    Install(String),
}
