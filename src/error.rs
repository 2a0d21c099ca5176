use thiserror::Error;

use crate::core::config::ConfigError;
use crate::process::ProcessError;

/// Errors that end the shell. Everything else is reported at the prompt and
/// the loop carries on.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("{0}")]
    Process(#[from] ProcessError),
    #[error("{0}")]
    Config(#[from] ConfigError),
}
