mod vars;

pub use vars::EnvVarManager;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("invalid variable name: {0:?}")]
    InvalidName(String),
    #[error("invalid value for {0}: contains a NUL byte")]
    InvalidValue(String),
}
