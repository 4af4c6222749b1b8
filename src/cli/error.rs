//! CLI-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Domain(_) | CliError::InvalidArgs(_) | CliError::Usage(_) => {
                crate::exitcode::USAGE
            }
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Toml(_) => crate::exitcode::SOFTWARE,
            CliError::Io(_) => crate::exitcode::IOERR,
        }
    }
}
