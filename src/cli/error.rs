//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        ApplicationError::Domain(e).into()
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use crate::exitcode;

        match self {
            CliError::UnknownCommand(_) | CliError::InvalidArgs(_) => exitcode::USAGE,
            CliError::Infra(InfraError::Io { .. }) => exitcode::IOERR,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::Domain(DomainError::InvalidSetting { .. })
                | ApplicationError::Domain(DomainError::InvalidColor { .. })
                | ApplicationError::Domain(DomainError::InvalidPair { .. })
                | ApplicationError::Config { .. }
                | ApplicationError::ConfigParse { .. }
                | ApplicationError::ProfileNotFound(_)
                | ApplicationError::ProfileExists(_) => exitcode::CONFIG,
                ApplicationError::Domain(DomainError::InvalidAudio(_))
                | ApplicationError::Domain(DomainError::UnsupportedAudio(_)) => exitcode::DATAERR,
                ApplicationError::ConfigWrite { .. } => exitcode::CANTCREAT,
                ApplicationError::OperationFailed { .. } => exitcode::NOINPUT,
            },
        }
    }
}
