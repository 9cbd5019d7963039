//! CLI error types

use registrar_core::RegistrarError;
use thiserror::Error;

/// Errors from executing a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The registrar rejected the command.
    #[error(transparent)]
    Registrar(#[from] RegistrarError),

    /// Writing output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Whether the error is an ordinary rejection the user can fix
    /// (unknown ID, full course, ...) rather than a system failure.
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::Registrar(e) => !e.is_fatal(),
            Self::Io(_) => false,
        }
    }
}
