use crate::command::transport::TransportError;
use crate::model::ParseError;
use thiserror::Error;

/// Errors surfaced by the command layer.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The request's cancel token fired. Callers are expected to detect
    /// this via [`CommandError::is_cancel`] and skip their error handling.
    #[error("request cancelled")]
    Cancelled,

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend answered with a non-2xx envelope status.
    #[error("backend error {status}: {message}")]
    Backend { status: String, message: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CommandError {
    pub fn is_cancel(&self) -> bool {
        matches!(self, CommandError::Cancelled)
    }
}
