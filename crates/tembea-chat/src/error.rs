//! Error types for the conversational interface.

use tembea_core::error::TembeaError;

/// Errors from the chat engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat is disabled")]
    Disabled,
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("a response is still pending")]
    ResponsePending,
    #[error("session is closed")]
    SessionClosed,
    #[error("no async runtime available to schedule the response")]
    RuntimeUnavailable,
    #[error("session state error: {0}")]
    SessionState(String),
    #[error("catalog error: {0}")]
    CatalogError(String),
}

impl From<TembeaError> for ChatError {
    fn from(err: TembeaError) -> Self {
        ChatError::CatalogError(err.to_string())
    }
}
