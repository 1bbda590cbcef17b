//! Error types shared by the session and the backends

use thiserror::Error;

use crate::ingestion::{FileId, FileStatus};
use crate::state::ActiveView;

/// Errors surfaced to the user by session operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("{0}")]
    Connection(String),

    #[error("{0}")]
    Query(String),

    #[error("File {id}: {reason}")]
    File { id: FileId, reason: String },

    #[error("Invalid file transition from {from} to {to}")]
    InvalidTransition { from: FileStatus, to: FileStatus },

    #[error("The {0} view requires a discovered schema")]
    ViewLocked(ActiveView),

    #[error("Query text is empty")]
    EmptyQuery,

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

/// Errors returned by schema, query and ingestion providers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("{0}")]
    ConnectionRefused(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Ingestion(String),

    #[error("Operation cancelled")]
    Cancelled,
}
