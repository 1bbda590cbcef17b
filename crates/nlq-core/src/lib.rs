//! Core functionality for the NLQ workbench
//!
//! This crate provides the session model, the ingestion state machine,
//! the backend traits and the controller that owns all session state.

pub mod aggregate;
pub mod backend;
pub mod controller;
pub mod error;
pub mod events;
pub mod ingestion;
pub mod query;
pub mod schema;
pub mod state;
pub mod sync;

// Re-export commonly used types
pub use aggregate::{BoundedRing, DashboardStats, PerformanceSample, QueryHistoryEntry};
pub use backend::{Backend, DocumentIngestor, ProgressSink, QueryProvider, SchemaProvider};
pub use controller::SessionController;
pub use error::{BackendError, SessionError};
pub use events::{Notifier, SessionEvent};
pub use ingestion::{FileHandle, FileId, FileRecord, FileStatus};
pub use query::{DocumentSummary, Performance, QueryKind, QueryResult, ResultRecord, Row};
pub use schema::{Column, Relationship, Schema, Table};
pub use state::{ActiveView, AppSettings, ConnectionStatus, QueryStatus, SessionState, Theme};
pub use sync::{RequestKind, RequestSequencer, RequestToken};
