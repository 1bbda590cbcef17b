//! Pluggable backend traits
//!
//! The session never talks to a database or an ingestion pipeline directly;
//! it goes through these traits so simulated and real implementations are
//! interchangeable.

use std::sync::Arc;

use crate::error::BackendError;
use crate::events::{EventSender, SessionEvent};
use crate::ingestion::{FileHandle, FileId};
use crate::query::QueryResult;
use crate::schema::Schema;

/// Discovers the schema behind a connection descriptor
#[async_trait::async_trait]
pub trait SchemaProvider: Send + Sync {
    async fn discover(&self, descriptor: &str) -> Result<Schema, BackendError>;
}

/// Turns natural-language text into a query result
#[async_trait::async_trait]
pub trait QueryProvider: Send + Sync {
    async fn process(
        &self,
        text: &str,
        schema: Option<Arc<Schema>>,
    ) -> Result<QueryResult, BackendError>;
}

/// Uploads and processes one document, reporting progress through the sink.
///
/// Returning `Ok` completes the record; the implementation must have called
/// [`ProgressSink::enter_processing`] before that.
#[async_trait::async_trait]
pub trait DocumentIngestor: Send + Sync {
    async fn ingest(&self, file: FileHandle, sink: ProgressSink) -> Result<(), BackendError>;
}

/// Progress channel handed to an ingestor for a single file
#[derive(Clone)]
pub struct ProgressSink {
    id: FileId,
    events: EventSender,
}

impl ProgressSink {
    pub fn new(id: FileId, events: EventSender) -> Self {
        Self { id, events }
    }

    pub fn file_id(&self) -> FileId {
        self.id
    }

    /// Bump cosmetic progress by `step` percent
    pub fn advance(&self, step: u8) {
        self.events.send(SessionEvent::FileProgress { id: self.id, step });
    }

    /// The upload phase is over; the record moves to processing
    pub fn enter_processing(&self) {
        self.events.send(SessionEvent::FileProcessing { id: self.id });
    }
}

/// The set of providers a session runs against
#[derive(Clone)]
pub struct Backend {
    pub schema: Arc<dyn SchemaProvider>,
    pub query: Arc<dyn QueryProvider>,
    pub ingestor: Arc<dyn DocumentIngestor>,
}

impl Backend {
    pub fn new(
        schema: Arc<dyn SchemaProvider>,
        query: Arc<dyn QueryProvider>,
        ingestor: Arc<dyn DocumentIngestor>,
    ) -> Self {
        Self {
            schema,
            query,
            ingestor,
        }
    }
}
