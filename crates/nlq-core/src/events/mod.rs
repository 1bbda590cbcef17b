//! Events flowing from async work back to the session owner
//!
//! Background tasks never touch session state. They send a [`SessionEvent`]
//! and the controller applies it on the UI thread.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::BackendError;
use crate::ingestion::FileId;
use crate::query::QueryResult;
use crate::schema::Schema;
use crate::sync::RequestToken;

/// Callback used to wake the UI after an event was queued
pub type Notifier = Arc<dyn Fn() + Send + Sync>;

/// Something that happened in a background task
#[derive(Debug)]
pub enum SessionEvent {
    /// Schema discovery finished
    SchemaDiscovered {
        token: RequestToken,
        result: Result<Schema, BackendError>,
    },

    /// A query finished
    QueryFinished {
        token: RequestToken,
        query: String,
        result: Result<QueryResult, BackendError>,
    },

    /// Cosmetic progress tick for one file
    FileProgress { id: FileId, step: u8 },

    /// Upload phase of one file elapsed
    FileProcessing { id: FileId },

    /// Ingestion of one file ended
    FileFinished {
        id: FileId,
        result: Result<(), BackendError>,
    },
}

impl SessionEvent {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::SchemaDiscovered { .. } => "schema_discovered",
            SessionEvent::QueryFinished { .. } => "query_finished",
            SessionEvent::FileProgress { .. } => "file_progress",
            SessionEvent::FileProcessing { .. } => "file_processing",
            SessionEvent::FileFinished { .. } => "file_finished",
        }
    }
}

/// Sending half of the session event channel
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<SessionEvent>,
    notifier: Option<Notifier>,
}

impl fmt::Debug for EventSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSender")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

impl EventSender {
    /// Queue an event and wake the UI.
    ///
    /// Sending after the session is gone is silently dropped.
    pub fn send(&self, event: SessionEvent) {
        if self.tx.send(event).is_ok() {
            if let Some(notify) = &self.notifier {
                notify();
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half, owned by the controller
pub type EventReceiver = mpsc::UnboundedReceiver<SessionEvent>;

/// Create a new event channel
pub fn channel(notifier: Option<Notifier>) -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx, notifier }, rx)
}
