//! Session state
//!
//! One [`SessionState`] value holds everything the views render. It is owned
//! by the [`SessionController`](crate::controller::SessionController) and only
//! mutated through the typed operations below.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{
    BoundedRing, DashboardStats, PerformanceSample, QueryHistoryEntry, HISTORY_CAPACITY,
    PERFORMANCE_CAPACITY,
};
use crate::error::SessionError;
use crate::ingestion::{FileId, FileRecord};
use crate::query::QueryResult;
use crate::schema::Schema;

/// The three mutually exclusive top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActiveView {
    #[default]
    Ingestion,
    Query,
    Dashboard,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [ActiveView::Ingestion, ActiveView::Query, ActiveView::Dashboard];

    /// Whether the view needs a discovered schema
    pub fn requires_schema(self) -> bool {
        !matches!(self, ActiveView::Ingestion)
    }

    pub fn label(self) -> &'static str {
        match self {
            ActiveView::Ingestion => "Data Ingestion",
            ActiveView::Query => "Query Interface",
            ActiveView::Dashboard => "Dashboard",
        }
    }
}

impl fmt::Display for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// User-facing settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub theme: Theme,
}

/// Connection lifecycle; exactly one state at a time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Idle,
    Connecting,
    Connected,
    Failed(String),
}

impl ConnectionStatus {
    pub fn is_connecting(&self) -> bool {
        matches!(self, ConnectionStatus::Connecting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ConnectionStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// State of the query form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Pending,
    Failed(String),
}

impl QueryStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, QueryStatus::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Everything one session knows
#[derive(Debug, Clone)]
pub struct SessionState {
    schema: Option<Arc<Schema>>,
    files: Vec<FileRecord>,
    history: BoundedRing<QueryHistoryEntry>,
    performance: BoundedRing<PerformanceSample>,
    last_result: Option<QueryResult>,
    pub connection: ConnectionStatus,
    pub query: QueryStatus,
    active_view: ActiveView,
    pub settings: AppSettings,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            schema: None,
            files: Vec::new(),
            history: BoundedRing::new(HISTORY_CAPACITY),
            performance: BoundedRing::new(PERFORMANCE_CAPACITY),
            last_result: None,
            connection: ConnectionStatus::Idle,
            query: QueryStatus::Idle,
            active_view: ActiveView::Ingestion,
            settings: AppSettings::default(),
        }
    }
}

impl SessionState {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn schema(&self) -> Option<&Arc<Schema>> {
        self.schema.as_ref()
    }

    pub fn has_schema(&self) -> bool {
        self.schema.is_some()
    }

    /// Install a newly discovered schema, replacing any previous one
    pub fn set_schema(&mut self, schema: Schema) -> Result<(), SessionError> {
        schema.validate()?;
        self.schema = Some(Arc::new(schema));
        Ok(())
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn file(&self, id: FileId) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn file_mut(&mut self, id: FileId) -> Option<&mut FileRecord> {
        self.files.iter_mut().find(|f| f.id == id)
    }

    pub fn push_file(&mut self, record: FileRecord) {
        self.files.push(record);
    }

    /// Query history, newest first
    pub fn history(&self) -> impl Iterator<Item = &QueryHistoryEntry> {
        self.history.iter_newest()
    }

    /// Performance samples in chronological order
    pub fn performance(&self) -> &BoundedRing<PerformanceSample> {
        &self.performance
    }

    pub fn last_result(&self) -> Option<&QueryResult> {
        self.last_result.as_ref()
    }

    /// Fold one completed query into history, metrics and the last result
    pub fn record_result(&mut self, query_text: &str, result: QueryResult, at: DateTime<Utc>) {
        self.history.push(QueryHistoryEntry::new(query_text, at));
        self.performance
            .push(PerformanceSample::from_result(&result, at));
        self.last_result = Some(result);
        self.query = QueryStatus::Idle;
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn is_view_available(&self, view: ActiveView) -> bool {
        !view.requires_schema() || self.has_schema()
    }

    pub fn select_view(&mut self, view: ActiveView) -> Result<(), SessionError> {
        if !self.is_view_available(view) {
            return Err(SessionError::ViewLocked(view));
        }
        self.active_view = view;
        Ok(())
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats::compute(self.schema.as_deref(), &self.files, &self.performance)
    }
}
