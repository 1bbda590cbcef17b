//! Query results returned by a query provider

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One structured row, column name to value, in column order
pub type Row = IndexMap<String, serde_json::Value>;

/// Which branch of the pipeline produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKind {
    Sql,
    Document,
    Hybrid,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::Sql => write!(f, "SQL"),
            QueryKind::Document => write!(f, "Document"),
            QueryKind::Hybrid => write!(f, "Hybrid"),
        }
    }
}

/// Summary of a matching uploaded document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub source: String,
}

/// A single result record, tagged with its shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum ResultRecord {
    Structured(Row),
    Document(DocumentSummary),
}

/// Synthetic performance metrics attached to every result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub response_time_ms: f64,
    pub cache_hit: bool,
}

/// The outcome of one natural-language query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub kind: QueryKind,
    pub records: Vec<ResultRecord>,
    pub generated_query: Option<String>,
    pub performance: Performance,
}

impl QueryResult {
    /// Structured rows, in result order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.records.iter().filter_map(|r| match r {
            ResultRecord::Structured(row) => Some(row),
            ResultRecord::Document(_) => None,
        })
    }

    /// Document summaries, in result order
    pub fn documents(&self) -> impl Iterator<Item = &DocumentSummary> {
        self.records.iter().filter_map(|r| match r {
            ResultRecord::Document(doc) => Some(doc),
            ResultRecord::Structured(_) => None,
        })
    }

    /// Column headers taken from the first structured row
    pub fn columns(&self) -> Vec<String> {
        self.rows()
            .next()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }
}
