//! Bounded query history and performance series

use std::collections::VecDeque;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ingestion::{FileRecord, FileStatus};
use crate::query::QueryResult;
use crate::schema::Schema;

/// Number of history entries kept
pub const HISTORY_CAPACITY: usize = 10;

/// Number of performance samples kept for charting
pub const PERFORMANCE_CAPACITY: usize = 20;

/// Fixed-capacity ring kept in insertion order; pushing past capacity drops the oldest item
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedRing<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedRing<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append the newest item, evicting from the old end when full
    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        while self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    /// Oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    /// Newest first
    pub fn iter_newest(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }

    pub fn newest(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// A submitted query, as shown in the history dropdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryHistoryEntry {
    pub id: Uuid,
    pub query_text: String,
    pub timestamp: DateTime<Utc>,
}

impl QueryHistoryEntry {
    pub fn new(query_text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            query_text: query_text.into(),
            timestamp,
        }
    }

    /// ISO-8601 timestamp
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339()
    }
}

/// One point of the response-time chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSample {
    pub time_label: String,
    pub response_time_ms: f64,
    /// 1 for a cache hit, 0 otherwise
    pub cache_hit: u8,
}

impl PerformanceSample {
    pub fn from_result(result: &QueryResult, at: DateTime<Utc>) -> Self {
        Self {
            time_label: at.with_timezone(&Local).format("%H:%M:%S").to_string(),
            response_time_ms: result.performance.response_time_ms,
            cache_hit: u8::from(result.performance.cache_hit),
        }
    }
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub tables_discovered: usize,
    pub documents_indexed: usize,
    pub cache_hits: usize,
    pub sample_count: usize,
    pub cache_hit_rate_pct: f64,
    pub avg_response_time_ms: Option<f64>,
}

impl DashboardStats {
    pub fn compute(
        schema: Option<&Schema>,
        files: &[FileRecord],
        samples: &BoundedRing<PerformanceSample>,
    ) -> Self {
        let sample_count = samples.len();
        let cache_hits = samples.iter().filter(|s| s.cache_hit > 0).count();
        let cache_hit_rate_pct = if sample_count > 0 {
            cache_hits as f64 / sample_count as f64 * 100.0
        } else {
            0.0
        };
        let avg_response_time_ms = (sample_count > 0).then(|| {
            samples.iter().map(|s| s.response_time_ms).sum::<f64>() / sample_count as f64
        });

        Self {
            tables_discovered: schema.map(|s| s.tables.len()).unwrap_or(0),
            documents_indexed: files
                .iter()
                .filter(|f| f.status() == FileStatus::Completed)
                .count(),
            cache_hits,
            sample_count,
            cache_hit_rate_pct,
            avg_response_time_ms,
        }
    }
}
