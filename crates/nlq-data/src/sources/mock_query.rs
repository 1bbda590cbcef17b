//! Simulated query processing
//!
//! Routing:
//! 1. questions about resumes or reviews answer from the uploaded documents
//! 2. with a schema, the question is translated to SQL and answered with rows
//! 3. without one, a hybrid answer carries both

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nlq_core::{BackendError, QueryKind, QueryProvider, QueryResult, ResultRecord, Schema};
use rand::Rng;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::fixtures;
use crate::metrics::{MetricsSynth, RandomMetrics};
use crate::translate::KeywordTranslator;

/// Placeholder query shown for hybrid answers
pub const HYBRID_PLACEHOLDER: &str = "SELECT ...";

const DOCUMENT_CUES: [&str; 2] = ["resume", "review"];

/// Whether a question targets uploaded documents
pub fn is_document_question(text: &str) -> bool {
    let lower = text.to_lowercase();
    DOCUMENT_CUES.iter().any(|cue| lower.contains(cue))
}

/// Answers every question from fixtures after simulated delays
pub struct MockQueryProvider {
    latency: Duration,
    translate_latency: Duration,
    transport_failure_rate: f64,
    translator: KeywordTranslator,
    metrics: Arc<dyn MetricsSynth>,
}

impl MockQueryProvider {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            latency: config.query_latency(),
            translate_latency: config.translate_latency(),
            transport_failure_rate: config.transport_failure_rate,
            translator: KeywordTranslator::default(),
            metrics: Arc::new(RandomMetrics::new()),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSynth>) -> Self {
        self.metrics = metrics;
        self
    }

    async fn translate(&self, text: &str, schema: &Schema) -> String {
        tokio::time::sleep(self.translate_latency).await;
        let translation = self.translator.translate(text, schema);
        debug!("Generated SQL: {}", translation.sql);
        translation.sql
    }

    fn transport_fails(&self) -> bool {
        self.transport_failure_rate > 0.0
            && rand::thread_rng().gen_bool(self.transport_failure_rate.min(1.0))
    }
}

#[async_trait]
impl QueryProvider for MockQueryProvider {
    async fn process(
        &self,
        text: &str,
        schema: Option<Arc<Schema>>,
    ) -> Result<QueryResult, BackendError> {
        info!("Processing query: {}", text);

        let rows = || {
            fixtures::python_developer_rows()
                .into_iter()
                .map(ResultRecord::Structured)
        };
        let documents = || {
            fixtures::python_developer_documents()
                .into_iter()
                .map(ResultRecord::Document)
        };

        let (kind, records, generated_query): (QueryKind, Vec<ResultRecord>, Option<String>) =
            if is_document_question(text) {
                (QueryKind::Document, documents().collect(), None)
            } else if let Some(schema) = schema.as_deref() {
                let sql = self.translate(text, schema).await;
                (QueryKind::Sql, rows().collect(), Some(sql))
            } else {
                (
                    QueryKind::Hybrid,
                    rows().chain(documents()).collect(),
                    Some(HYBRID_PLACEHOLDER.to_string()),
                )
            };

        tokio::time::sleep(self.latency).await;

        if self.transport_fails() {
            return Err(BackendError::Transport(
                "Query service did not respond".to_string(),
            ));
        }

        Ok(QueryResult {
            kind,
            records,
            generated_query,
            performance: self.metrics.sample(kind),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ScriptedMetrics;
    use nlq_core::Performance;

    fn provider() -> MockQueryProvider {
        MockQueryProvider::new(&SimulationConfig::default()).with_metrics(Arc::new(
            ScriptedMetrics::new(vec![Performance {
                response_time_ms: 420.0,
                cache_hit: true,
            }]),
        ))
    }

    fn schema() -> Option<Arc<Schema>> {
        Some(Arc::new(fixtures::company_schema()))
    }

    #[test]
    fn test_document_cues() {
        assert!(is_document_question("Show me RESUMES of python devs"));
        assert!(is_document_question("latest performance review"));
        assert!(!is_document_question("how many employees"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_document_route_wins_over_schema() {
        let result = provider().process("show me resumes", schema()).await.unwrap();
        assert_eq!(result.kind, QueryKind::Document);
        assert_eq!(result.documents().count(), 3);
        assert_eq!(result.rows().count(), 0);
        assert_eq!(result.generated_query, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sql_route_with_schema() {
        let result = provider()
            .process("how many employees", schema())
            .await
            .unwrap();
        assert_eq!(result.kind, QueryKind::Sql);
        assert_eq!(
            result.generated_query.as_deref(),
            Some("SELECT COUNT(emp_id) FROM employees;")
        );
        assert_eq!(result.rows().count(), 3);
        assert_eq!(result.performance.response_time_ms, 420.0);
        assert!(result.performance.cache_hit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hybrid_route_without_schema() {
        let result = provider().process("how many employees", None).await.unwrap();
        assert_eq!(result.kind, QueryKind::Hybrid);
        assert_eq!(result.generated_query.as_deref(), Some(HYBRID_PLACEHOLDER));
        assert_eq!(result.rows().count(), 3);
        assert_eq!(result.documents().count(), 3);
        assert!(matches!(result.records[0], ResultRecord::Structured(_)));
        assert!(matches!(result.records[5], ResultRecord::Document(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure() {
        let config = SimulationConfig {
            transport_failure_rate: 1.0,
            ..SimulationConfig::default()
        };
        let err = MockQueryProvider::new(&config)
            .process("how many employees", schema())
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }
}
