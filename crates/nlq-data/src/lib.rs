//! Simulated data sources for the NLQ workbench
//!
//! Everything here stands in for real collaborators: schema discovery,
//! NL to SQL translation, query execution and document ingestion are all
//! answered from fixtures after configurable delays.

pub mod config;
pub mod fixtures;
pub mod ingest;
pub mod metrics;
pub mod sources;
pub mod translate;

use std::sync::Arc;

use nlq_core::Backend;
use thiserror::Error;

// Re-exports
pub use config::{IngestionTiming, PhaseTiming, SimulationConfig, UploadLimits};
pub use ingest::SimulatedIngestor;
pub use metrics::{MetricsSynth, RandomMetrics, ScriptedMetrics};
pub use sources::{MockQueryProvider, MockSchemaProvider};
pub use translate::{KeywordTranslator, Translation};

/// Errors that can occur while loading simulation data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Build the fully simulated backend described by `config`
pub fn simulated_backend(config: &SimulationConfig) -> Backend {
    Backend::new(
        Arc::new(MockSchemaProvider::new(config)),
        Arc::new(MockQueryProvider::new(config)),
        Arc::new(SimulatedIngestor::new(config)),
    )
}
