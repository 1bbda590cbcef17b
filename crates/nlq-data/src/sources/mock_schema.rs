//! Simulated schema discovery

use std::time::Duration;

use async_trait::async_trait;
use nlq_core::{BackendError, Schema, SchemaProvider};
use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::fixtures;

/// Returns the company schema after a fixed delay
pub struct MockSchemaProvider {
    latency: Duration,
    failure_sentinel: String,
    schema: Schema,
}

impl MockSchemaProvider {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            latency: config.connect_latency(),
            failure_sentinel: config.failure_sentinel.clone(),
            schema: fixtures::company_schema(),
        }
    }
}

#[async_trait]
impl SchemaProvider for MockSchemaProvider {
    async fn discover(&self, descriptor: &str) -> Result<Schema, BackendError> {
        info!("Connecting to {}...", descriptor);
        tokio::time::sleep(self.latency).await;

        if !self.failure_sentinel.is_empty() && descriptor.contains(&self.failure_sentinel) {
            warn!("Rejecting descriptor {}", descriptor);
            return Err(BackendError::ConnectionRefused(
                "Connection failed: Invalid credentials.".to_string(),
            ));
        }
        Ok(self.schema.clone())
    }
}
