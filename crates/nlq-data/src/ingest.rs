//! Simulated document ingestion
//!
//! Each phase runs for a fixed duration while a ticker bumps cosmetic
//! progress. The phase ends when its duration elapses, whatever progress
//! value was reached.

use async_trait::async_trait;
use nlq_core::{BackendError, DocumentIngestor, FileHandle, ProgressSink};
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::config::{IngestionTiming, PhaseTiming, SimulationConfig, UploadLimits};

/// Two-phase upload/processing pipeline driven by timers
pub struct SimulatedIngestor {
    timing: IngestionTiming,
    limits: UploadLimits,
}

impl SimulatedIngestor {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            timing: config.ingestion,
            limits: config.limits.clone(),
        }
    }

    /// Check a file against the upload limits
    pub fn check(&self, file: &FileHandle) -> Result<(), String> {
        let allowed = file
            .extension()
            .map(|ext| self.limits.allowed_extensions.iter().any(|a| *a == ext))
            .unwrap_or(false);
        if !allowed {
            return Err(format!(
                "Unsupported file type. Allowed: {}",
                self.limits.allowed_extensions.join(", ")
            ));
        }

        if let Some(size) = file.size_bytes {
            if size > self.limits.max_file_bytes {
                return Err(format!(
                    "File exceeds the {} MB limit",
                    self.limits.max_file_bytes / (1024 * 1024)
                ));
            }
        }
        Ok(())
    }

    async fn run_phase(phase: &PhaseTiming, sink: &ProgressSink) {
        let deadline = sleep(phase.duration());
        tokio::pin!(deadline);

        let mut ticker = interval_at(Instant::now() + phase.tick(), phase.tick());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // A tick due at the deadline still lands, so the bar can reach 100%
        loop {
            tokio::select! {
                biased;
                _ = ticker.tick() => sink.advance(phase.step),
                _ = &mut deadline => break,
            }
        }
    }
}

#[async_trait]
impl DocumentIngestor for SimulatedIngestor {
    async fn ingest(&self, file: FileHandle, sink: ProgressSink) -> Result<(), BackendError> {
        if let Err(reason) = self.check(&file) {
            warn!("Rejecting {}: {}", file.name, reason);
            return Err(BackendError::Ingestion(reason));
        }

        debug!("Uploading {}", file.name);
        Self::run_phase(&self.timing.upload, &sink).await;

        sink.enter_processing();
        debug!("Processing {}", file.name);
        Self::run_phase(&self.timing.processing, &sink).await;

        Ok(())
    }
}
