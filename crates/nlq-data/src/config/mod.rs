//! Simulation settings
//!
//! Every latency, limit and failure knob of the simulated backends lives
//! here. Values can be overridden from an optional JSON file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::DataError;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "nlq-sim.json";

/// Timing of one ingestion phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseTiming {
    /// Interval between progress ticks
    pub tick_ms: u64,
    /// Percent added per tick
    pub step: u8,
    /// How long the phase lasts, independent of progress reached
    pub duration_ms: u64,
}

impl PhaseTiming {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Timing of the two-phase ingestion pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionTiming {
    pub upload: PhaseTiming,
    pub processing: PhaseTiming,
}

impl Default for IngestionTiming {
    fn default() -> Self {
        Self {
            upload: PhaseTiming {
                tick_ms: 100,
                step: 10,
                duration_ms: 1000,
            },
            processing: PhaseTiming {
                tick_ms: 200,
                step: 20,
                duration_ms: 1000,
            },
        }
    }
}

/// Which files the uploader accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    /// Lowercase extensions without the dot
    pub allowed_extensions: Vec<String>,
    pub max_file_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            allowed_extensions: ["pdf", "docx", "txt", "csv"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_file_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Knobs of the simulated backends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Latency of schema discovery
    pub connect_latency_ms: u64,
    /// Descriptors containing this text fail to connect
    pub failure_sentinel: String,
    /// Latency of query processing, before translation
    pub query_latency_ms: u64,
    /// Latency of the NL to SQL translation step
    pub translate_latency_ms: u64,
    /// Probability in [0, 1] that a query fails with a transport error
    pub transport_failure_rate: f64,
    pub ingestion: IngestionTiming,
    pub limits: UploadLimits,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            connect_latency_ms: 1500,
            failure_sentinel: "fail".to_string(),
            query_latency_ms: 1500,
            translate_latency_ms: 300,
            transport_failure_rate: 0.0,
            ingestion: IngestionTiming::default(),
            limits: UploadLimits::default(),
        }
    }
}

impl SimulationConfig {
    /// Load and validate a config file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, falling back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(config) => {
                info!("Loaded simulation config from {}", path.display());
                config
            }
            Err(err) => {
                warn!(
                    "Using default simulation config ({}): {}",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), DataError> {
        if !(0.0..=1.0).contains(&self.transport_failure_rate) {
            return Err(DataError::InvalidConfig(format!(
                "transport_failure_rate must be within [0, 1], got {}",
                self.transport_failure_rate
            )));
        }
        for (name, phase) in [
            ("upload", &self.ingestion.upload),
            ("processing", &self.ingestion.processing),
        ] {
            if phase.tick_ms == 0 {
                return Err(DataError::InvalidConfig(format!(
                    "{name} tick_ms must be positive"
                )));
            }
        }
        Ok(())
    }

    pub fn connect_latency(&self) -> Duration {
        Duration::from_millis(self.connect_latency_ms)
    }

    pub fn query_latency(&self) -> Duration {
        Duration::from_millis(self.query_latency_ms)
    }

    pub fn translate_latency(&self) -> Duration {
        Duration::from_millis(self.translate_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("{}-{}-{}", name, std::process::id(), CONFIG_FILE_NAME))
    }

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.connect_latency_ms, 1500);
        assert_eq!(config.failure_sentinel, "fail");
        assert_eq!(config.ingestion.upload.step, 10);
        assert_eq!(config.ingestion.processing.tick_ms, 200);
        assert_eq!(config.limits.max_file_bytes, 10_485_760);
        assert_eq!(config.transport_failure_rate, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = temp_path("partial");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"connect_latency_ms": 10, "limits": {{"max_file_bytes": 5}}}}"#).unwrap();
        drop(file);

        let config = SimulationConfig::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.connect_latency_ms, 10);
        assert_eq!(config.limits.max_file_bytes, 5);
        assert_eq!(config.limits.allowed_extensions.len(), 4);
        assert_eq!(config.query_latency_ms, 1500);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = SimulationConfig::load_or_default(temp_path("missing"));
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_rejects_out_of_range_failure_rate() {
        let config = SimulationConfig {
            transport_failure_rate: 1.5,
            ..SimulationConfig::default()
        };
        assert!(matches!(config.validate(), Err(DataError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let path = temp_path("malformed");
        std::fs::write(&path, "{ not json").unwrap();
        let result = SimulationConfig::load_from(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(DataError::Json(_))));
    }
}
