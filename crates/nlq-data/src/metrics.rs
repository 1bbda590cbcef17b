//! Synthetic performance metrics

use std::ops::Range;

use nlq_core::{Performance, QueryKind};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces the performance figures attached to a result
pub trait MetricsSynth: Send + Sync {
    fn sample(&self, kind: QueryKind) -> Performance;
}

/// Response-time range and cache-hit probability of one result kind
fn profile(kind: QueryKind) -> (Range<f64>, f64) {
    match kind {
        QueryKind::Document => (200.0..700.0, 0.5),
        QueryKind::Sql => (300.0..1300.0, 0.3),
        QueryKind::Hybrid => (500.0..1700.0, 0.0),
    }
}

/// Uniformly random metrics within kind-specific ranges
pub struct RandomMetrics {
    rng: Mutex<StdRng>,
}

impl RandomMetrics {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSynth for RandomMetrics {
    fn sample(&self, kind: QueryKind) -> Performance {
        let (range, hit_probability) = profile(kind);
        let mut rng = self.rng.lock();
        Performance {
            response_time_ms: rng.gen_range(range),
            cache_hit: rng.gen_bool(hit_probability),
        }
    }
}

/// Replays a fixed list of samples in order, wrapping around
pub struct ScriptedMetrics {
    script: Vec<Performance>,
    cursor: Mutex<usize>,
}

impl ScriptedMetrics {
    pub fn new(script: Vec<Performance>) -> Self {
        Self {
            script,
            cursor: Mutex::new(0),
        }
    }
}

impl MetricsSynth for ScriptedMetrics {
    fn sample(&self, _kind: QueryKind) -> Performance {
        if self.script.is_empty() {
            return Performance {
                response_time_ms: 0.0,
                cache_hit: false,
            };
        }
        let mut cursor = self.cursor.lock();
        let sample = self.script[*cursor % self.script.len()];
        *cursor += 1;
        sample
    }
}
