//! Statistics reported by an import routine.

use serde::{Serialize, Serializer};
use std::time::Duration;

/// Counters for one import routine.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportStats {
    /// Input name (file path or reader label).
    pub source: String,
    /// Data rows processed.
    pub rows: u64,
    /// Statements sent to the sink, schema statements included.
    pub statements: u64,
    /// Backend round trips (single statements or transactions).
    pub batches: u64,
    /// Wall-clock time of the routine.
    #[serde(rename = "duration_secs", serialize_with = "serialize_secs")]
    pub duration: Duration,
}

impl ImportStats {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            ..Default::default()
        }
    }

    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.rows as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}
