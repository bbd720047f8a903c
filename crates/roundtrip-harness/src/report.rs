//! Metrics from a successful round trip.

use serde::Serialize;
use std::time::Duration;

/// Metrics from a round-trip run in which both paths agreed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoundTripReport {
    /// Codec under test.
    pub codec: String,
    /// Where the serialized buffer was stored.
    pub storage: String,
    /// Number of bytes serialized.
    pub bytes_written: u64,
    /// Time spent serializing and writing.
    pub serialize_duration: Duration,
    /// Time spent rewinding and materializing the text snapshot.
    pub snapshot_duration: Duration,
    /// Time spent in the buffered parse.
    pub buffered_parse_duration: Duration,
    /// Time spent in the streaming parse.
    pub streaming_parse_duration: Duration,
    /// Time spent comparing results.
    pub compare_duration: Duration,
    /// Total time taken.
    pub total_duration: Duration,
}

impl RoundTripReport {
    /// Serialized bytes per second of total run time.
    pub fn bytes_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.bytes_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Outcome of a successful run: the metrics plus the agreed-upon decoded value.
#[derive(Debug, Clone)]
pub struct RoundTrip<T> {
    pub report: RoundTripReport,
    pub decoded: T,
}
