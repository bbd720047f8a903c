//! Differential round-trip verifier for stream-parity.
//!
//! This crate serializes a value once, then deserializes the same bytes twice: once from
//! fully materialized text and once through an incremental reader. Both results must be
//! structurally equal. Any disagreement is reported with the structural path of the first
//! differing element.
//!
//! # Architecture
//!
//! ```text
//! value ──serialize──▶ ScratchStorage (memory | temp file)
//!                            │ rewind
//!              ┌─────────────┴──────────────┐
//!              ▼                            ▼
//!      read_to_end → String         open_reader (rewound)
//!              │                            │
//!              ▼                            ▼
//!      deserialize_str (A)          deserialize_stream (B)
//!              └─────────────┬──────────────┘
//!                            ▼
//!                   compare(A, B) → Divergence at $[i]...
//! ```
//!
//! Every I/O step observes a [`CancellationToken`](tokio_util::sync::CancellationToken);
//! scratch storage is released when the run returns, on every path.
//!
//! # Example
//!
//! ```rust,no_run
//! use roundtrip_harness::{HarnessConfig, RoundTripHarness};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), roundtrip_harness::HarnessError> {
//! let harness = RoundTripHarness::new(HarnessConfig::new().with_temp_file());
//! let outcome = harness
//!     .run(&vec![Some(1), None, Some(3)], &CancellationToken::new())
//!     .await?;
//! println!("{} bytes round-tripped", outcome.report.bytes_written);
//! # Ok(())
//! # }
//! ```

pub mod cancel;
pub mod codec;
pub mod compare;
pub mod config;
pub mod error;
pub mod harness;
pub mod path;
pub mod report;
pub mod storage;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use codec::{Codec, JsonCodec};
pub use compare::{compare, CompareResult, Mismatch, StructuralEq};
pub use config::{HarnessConfig, StorageKind};
pub use error::{CodecError, ConfigError, HarnessError, ParseStage};
pub use harness::RoundTripHarness;
pub use path::{PathSegment, StructuralPath};
pub use report::{RoundTrip, RoundTripReport};
pub use storage::{MemoryStorage, ScratchStorage, TempFileStorage};
