//! stream-parity
//!
//! A differential test harness that checks a streaming deserializer against a whole-buffer
//! deserializer on large, randomly generated, reproducible fixtures.
//!
//! # Crates
//!
//! - `fixture_generator` - type-keyed random value generator driven by one seeded RNG
//! - `roundtrip_harness` - serialize once, parse buffered and streamed, compare structurally
//!
//! This crate holds the fixture records and ties the two together:
//!
//! ```text
//! FixtureConfig ──▶ fixture_generator() ──▶ Vec<Record>
//!                                              │
//! HarnessConfig ──▶ RoundTripHarness::run ◀────┘
//!                          │
//!                          ▼
//!            RoundTripReport | ParityError (path of first divergence)
//! ```

pub mod error;
pub mod fixture;

pub use error::ParityError;
pub use fixture::{
    fixture_generator, generate_records, non_random_records, repro_record, FixtureConfig,
    Nested, Record,
};

use roundtrip_harness::{HarnessConfig, RoundTrip, RoundTripHarness};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Generate the fixture described by `fixture` and round-trip it with `harness`.
pub async fn run_fixture(
    fixture: &FixtureConfig,
    harness: &HarnessConfig,
    cancel: &CancellationToken,
) -> Result<RoundTrip<Vec<Record>>, ParityError> {
    let records = generate_records(fixture)?;
    run_records(&records, harness, cancel).await
}

/// Round-trip an already built set of records.
///
/// Takes `&Vec` rather than a slice: the harness decodes into the same type it serialized,
/// which must be a sized, owned `Vec<Record>`.
pub async fn run_records(
    records: &Vec<Record>,
    harness: &HarnessConfig,
    cancel: &CancellationToken,
) -> Result<RoundTrip<Vec<Record>>, ParityError> {
    info!("Round-tripping {} records", records.len());
    let outcome = RoundTripHarness::new(harness.clone())
        .run(records, cancel)
        .await?;
    Ok(outcome)
}
