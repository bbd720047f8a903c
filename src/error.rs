//! Error types for fixture runs.

use fixture_generator::GeneratorError;
use roundtrip_harness::HarnessError;
use thiserror::Error;

/// Errors that can occur while generating and round-tripping a fixture.
#[derive(Error, Debug)]
pub enum ParityError {
    /// Fixture generation failed before anything was serialized.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// The round trip failed or the two paths diverged.
    #[error(transparent)]
    Harness(#[from] HarnessError),
}

impl ParityError {
    /// Index of the top-level record the failure points into.
    pub fn failing_index(&self) -> Option<usize> {
        match self {
            ParityError::Harness(err) => err.failing_index(),
            ParityError::Generator(_) => None,
        }
    }
}
