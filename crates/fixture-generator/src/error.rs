//! Error types for fixture generation.

use thiserror::Error;

/// Errors that can occur while generating fixture values.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// No generator was registered for the requested type.
    ///
    /// This is a configuration bug and is never retried.
    #[error("Failed to generate type {type_name}: was not registered")]
    UnregisteredType { type_name: &'static str },

    /// A registered factory produced a value of a different type than its key.
    ///
    /// [`ValueRegistry::register`](crate::ValueRegistry::register) keys every factory by the
    /// `TypeId` of the value it boxes, so this only surfaces if that invariant is broken.
    #[error("Generator for {type_name} produced a value of another type")]
    TypeMismatch { type_name: &'static str },

    /// A bounded count range was given with `min > max`.
    #[error("Invalid count range: min {min} is greater than max {max}")]
    InvalidRange { min: usize, max: usize },

    /// A user-supplied generator function failed.
    #[error("Generator failed: {0}")]
    Generation(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GeneratorError {
    /// Wrap an error raised inside a user-supplied generator function.
    pub fn generation(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        GeneratorError::Generation(err.into())
    }
}
