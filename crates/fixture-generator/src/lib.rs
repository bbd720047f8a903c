//! Type-keyed random fixture generator for stream-parity.
//!
//! This crate provides the [`RandomGenerator`] which produces deterministic object graphs
//! from registered per-type generator functions. The generator threads a single seeded RNG
//! through every nested call, so the same seed and the same registrations always produce
//! the same values in the same draw order.
//!
//! # Architecture
//!
//! ```text
//! register::<T>(|r| ...)          (first registration per type wins)
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │   RandomGenerator    │
//! │                      │
//! │  - seed              │
//! │  - rng (StdRng)      │
//! │  - ValueRegistry     │──── TypeId -> type-erased factory
//! └──────────┬───────────┘
//!            │  create::<T>() / create_array / null_or
//!            ▼
//!        T (nested records, optionals, collections)
//! ```
//!
//! # Example
//!
//! ```rust
//! use fixture_generator::{GeneratorError, RandomGenerator};
//!
//! #[derive(Debug)]
//! struct Point {
//!     x: Option<i32>,
//!     label: String,
//! }
//!
//! let mut generator = RandomGenerator::new(42).register(|r: &mut RandomGenerator| {
//!     Ok::<_, GeneratorError>(Point {
//!         x: r.null_or(0.5, RandomGenerator::create::<i32>)?,
//!         label: r.create::<String>()?,
//!     })
//! });
//!
//! let points = generator.create_array::<Point>(10).unwrap();
//! assert_eq!(points.len(), 10);
//! ```
//!
//! # Built-in generators
//!
//! - `i32` - uniformly distributed over the full signed 32-bit range
//! - `bool` - fair coin
//! - `String` - 5 to 9 Unicode scalar values drawn from the whole scalar-value space

pub mod error;
pub mod generator;
pub mod generators;
pub mod registry;

// Re-exports for convenience
pub use error::GeneratorError;
pub use generator::RandomGenerator;
pub use registry::{ErasedFactory, TypeKey, ValueRegistry};
