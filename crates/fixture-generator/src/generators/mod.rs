//! Built-in value generators.
//!
//! These are registered on every [`RandomGenerator`] at construction, before any user
//! registration, so a user generator for the same type is ignored.

pub mod numeric;
pub mod string;

use crate::generator::RandomGenerator;
use crate::registry::ValueRegistry;
use rand::Rng;
use std::ops::Range;

/// Length range of built-in random strings, in Unicode scalar values.
pub const DEFAULT_STRING_LENGTH: Range<usize> = 5..10;

/// Register the built-in `i32`, `bool`, and `String` generators.
pub fn register_defaults(registry: &mut ValueRegistry) {
    registry.register::<i32, _>(|r: &mut RandomGenerator| Ok(numeric::next_i32(r.rng_mut())));
    registry.register::<bool, _>(|r: &mut RandomGenerator| Ok(r.rng_mut().gen::<bool>()));
    registry.register::<String, _>(|r: &mut RandomGenerator| {
        let rng = r.rng_mut();
        let len = rng.gen_range(DEFAULT_STRING_LENGTH);
        Ok(string::next_string(rng, len))
    });
}
