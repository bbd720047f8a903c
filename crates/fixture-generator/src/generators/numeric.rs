//! Numeric value generators.

use rand::Rng;

/// Generate an integer uniformly over the full signed 32-bit range.
pub fn next_i32<R: Rng>(rng: &mut R) -> i32 {
    rng.gen()
}
