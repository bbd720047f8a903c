//! Unicode string generators.
//!
//! Characters are drawn from the whole Unicode scalar-value space so that generated text
//! mixes one-, two-, three-, and four-byte UTF-8 sequences.

use rand::Rng;

/// One past the largest Unicode code point.
pub const CODE_POINT_LIMIT: u32 = 0x11_0000;

/// Draw a random Unicode scalar value.
///
/// Code points are drawn uniformly from `0..0x110000`; surrogates are not scalar values
/// and are re-drawn.
pub fn next_scalar<R: Rng>(rng: &mut R) -> char {
    loop {
        if let Some(c) = char::from_u32(rng.gen_range(0..CODE_POINT_LIMIT)) {
            return c;
        }
    }
}

/// Build a string of exactly `len` random scalar values.
pub fn next_string<R: Rng>(rng: &mut R, len: usize) -> String {
    let mut value = String::with_capacity(len * 4);
    for _ in 0..len {
        value.push(next_scalar(rng));
    }
    value
}
