//! Gray code transforms between bit strings and real values.
//!
//! Chromosomes are stored most significant bit first. A chromosome of
//! length `L` addresses `2^L` evenly spaced points of its interval; the
//! length is chosen so that the spacing is no coarser than the requested
//! precision.
//!
//! Gray coding keeps neighbouring integers one bit apart, so a single-bit
//! mutation tends to move the decoded value by a small step.

use super::params::Interval;
use crate::error::GaError;

/// Largest chromosome length that fits the integer decoder.
pub const MAX_BITS: usize = 64;

/// Number of bits needed to resolve `[lower, upper]` at precision `epsilon`.
///
/// Returns `ceil(log2((upper - lower) / epsilon + 1))`.
///
/// # Errors
/// [`GaError::InvalidDomain`] if `upper <= lower`, `epsilon <= 0` or any
/// bound is NaN, and [`GaError::EncodingTooLong`] past [`MAX_BITS`].
/// Both report dimension 0; [`FunctionParams`](super::FunctionParams)
/// fills in the real index.
pub fn encode_length(lower: f64, upper: f64, epsilon: f64) -> Result<usize, GaError> {
    if !(upper > lower) || !(epsilon > 0.0) {
        return Err(GaError::InvalidDomain {
            dimension: 0,
            lower,
            upper,
            epsilon,
        });
    }

    let steps = (upper - lower) / epsilon + 1.0;
    let length = steps.log2().ceil();
    if !length.is_finite() || length > MAX_BITS as f64 {
        return Err(GaError::EncodingTooLong {
            dimension: 0,
            length: if length.is_finite() {
                length as usize
            } else {
                usize::MAX
            },
        });
    }
    // (upper - lower) / epsilon can underflow to 0 for tiny ranges.
    Ok((length as usize).max(1))
}

/// Converts a Gray-coded bit string to plain binary.
///
/// `binary[0] = gray[0]`, `binary[i] = gray[i] ^ binary[i - 1]`.
pub fn gray_to_binary(gray: &[bool]) -> Vec<bool> {
    let mut binary = Vec::with_capacity(gray.len());
    let mut previous = false;
    for &bit in gray {
        previous ^= bit;
        binary.push(previous);
    }
    binary
}

/// Converts a plain binary bit string to Gray code.
///
/// `gray[0] = binary[0]`, `gray[i] = binary[i] ^ binary[i - 1]`.
pub fn binary_to_gray(binary: &[bool]) -> Vec<bool> {
    let mut gray = Vec::with_capacity(binary.len());
    let mut previous = false;
    for &bit in binary {
        gray.push(bit ^ previous);
        previous = bit;
    }
    gray
}

/// Reads an MSB-first bit string as an unsigned integer.
///
/// Only the last 64 bits contribute.
pub fn bits_to_u64(bits: &[bool]) -> u64 {
    bits.iter().fold(0u64, |acc, &bit| (acc << 1) | bit as u64)
}

/// Writes the low `length` bits of `value`, most significant first.
pub fn u64_to_bits(value: u64, length: usize) -> Vec<bool> {
    (0..length)
        .rev()
        .map(|shift| shift < 64 && (value >> shift) & 1 == 1)
        .collect()
}

/// Largest integer representable with `length` bits.
fn max_value(length: usize) -> u64 {
    if length >= 64 {
        u64::MAX
    } else {
        (1u64 << length) - 1
    }
}

/// Decodes a Gray-coded chromosome into a point of `interval`.
///
/// The integer is mapped linearly onto `[lower, upper]` and then snapped
/// to the nearest multiple of `epsilon`. Snapping may land up to
/// `epsilon / 2` outside the interval; that slop is accepted.
///
/// An empty bit string decodes to `lower`.
pub fn decode(bits: &[bool], interval: &Interval) -> f64 {
    if bits.is_empty() {
        return interval.lower;
    }
    let binary = bits_to_u64(&gray_to_binary(bits));
    let span = interval.upper - interval.lower;
    let value = interval.lower + binary as f64 * (span / max_value(bits.len()) as f64);
    (value / interval.epsilon).round() * interval.epsilon
}

/// Encodes `value` as the nearest of the `2^length` grid points of `interval`.
///
/// Values outside the interval are clamped to its ends.
pub fn encode(value: f64, interval: &Interval, length: usize) -> Vec<bool> {
    let max = max_value(length);
    let span = interval.upper - interval.lower;
    let ratio = ((value - interval.lower) / span).clamp(0.0, 1.0);
    let index = (ratio * max as f64).round();
    // `as` saturates, so 2^64 rounding up stays at u64::MAX.
    let binary = u64_to_bits(index as u64, length);
    binary_to_gray(&binary)
}
