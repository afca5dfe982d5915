//! Utility functions and shared types for danmaku-core
//!
//! Contains the error type, hash map helpers and the small numeric helpers
//! shared by the scheduler and the emitter.

pub mod errors;
pub mod hashers;

pub use errors::{CoreError, Result};
pub use hashers::{create_hash_map, create_hash_map_with_capacity, FastMap};

/// Divide, substituting `fallback` when the divisor is zero or the quotient
/// is not finite
///
/// Footprint math divides by `width + canvas_width`; a zero divisor must
/// never leak NaN or infinity into the occupancy comparisons.
#[must_use]
pub fn safe_div(numerator: f64, divisor: f64, fallback: f64) -> f64 {
    if divisor == 0.0 {
        return fallback;
    }
    let quotient = numerator / divisor;
    if quotient.is_finite() {
        quotient
    } else {
        fallback
    }
}

/// Convert seconds to whole centiseconds, rounding to nearest
///
/// Negative and non-finite inputs clamp to zero.
#[must_use]
pub fn seconds_to_centiseconds(seconds: f64) -> u64 {
    let centiseconds = (seconds * 100.0).round();
    if centiseconds.is_finite() && centiseconds > 0.0 {
        centiseconds as u64
    } else {
        0
    }
}

/// Format centiseconds as ASS time `H:MM:SS.CC`
#[must_use]
pub fn format_ass_time(centiseconds: u64) -> String {
    let hours = centiseconds / 360_000;
    let remainder = centiseconds % 360_000;
    let minutes = remainder / 6000;
    let remainder = remainder % 6000;
    let seconds = remainder / 100;
    let cs = remainder % 100;

    format!("{hours}:{minutes:02}:{seconds:02}.{cs:02}")
}
