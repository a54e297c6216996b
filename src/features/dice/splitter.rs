//! Length-aware emission of a formatted roll
//!
//! A roll that fits in one Discord message is sent unchanged. Larger rolls go
//! out as the spec segment, the rolls list in fixed-size slices, and finally
//! the result line.

use crate::core::response::{chunk_chars, ROLL_CHUNK_SIZE, SPLIT_THRESHOLD};

use super::format::FormattedRoll;

/// Messages to send for a roll, in order
pub fn split(formatted: &FormattedRoll) -> Vec<String> {
    split_with_limits(formatted, SPLIT_THRESHOLD, ROLL_CHUNK_SIZE)
}

/// Same as [`split`] with explicit thresholds
///
/// Slices are not roll-aware: a slice may end in the middle of a number.
pub fn split_with_limits(formatted: &FormattedRoll, max_len: usize, chunk_size: usize) -> Vec<String> {
    let message = formatted.message();
    if message.chars().count() <= max_len {
        return vec![message];
    }

    let mut segments = Vec::with_capacity(2 + formatted.rolls.len() / chunk_size.max(1) + 1);
    segments.push(formatted.spec.clone());
    segments.extend(chunk_chars(&formatted.rolls, chunk_size));
    segments.push(formatted.result_line());
    segments
}
