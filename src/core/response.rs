//! Discord message size limits and chunking
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Replace line-aware chunking with fixed-size slicing for roll lists
//! - 1.0.0: Initial limits

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;
/// Messages longer than this are split before sending
pub const SPLIT_THRESHOLD: usize = 1900;
/// Size of each slice of an oversized roll list
pub const ROLL_CHUNK_SIZE: usize = 1700;

/// Slice text into pieces of at most `max_chars` characters
///
/// Splits purely by position, never mid-character. Empty input yields no pieces.
pub fn chunk_chars(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut result = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in text.chars() {
        if count == max_chars {
            result.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }

    if !current.is_empty() {
        result.push(current);
    }

    result
}
