//! Shared context for command handlers
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add FileStore for the file command
//! - 1.0.0: Initial implementation with start time

use crate::features::files::{FileError, FileStore};

/// Shared context for all command handlers
///
/// Holds no per-request state; every roll gets its own random source.
#[derive(Clone)]
pub struct CommandContext {
    pub files: Option<FileStore>,
    pub start_time: std::time::Instant,
}

impl CommandContext {
    pub fn new(files: Option<FileStore>) -> Self {
        Self {
            files,
            start_time: std::time::Instant::now(),
        }
    }

    /// The file store, or `FileError::Disabled` when no directory is configured
    pub fn file_store(&self) -> Result<&FileStore, FileError> {
        self.files.as_ref().ok_or(FileError::Disabled)
    }
}
