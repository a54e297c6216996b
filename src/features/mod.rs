//! # Features
//!
//! - `dice`: expression parsing, rolling, formatting and splitting
//! - `files`: file lookup for the file command

pub mod dice;
pub mod files;

pub use dice::{roll_expression, FormattedRoll, RollError, RollExpression, RollResult};
pub use files::{FileError, FileStore, StoredFile};
