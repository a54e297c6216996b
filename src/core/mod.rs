//! # Core Module
//!
//! Configuration, Discord message limits and segment delivery shared by the
//! chat commands and the webhook.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Add delivery module with the ChannelSender seam
//! - 1.1.0: Add response module with message size limits
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod delivery;
pub mod response;

// Re-export commonly used items
pub use config::{Config, WebhookConfig};
pub use delivery::{deliver, ChannelSender, HttpSender};
pub use response::{chunk_chars, MESSAGE_LIMIT, ROLL_CHUNK_SIZE, SPLIT_THRESHOLD};
