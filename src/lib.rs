// Core layer - configuration, message limits and delivery
pub mod core;

// Features layer - dice engine and file store
pub mod features;

// Application layer
pub mod command_handler;
pub mod commands;

// HTTP trigger
pub mod webhook;

pub use crate::core::Config;

pub use features::{
    roll_expression, FileError, FileStore, FormattedRoll, RollError, RollExpression, RollResult,
};
