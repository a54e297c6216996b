//! Per-command handler implementations
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add FileHandler (file)
//! - 1.0.0: RollHandler (roll) and UtilityHandler (ping, help, uptime)

pub mod file;
pub mod roll;
pub mod utility;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(roll::RollHandler),
        Arc::new(file::FileHandler),
        Arc::new(utility::UtilityHandler),
    ]
}
