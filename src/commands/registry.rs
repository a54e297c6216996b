//! Slash command dispatch table
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Built from `create_all_handlers`; later registrations replace earlier ones
//! - 1.0.0: Initial implementation for handler dispatch

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::SlashCommandHandler;
use super::handlers::create_all_handlers;

/// Maps each slash command name to the handler that answers it
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn SlashCommandHandler>>,
}

impl CommandRegistry {
    /// Registry holding every built-in handler
    pub fn with_default_handlers() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
        };
        for handler in create_all_handlers() {
            registry.register(handler);
        }
        registry
    }

    /// Route every name the handler declares to it, replacing any previous owner
    pub fn register(&mut self, handler: Arc<dyn SlashCommandHandler>) {
        for &name in handler.command_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SlashCommandHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::handlers::roll::RollHandler;
    use crate::commands::handlers::utility::UtilityHandler;
    use crate::commands::slash::create_slash_commands;

    fn same_handler(a: &Arc<dyn SlashCommandHandler>, b: &Arc<dyn SlashCommandHandler>) -> bool {
        std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
    }

    #[test]
    fn test_every_slash_definition_resolves() {
        let registry = CommandRegistry::with_default_handlers();
        for command in create_slash_commands() {
            let name = command.0.get("name").unwrap().as_str().unwrap().to_string();
            let handler = registry.get(&name).unwrap_or_else(|| panic!("No handler for /{name}"));
            assert!(handler.command_names().contains(&name.as_str()));
        }
    }

    #[test]
    fn test_utility_names_share_one_handler() {
        let registry = CommandRegistry::with_default_handlers();
        let ping = registry.get("ping").unwrap();
        assert!(same_handler(&ping, &registry.get("help").unwrap()));
        assert!(same_handler(&ping, &registry.get("uptime").unwrap()));
        assert!(!same_handler(&ping, &registry.get("roll").unwrap()));
    }

    #[test]
    fn test_reregistering_replaces_handler() {
        let mut registry = CommandRegistry::with_default_handlers();
        let original = registry.get("roll").unwrap();

        let replacement: Arc<dyn SlashCommandHandler> = Arc::new(RollHandler);
        registry.register(Arc::clone(&replacement));

        let current = registry.get("roll").unwrap();
        assert!(same_handler(&current, &replacement));
        assert!(!same_handler(&current, &original));
        // Names owned by other handlers are untouched
        assert!(registry.get("ping").is_some());
    }

    #[test]
    fn test_partial_overlap_moves_only_shared_names() {
        let mut registry = CommandRegistry::with_default_handlers();
        let utility: Arc<dyn SlashCommandHandler> = Arc::new(UtilityHandler);
        registry.register(Arc::clone(&utility));

        for name in ["ping", "help", "uptime"] {
            assert!(same_handler(&registry.get(name).unwrap(), &utility));
        }
        assert!(!same_handler(&registry.get("file").unwrap(), &utility));
    }

    #[test]
    fn test_unknown_and_prefixed_names_miss() {
        let registry = CommandRegistry::with_default_handlers();
        assert!(registry.get("rolls").is_none());
        assert!(!registry.contains("!roll"));
        assert!(!registry.contains(""));
    }
}
