//! Environment configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add webhook and file directory settings
//! - 1.0.0: Initial token, guild and log level settings

use anyhow::{anyhow, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Register slash commands on this guild only (faster during development)
    pub discord_guild_id: Option<u64>,
    pub log_level: String,
    pub command_prefix: String,
    /// Directory served by the file command; disabled when unset
    pub files_dir: Option<PathBuf>,
    pub webhook: Option<WebhookConfig>,
}

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub addr: SocketAddr,
    pub secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let discord_token = get("DISCORD_TOKEN").ok_or_else(|| anyhow!("DISCORD_TOKEN not set"))?;

        let discord_guild_id = get("DISCORD_GUILD_ID")
            .map(|id| {
                id.trim()
                    .parse::<u64>()
                    .with_context(|| format!("DISCORD_GUILD_ID is not a valid id: {id}"))
            })
            .transpose()?;

        let log_level = get("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let command_prefix = get("COMMAND_PREFIX").unwrap_or_else(|| "!".to_string());
        let files_dir = get("FILES_DIR").map(PathBuf::from);

        let webhook = match get("WEBHOOK_ADDR") {
            Some(addr) => {
                let addr: SocketAddr = addr
                    .trim()
                    .parse()
                    .with_context(|| format!("WEBHOOK_ADDR is not a socket address: {addr}"))?;
                let secret = get("WEBHOOK_SECRET")
                    .ok_or_else(|| anyhow!("WEBHOOK_SECRET must be set when WEBHOOK_ADDR is"))?;
                Some(WebhookConfig { addr, secret })
            }
            None => None,
        };

        Ok(Config {
            discord_token,
            discord_guild_id,
            log_level,
            command_prefix,
            files_dir,
            webhook,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = config_from(&[("DISCORD_TOKEN", "abc")]).unwrap();
        assert_eq!(config.discord_token, "abc");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.command_prefix, "!");
        assert!(config.discord_guild_id.is_none());
        assert!(config.files_dir.is_none());
        assert!(config.webhook.is_none());
    }

    #[test]
    fn test_missing_token_fails() {
        assert!(config_from(&[]).is_err());
        assert!(config_from(&[("DISCORD_TOKEN", "  ")]).is_err());
    }

    #[test]
    fn test_guild_id_parsed() {
        let config = config_from(&[("DISCORD_TOKEN", "t"), ("DISCORD_GUILD_ID", "1234")]).unwrap();
        assert_eq!(config.discord_guild_id, Some(1234));
        assert!(config_from(&[("DISCORD_TOKEN", "t"), ("DISCORD_GUILD_ID", "abc")]).is_err());
    }

    #[test]
    fn test_webhook_requires_secret() {
        let err = config_from(&[("DISCORD_TOKEN", "t"), ("WEBHOOK_ADDR", "127.0.0.1:8080")]);
        assert!(err.is_err());

        let config = config_from(&[
            ("DISCORD_TOKEN", "t"),
            ("WEBHOOK_ADDR", "127.0.0.1:8080"),
            ("WEBHOOK_SECRET", "s3cret"),
        ])
        .unwrap();
        let webhook = config.webhook.unwrap();
        assert_eq!(webhook.addr.port(), 8080);
        assert_eq!(webhook.secret, "s3cret");
    }

    #[test]
    fn test_bad_webhook_addr_fails() {
        let result = config_from(&[
            ("DISCORD_TOKEN", "t"),
            ("WEBHOOK_ADDR", "not an address"),
            ("WEBHOOK_SECRET", "s"),
        ]);
        assert!(result.is_err());
    }
}
