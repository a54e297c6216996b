//! Utility command handlers
//!
//! Handles: ping, help, uptime
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;

pub const HELP_TEXT: &str = r#"**Comandos disponíveis:**
`/roll <expressão>` ou `!roll <expressão>` - Rolar dados, ex: `6d6 + 2` ou `3d20`
`/file <id>` ou `!file <id>` - Enviar um arquivo pelo id
`/ping` - Testar se o bot responde
`/uptime` - Tempo desde que o bot iniciou
`/help` - Mostrar esta mensagem

Limites: 1–500 dados, 2–1000 lados, modificador até 999999."#;

/// Handler for utility commands: ping, help, uptime
pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ping", "help", "uptime"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        let response = match command.data.name.as_str() {
            "ping" => "Pong!".to_string(),
            "help" => HELP_TEXT.to_string(),
            "uptime" => format_uptime(ctx.start_time.elapsed()),
            _ => return Ok(()),
        };

        command
            .create_interaction_response(&serenity_ctx.http, |r| {
                r.kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|m| m.content(response))
            })
            .await?;

        info!(
            "[{request_id}] /{} command completed for user {}",
            command.data.name, command.user.id
        );
        Ok(())
    }
}

/// Human-readable uptime, omitting leading zero units
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if days > 0 {
        format!("⏱️ Uptime: {days}d {hours}h {minutes}m {seconds}s")
    } else if hours > 0 {
        format!("⏱️ Uptime: {hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("⏱️ Uptime: {minutes}m {seconds}s")
    } else {
        format!("⏱️ Uptime: {seconds}s")
    }
}
