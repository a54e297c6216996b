use anyhow::Result;
use log::{debug, info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handlers::file::{load_file, upload_file};
use crate::commands::handlers::roll::roll_segments;
use crate::commands::registry::CommandRegistry;
use crate::core::{deliver, HttpSender};

/// A text command recognised in a channel message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextCommand<'a> {
    /// `!roll <expression>`; the expression may be empty
    Roll(&'a str),
    /// `!file <id>`
    File(&'a str),
}

impl<'a> TextCommand<'a> {
    /// Parse `content` as a prefixed command
    ///
    /// The command name must be followed by whitespace or the end of the message,
    /// so `!rolls` is not `!roll`.
    pub fn parse(content: &'a str, prefix: &str) -> Option<Self> {
        let rest = content.trim_start().strip_prefix(prefix)?;
        let (name, args) = match rest.find(char::is_whitespace) {
            Some(pos) => (&rest[..pos], rest[pos..].trim()),
            None => (rest, ""),
        };

        match name {
            "roll" => Some(TextCommand::Roll(args)),
            "file" => Some(TextCommand::File(args)),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct CommandHandler {
    ctx: Arc<CommandContext>,
    registry: CommandRegistry,
    prefix: String,
}

impl CommandHandler {
    pub fn new(ctx: CommandContext, prefix: impl Into<String>) -> Self {
        CommandHandler {
            ctx: Arc::new(ctx),
            registry: CommandRegistry::with_default_handlers(),
            prefix: prefix.into(),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub async fn handle_message(&self, ctx: &Context, msg: &Message) -> Result<()> {
        let Some(command) = TextCommand::parse(&msg.content, &self.prefix) else {
            return Ok(());
        };

        let request_id = Uuid::new_v4();
        info!(
            "[{request_id}] 📥 Text command {:?} | User: {} | Channel: {}",
            command, msg.author.id, msg.channel_id
        );

        match command {
            TextCommand::Roll("") => {
                msg.channel_id
                    .say(&ctx.http, format!("Uso: `{}roll 6d6 + 2`", self.prefix))
                    .await?;
            }
            TextCommand::Roll(expression) => {
                let segments = match roll_segments(expression) {
                    Ok(segments) => segments,
                    Err(e) => {
                        debug!("[{request_id}] Rejected roll expression: {e:?}");
                        vec![e.to_string()]
                    }
                };
                let sender = HttpSender::new(ctx.http.clone());
                let sent = deliver(&sender, msg.channel_id.0, &segments).await?;
                info!("[{request_id}] ✅ Roll sent in {sent} message(s)");
            }
            TextCommand::File(id) => match load_file(&self.ctx, id).await {
                Ok(file) => upload_file(&ctx.http, msg.channel_id, file, request_id).await?,
                Err(e) => {
                    warn!("[{request_id}] File lookup failed: {e:?}");
                    msg.channel_id.say(&ctx.http, e.to_string()).await?;
                }
            },
        }

        Ok(())
    }

    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let guild_id = command
            .guild_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "DM".to_string());

        info!(
            "[{}] 📥 Slash command received | Command: {} | User: {} | Channel: {} | Guild: {}",
            request_id, command.data.name, command.user.id, command.channel_id, guild_id
        );

        match self.registry.get(&command.data.name) {
            Some(handler) => {
                handler
                    .handle(Arc::clone(&self.ctx), ctx, command, request_id)
                    .await
            }
            None => {
                warn!("[{request_id}] Unknown slash command: {}", command.data.name);
                Ok(())
            }
        }
    }
}
