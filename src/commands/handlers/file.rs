//! File command handler
//!
//! Handles: file
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{error, info, warn};
use serenity::http::Http;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::AttachmentType;
use serenity::model::id::ChannelId;
use serenity::prelude::Context;
use std::borrow::Cow;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::get_string_option;
use crate::features::files::{FileError, StoredFile};

/// Look up a file by id using the context's store
pub async fn load_file(ctx: &CommandContext, id: &str) -> Result<StoredFile, FileError> {
    ctx.file_store()?.load(id.trim()).await
}

/// Upload a loaded file to a channel
pub async fn upload_file(
    http: &Http,
    channel_id: ChannelId,
    file: StoredFile,
    request_id: Uuid,
) -> Result<()> {
    let StoredFile { filename, bytes } = file;
    let size = bytes.len();

    channel_id
        .send_message(http, |m| {
            m.add_file(AttachmentType::Bytes {
                data: Cow::Owned(bytes),
                filename,
            })
        })
        .await
        .map_err(|e| {
            error!("[{request_id}] Failed to upload file: {e}");
            anyhow!("Failed to upload file: {e}")
        })?;

    info!("[{request_id}] Uploaded file ({size} bytes) to channel {channel_id}");
    Ok(())
}

pub struct FileHandler;

#[async_trait]
impl SlashCommandHandler for FileHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["file"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        let id = get_string_option(&command.data.options, "id")
            .ok_or_else(|| anyhow!("Missing id argument"))?;

        info!(
            "[{request_id}] /file command | Id: '{}' | User: {}",
            id, command.user.id
        );

        let file = match load_file(&ctx, &id).await {
            Ok(file) => file,
            Err(e) => {
                warn!("[{request_id}] File lookup failed: {e:?}");
                command
                    .create_interaction_response(&serenity_ctx.http, |r| {
                        r.kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|m| m.content(e.to_string()).ephemeral(true))
                    })
                    .await?;
                return Ok(());
            }
        };

        let announcement = format!("📎 `{}`", file.filename);
        command
            .create_interaction_response(&serenity_ctx.http, |r| {
                r.kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|m| m.content(announcement))
            })
            .await?;

        upload_file(&serenity_ctx.http, command.channel_id, file, request_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::files::FileStore;

    #[test]
    fn test_file_handler_commands() {
        assert_eq!(FileHandler.command_names(), &["file"]);
    }

    #[tokio::test]
    async fn test_load_file_disabled_without_store() {
        let ctx = CommandContext::new(None);
        assert!(matches!(load_file(&ctx, "mapa").await, Err(FileError::Disabled)));
    }

    #[tokio::test]
    async fn test_load_file_trims_id() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mapa.txt"), "conteúdo").unwrap();
        let ctx = CommandContext::new(Some(FileStore::new(dir.path())));

        let file = load_file(&ctx, " mapa ").await.unwrap();
        assert_eq!(file.filename, "mapa.txt");
    }
}
