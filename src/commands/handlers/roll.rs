//! Roll command handler
//!
//! Handles: roll
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Send oversized rolls as spec, list slices and result
//! - 1.0.0: Initial implementation

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::get_string_option;
use crate::features::dice::{self, RollError};

/// Roll an expression with a fresh thread-local random source
///
/// Returns the messages to send in order.
pub fn roll_segments(expression: &str) -> Result<Vec<String>, RollError> {
    let formatted = dice::roll_expression(expression, &mut rand::rng())?;
    Ok(dice::split(&formatted))
}

pub struct RollHandler;

#[async_trait]
impl SlashCommandHandler for RollHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["roll"]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        request_id: Uuid,
    ) -> Result<()> {
        let expression = get_string_option(&command.data.options, "expression")
            .ok_or_else(|| anyhow!("Missing expression argument"))?;

        info!(
            "[{request_id}] /roll command | Expression: '{}' | User: {}",
            expression, command.user.id
        );

        let segments = match roll_segments(&expression) {
            Ok(segments) => segments,
            Err(e) => {
                info!("[{request_id}] Rejected roll expression: {e:?}");
                command
                    .create_interaction_response(&serenity_ctx.http, |r| {
                        r.kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|m| m.content(e.to_string()).ephemeral(true))
                    })
                    .await?;
                return Ok(());
            }
        };

        debug!("[{request_id}] Roll produced {} message(s)", segments.len());

        // The first segment answers the interaction, the rest follow in the channel
        let mut segments = segments.into_iter();
        if let Some(first) = segments.next() {
            command
                .create_interaction_response(&serenity_ctx.http, |r| {
                    r.kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|m| m.content(first))
                })
                .await?;
        }
        for segment in segments {
            command.channel_id.say(&serenity_ctx.http, segment).await?;
        }

        info!("[{request_id}] /roll response sent");
        Ok(())
    }
}
