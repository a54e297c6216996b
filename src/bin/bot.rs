use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use rolagem::commands::{register_global_commands, register_guild_commands, CommandContext, CommandHandler};
use rolagem::core::{Config, HttpSender};
use rolagem::features::FileStore;
use rolagem::webhook::{self, WebhookState};

struct Handler {
    command_handler: Arc<CommandHandler>,
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        if let Err(e) = self.command_handler.handle_message(&ctx, &msg).await {
            error!("Error handling message: {e:#}");
            if let Err(why) = msg
                .channel_id
                .say(&ctx.http, "Desculpe, ocorreu um erro ao processar o comando.")
                .await
            {
                error!("Failed to send error message: {why}");
            }
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("✅ Logged in as {} (id={})", ready.user.name, ready.user.id);
        info!("📡 Connected to {} guilds", ready.guilds.len());

        let result = match self.guild_id {
            Some(guild_id) => register_guild_commands(&ctx, guild_id).await,
            None => register_global_commands(&ctx).await,
        };
        if let Err(e) = result {
            error!("Slash command registration failed: {e:#}");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            if let Err(e) = self
                .command_handler
                .handle_slash_command(&ctx, &command)
                .await
            {
                error!(
                    "Error handling slash command '{}': {:#}",
                    command.data.name, e
                );

                let error_message = "❌ Desculpe, ocorreu um erro ao processar o comando.";

                // The interaction may already have been answered; fall back to the channel
                #[allow(clippy::redundant_pattern_matching)]
                if let Err(_) = command
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| message.content(error_message))
                    })
                    .await
                {
                    let _ = command.channel_id.say(&ctx.http, error_message).await;
                }
            }
        }
    }
}

/// Resolve on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting dice bot...");

    let files = config.files_dir.as_ref().map(FileStore::new);
    match &files {
        Some(store) => info!("📁 Serving files from {}", store.root().display()),
        None => info!("📁 FILES_DIR not set - file command disabled"),
    }

    let command_handler = CommandHandler::new(CommandContext::new(files), &config.command_prefix);

    let handler = Handler {
        command_handler: Arc::new(command_handler),
        guild_id: config.discord_guild_id.map(GuildId),
    };

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    if let Some(webhook_config) = config.webhook.clone() {
        let sender = Arc::new(HttpSender::new(client.cache_and_http.http.clone()));
        let state = WebhookState::new(webhook_config.secret, sender);
        tokio::spawn(async move {
            if let Err(e) = webhook::serve(webhook_config.addr, state).await {
                error!("Webhook server stopped: {e:#}");
            }
        });
    } else {
        info!("🪝 WEBHOOK_ADDR not set - webhook disabled");
    }

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        warn!("Shutting down...");
        shard_manager.lock().await.shutdown_all().await;
    });

    info!("Establishing WebSocket connection to Discord gateway...");
    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    info!("Disconnected from Discord gateway");
    Ok(())
}
