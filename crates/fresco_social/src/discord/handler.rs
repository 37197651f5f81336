//! Serenity event handler with prefix-command dispatch.

use super::{commands, BotConfig};
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::channel::Message;
use serenity::model::gateway::{GatewayIntents, Ready};
use tracing::{error, info, warn};

/// Event handler for the Fresco bot.
///
/// Carries the bot configuration by value; there is no global state.
pub struct FrescoHandler {
    config: BotConfig,
}

impl FrescoHandler {
    /// Create a new handler with the given configuration.
    pub fn new(config: BotConfig) -> Self {
        Self { config }
    }

    /// Required gateway intents for the bot.
    ///
    /// Guild data for snapshots, message content for prefix commands, and
    /// reactions for the confirmation prompt.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
            | GatewayIntents::GUILD_MESSAGE_REACTIONS
    }

    /// Check authorization for a privileged command, replying to the
    /// invoker when it fails.
    async fn authorize(&self, ctx: &Context, msg: &Message) -> bool {
        let Some(guild_id) = msg.guild_id else {
            let _ = msg
                .channel_id
                .say(&ctx.http, "This command only works inside a server.")
                .await;
            return false;
        };
        match commands::is_authorized(&ctx.http, guild_id, &msg.author, &self.config).await {
            Ok(true) => true,
            Ok(false) => {
                let _ = msg
                    .channel_id
                    .say(&ctx.http, "You need administrator rights to use this command.")
                    .await;
                false
            }
            Err(e) => {
                warn!(error = %e, "Authorization check failed");
                false
            }
        }
    }
}

/// Split a message into command word and arguments when it carries the
/// configured prefix.
fn parse_command<'a>(prefix: &str, content: &'a str) -> Option<(&'a str, Vec<&'a str>)> {
    let rest = content.strip_prefix(prefix)?;
    let mut parts = rest.split_whitespace();
    let command = parts.next()?;
    Some((command, parts.collect()))
}

#[async_trait]
impl EventHandler for FrescoHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "Bot is ready"
        );
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some((command, args)) = parse_command(&self.config.prefix, &msg.content) else {
            return;
        };

        let result = match command {
            "copy_template" => {
                if !self.authorize(&ctx, &msg).await {
                    return;
                }
                commands::copy_template(&ctx, &msg, &self.config, &args).await
            }
            "list_guilds" => {
                if !self.authorize(&ctx, &msg).await {
                    return;
                }
                commands::list_guilds(&ctx, &msg).await
            }
            "create_backup" => {
                if !self.authorize(&ctx, &msg).await {
                    return;
                }
                commands::create_backup(&ctx, &msg, &self.config).await
            }
            "help_template" => commands::help_template(&ctx, &msg, &self.config.prefix).await,
            _ => return,
        };

        if let Err(e) = result {
            error!(command, error = %e, "Command failed");
            let _ = msg
                .channel_id
                .say(&ctx.http, format!("\u{274c} {e}"))
                .await;
        }
    }
}
