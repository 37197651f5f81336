//! Discord bot client setup and lifecycle management.

use super::{BotConfig, DiscordError, DiscordErrorKind, FrescoHandler};
use serenity::Client;
use tracing::{info, instrument};

/// Main Discord client for Fresco.
///
/// Wraps the Serenity client with the Fresco event handler installed.
///
/// # Example
/// ```no_run
/// use fresco_social::{BotConfig, FrescoBot};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     dotenvy::dotenv().ok();
///     let config = BotConfig::from_env()?;
///
///     let mut bot = FrescoBot::new(config).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct FrescoBot {
    client: Client,
}

impl FrescoBot {
    /// Create a new FrescoBot instance.
    ///
    /// # Errors
    /// Returns an error if the bot token is invalid or the Serenity client
    /// fails to initialize.
    #[instrument(skip(config), fields(prefix = %config.prefix))]
    pub async fn new(config: BotConfig) -> Result<Self, DiscordError> {
        let intents = FrescoHandler::intents();
        info!("Building Serenity client with intents: {:?}", intents);

        let token = config.token.clone();
        let client = Client::builder(&token, intents)
            .event_handler(FrescoHandler::new(config))
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        info!("Serenity client built successfully");
        Ok(Self { client })
    }

    /// Start the bot.
    ///
    /// This method blocks until the bot is shut down.
    ///
    /// # Errors
    /// Returns an error if the client fails to start or encounters a fatal
    /// error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), DiscordError> {
        info!("Starting Discord bot");

        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })?;

        Ok(())
    }
}
