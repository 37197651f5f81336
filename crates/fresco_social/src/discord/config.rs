//! Bot configuration read from the environment.
//!
//! All settings travel inside an owned [`BotConfig`] value handed to the
//! handler at construction time; there is no process-wide mutable state.

use fresco_error::{ConfigError, FrescoResult};
use serenity::model::id::RoleId;

/// Runtime configuration for the bot.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Discord bot token.
    pub token: String,
    /// Command prefix, e.g. `!`.
    pub prefix: String,
    /// Roles whose holders may run operator commands, in addition to
    /// members with the Administrator permission.
    pub admin_roles: Vec<RoleId>,
}

impl BotConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `DISCORD_TOKEN` (required), `COMMAND_PREFIX` (default `!`),
    /// and `ADMIN_ROLES` (optional comma-separated role ids). Call
    /// `dotenvy::dotenv()` first if a `.env` file should participate.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or `ADMIN_ROLES` contains
    /// a non-numeric entry.
    pub fn from_env() -> FrescoResult<Self> {
        let token = std::env::var("DISCORD_TOKEN")
            .map_err(|_| ConfigError::new("DISCORD_TOKEN is not set"))?;
        let prefix = std::env::var("COMMAND_PREFIX").unwrap_or_else(|_| "!".to_string());
        let admin_roles = parse_role_list(&std::env::var("ADMIN_ROLES").unwrap_or_default())?;
        Ok(Self {
            token,
            prefix,
            admin_roles,
        })
    }
}

/// Parse a comma-separated list of role ids, ignoring empty entries.
fn parse_role_list(raw: &str) -> FrescoResult<Vec<RoleId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>().map(RoleId::new).map_err(|_| {
                ConfigError::new(format!("Invalid role id in ADMIN_ROLES: {part}")).into()
            })
        })
        .collect()
}
