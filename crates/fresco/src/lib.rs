//! Fresco — mirror one Discord server's structure onto another.
//!
//! Fresco is a Discord bot operated through prefix commands. Its
//! `copy_template` command reconciles a target guild's roles, categories,
//! channels, and permission overwrites against a source guild, after a
//! reaction-confirmed go-ahead from the operator.
//!
//! # Architecture
//!
//! The workspace is organized as focused crates:
//!
//! - `fresco_core` — platform-agnostic domain model (snapshots, identity
//!   map, ordering rules)
//! - `fresco_error` — foundation error types
//! - `fresco_sync` — the reconciliation engine behind the `GuildHost`
//!   trait
//! - `fresco_social` — Serenity client, command handling, and the
//!   Discord-backed host
//!
//! This crate re-exports the public API for convenience and carries the
//! `fresco` binary.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fresco::{BotConfig, FrescoBot};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     dotenvy::dotenv().ok();
//!     let mut bot = FrescoBot::new(BotConfig::from_env()?).await?;
//!     bot.start().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub use fresco_core::{
    CategorySpec, ChannelId, ChannelKind, ChannelSpec, GuildId, GuildSnapshot, IdentityMap,
    MemberId, OverwriteSpec, PermissionPair, PermissionSet, Principal, RoleId, RoleSpec,
};
pub use fresco_error::{ConfigError, FrescoError, FrescoErrorKind, FrescoResult, HostError};
pub use fresco_social::{
    BotConfig, DiscordError, DiscordErrorKind, DiscordResult, FrescoBot, FrescoHandler,
    OperatorNotifier, SerenityHost,
};
pub use fresco_sync::{
    run_guarded, Action, Disposition, EntityKind, GuildHost, ItemOutcome, LogSink, ProgressSink,
    Stage, StageReport, SyncOutcome, SyncReport, Verdict,
};
