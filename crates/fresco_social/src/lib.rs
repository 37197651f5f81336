//! Discord integration for Fresco.
//!
//! This crate connects the platform-agnostic reconciliation engine in
//! `fresco_sync` to Discord via the Serenity library:
//!
//! - **client**: Serenity client setup and lifecycle management
//! - **handler**: prefix-command dispatch implementing Serenity's
//!   EventHandler trait
//! - **host**: the engine's `GuildHost` trait implemented over Serenity's
//!   HTTP client
//! - **commands**: the operator-facing commands (structure copy with
//!   reaction confirmation, guild listing, backup info, help)
//! - **progress**: direct-message progress reporting with fallbacks
//! - **error**: Discord-specific error types

#![warn(missing_docs)]

mod discord;

pub use discord::{
    BotConfig, DiscordError, DiscordErrorKind, DiscordResult, FrescoBot, FrescoHandler,
    OperatorNotifier, SerenityHost,
};
