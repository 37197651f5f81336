//! Discord bot implementation built on Serenity.

mod client;
mod commands;
mod config;
mod conversions;
mod error;
mod handler;
mod host;
mod progress;

pub use client::FrescoBot;
pub use config::BotConfig;
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use handler::FrescoHandler;
pub use host::SerenityHost;
pub use progress::OperatorNotifier;
