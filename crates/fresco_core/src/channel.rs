//! Category and channel attributes.

use crate::{ChannelId, OverwriteSpec};
use serde::{Deserialize, Serialize};

/// A named, positioned grouping of channels with its own overwrite set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    /// Category identifier.
    pub id: ChannelId,
    /// Category name.
    pub name: String,
    /// Position among categories, ascending top to bottom.
    pub position: u16,
    /// Permission overwrites scoped to the category.
    pub overwrites: Vec<OverwriteSpec>,
}

/// Variant-specific channel attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    /// A text channel.
    Text {
        /// Channel topic, if set.
        topic: Option<String>,
        /// Slow-mode delay between messages per user, in seconds.
        slowmode_secs: u16,
        /// Whether the channel is age-restricted.
        nsfw: bool,
    },
    /// A voice channel.
    Voice {
        /// Audio bit-rate in bits per second.
        bitrate: u32,
        /// Maximum number of members that may join, if capped.
        user_limit: Option<u32>,
    },
}

/// A channel's attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    /// Channel identifier.
    pub id: ChannelId,
    /// Channel name.
    pub name: String,
    /// Position within its category (or among uncategorized channels).
    pub position: u16,
    /// Owning category, if any.
    pub parent: Option<ChannelId>,
    /// Permission overwrites scoped to the channel.
    pub overwrites: Vec<OverwriteSpec>,
    /// Text- or voice-specific attributes.
    pub kind: ChannelKind,
}

impl ChannelSpec {
    /// Whether this is a text channel.
    pub fn is_text(&self) -> bool {
        matches!(self.kind, ChannelKind::Text { .. })
    }

    /// Whether this is a voice channel.
    pub fn is_voice(&self) -> bool {
        matches!(self.kind, ChannelKind::Voice { .. })
    }
}
