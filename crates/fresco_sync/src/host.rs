//! Abstraction over the remote platform API.

use async_trait::async_trait;
use fresco_core::{
    CategorySpec, ChannelId, ChannelSpec, GuildId, GuildSnapshot, MemberId, OverwriteSpec, RoleId,
    RoleSpec,
};
use fresco_error::HostError;

/// The remote operations the reconciliation engine needs from the platform.
///
/// One method per remote call. Implementations must not retry internally;
/// the engine decides per call whether a failure is tolerated or terminal.
/// The production implementation lives in `fresco_social`; tests use an
/// in-memory double that records calls and mutates a fake guild.
#[async_trait]
pub trait GuildHost: Send + Sync {
    /// Read a guild's full structure.
    ///
    /// An unknown guild identifier is an error; the runner treats a snapshot
    /// failure as a pre-flight abort when it happens before any mutation.
    async fn snapshot(&self, guild: GuildId) -> Result<GuildSnapshot, HostError>;

    /// Whether the given member belongs to the guild.
    async fn has_member(&self, guild: GuildId, member: MemberId) -> Result<bool, HostError>;

    /// Delete a channel or category.
    async fn delete_channel(&self, guild: GuildId, channel: ChannelId) -> Result<(), HostError>;

    /// Delete a role.
    async fn delete_role(&self, guild: GuildId, role: RoleId) -> Result<(), HostError>;

    /// Create a role with the spec's name, permissions, color, and display
    /// flags. The platform chooses the initial hierarchy position.
    async fn create_role(&self, guild: GuildId, role: &RoleSpec) -> Result<RoleId, HostError>;

    /// Update an existing role's permissions, color, and display flags in
    /// place. Name and position are left alone.
    async fn edit_role(
        &self,
        guild: GuildId,
        role: RoleId,
        spec: &RoleSpec,
    ) -> Result<(), HostError>;

    /// Create a category with already-translated overwrites.
    async fn create_category(
        &self,
        guild: GuildId,
        category: &CategorySpec,
        overwrites: Vec<OverwriteSpec>,
    ) -> Result<ChannelId, HostError>;

    /// Create a text or voice channel with already-translated overwrites
    /// and an already-resolved parent category.
    async fn create_channel(
        &self,
        guild: GuildId,
        channel: &ChannelSpec,
        parent: Option<ChannelId>,
        overwrites: Vec<OverwriteSpec>,
    ) -> Result<ChannelId, HostError>;

    /// Apply a set of role positions as a single request.
    async fn reposition_roles(
        &self,
        guild: GuildId,
        positions: Vec<(RoleId, u16)>,
    ) -> Result<(), HostError>;
}
