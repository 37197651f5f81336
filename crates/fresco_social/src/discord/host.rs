//! The reconciliation engine's host trait implemented over Serenity.

use super::conversions;
use async_trait::async_trait;
use fresco_core::{CategorySpec, ChannelKind, ChannelSpec, GuildSnapshot, OverwriteSpec, RoleSpec};
use fresco_error::HostError;
use fresco_sync::GuildHost;
use serenity::builder::{CreateChannel, EditRole};
use serenity::http::{Http, HttpError};
use serenity::model::channel::ChannelType;
use serenity::model::colour::Colour;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};
use serenity::model::permissions::Permissions;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// `GuildHost` implementation backed by Serenity's HTTP client.
///
/// Holds the bot's own user id so snapshots can report the acting
/// principal's authority ceiling in the target guild.
pub struct SerenityHost {
    http: Arc<Http>,
    bot_user: UserId,
}

impl SerenityHost {
    /// Create a host around an existing HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the current user cannot be fetched (an invalid
    /// or expired token, typically).
    #[instrument(skip(http))]
    pub async fn new(http: Arc<Http>) -> Result<Self, HostError> {
        let bot_user = http
            .get_current_user()
            .await
            .map_err(|e| HostError::new(format!("fetch current user: {e}")))?
            .id;
        info!(%bot_user, "Discord host ready");
        Ok(Self { http, bot_user })
    }

    fn role_builder(spec: &RoleSpec) -> EditRole<'static> {
        EditRole::new()
            .name(spec.name.clone())
            .permissions(Permissions::from_bits_truncate(spec.permissions.bits()))
            .colour(Colour::new(spec.color))
            .hoist(spec.hoist)
            .mentionable(spec.mentionable)
    }
}

#[async_trait]
impl GuildHost for SerenityHost {
    async fn snapshot(&self, guild: fresco_core::GuildId) -> Result<GuildSnapshot, HostError> {
        let guild_id = GuildId::new(guild.get());
        let partial = guild_id
            .to_partial_guild(&self.http)
            .await
            .map_err(|e| HostError::new(format!("fetch guild {guild}: {e}")))?;
        let channel_map = guild_id
            .channels(&self.http)
            .await
            .map_err(|e| HostError::new(format!("fetch channels of {guild}: {e}")))?;
        let me = guild_id
            .member(&self.http, self.bot_user)
            .await
            .map_err(|e| HostError::new(format!("fetch own member in {guild}: {e}")))?;

        let acting_ceiling = me
            .roles
            .iter()
            .filter_map(|id| partial.roles.get(id))
            .map(|r| r.position)
            .max()
            .unwrap_or(0);

        let mut roles: Vec<RoleSpec> = partial.roles.values().map(conversions::role_spec).collect();
        roles.sort_by_key(|r| r.position);

        let mut categories: Vec<CategorySpec> = Vec::new();
        let mut channels: Vec<ChannelSpec> = Vec::new();
        for channel in channel_map.values() {
            if channel.kind == ChannelType::Category {
                categories.push(conversions::category_spec(channel));
            } else if let Some(spec) = conversions::channel_spec(channel) {
                channels.push(spec);
            } else {
                debug!(name = %channel.name, kind = ?channel.kind, "Skipping unsupported channel kind");
            }
        }
        categories.sort_by_key(|c| c.position);
        channels.sort_by_key(|c| c.position);

        Ok(GuildSnapshot {
            id: guild,
            name: partial.name.to_string(),
            // The default role shares the guild's identifier.
            everyone: fresco_core::RoleId(guild.get()),
            roles,
            categories,
            channels,
            bitrate_ceiling: conversions::bitrate_ceiling(partial.premium_tier),
            acting_ceiling,
        })
    }

    async fn has_member(
        &self,
        guild: fresco_core::GuildId,
        member: fresco_core::MemberId,
    ) -> Result<bool, HostError> {
        let guild_id = GuildId::new(guild.get());
        match guild_id.member(&self.http, UserId::new(member.get())).await {
            Ok(_) => Ok(true),
            Err(serenity::Error::Http(HttpError::UnsuccessfulRequest(resp)))
                if resp.status_code == 404 =>
            {
                Ok(false)
            }
            Err(e) => Err(HostError::new(format!(
                "look up member {member} in {guild}: {e}"
            ))),
        }
    }

    async fn delete_channel(
        &self,
        _guild: fresco_core::GuildId,
        channel: fresco_core::ChannelId,
    ) -> Result<(), HostError> {
        ChannelId::new(channel.get())
            .delete(&self.http)
            .await
            .map(|_| ())
            .map_err(|e| HostError::new(format!("delete channel {channel}: {e}")))
    }

    async fn delete_role(
        &self,
        guild: fresco_core::GuildId,
        role: fresco_core::RoleId,
    ) -> Result<(), HostError> {
        GuildId::new(guild.get())
            .delete_role(&self.http, RoleId::new(role.get()))
            .await
            .map_err(|e| HostError::new(format!("delete role {role}: {e}")))
    }

    async fn create_role(
        &self,
        guild: fresco_core::GuildId,
        spec: &RoleSpec,
    ) -> Result<fresco_core::RoleId, HostError> {
        GuildId::new(guild.get())
            .create_role(&self.http, Self::role_builder(spec))
            .await
            .map(|role| fresco_core::RoleId(role.id.get()))
            .map_err(|e| HostError::new(format!("create role {}: {e}", spec.name)))
    }

    async fn edit_role(
        &self,
        guild: fresco_core::GuildId,
        role: fresco_core::RoleId,
        spec: &RoleSpec,
    ) -> Result<(), HostError> {
        GuildId::new(guild.get())
            .edit_role(&self.http, RoleId::new(role.get()), Self::role_builder(spec))
            .await
            .map(|_| ())
            .map_err(|e| HostError::new(format!("edit role {}: {e}", spec.name)))
    }

    async fn create_category(
        &self,
        guild: fresco_core::GuildId,
        category: &CategorySpec,
        overwrites: Vec<OverwriteSpec>,
    ) -> Result<fresco_core::ChannelId, HostError> {
        let builder = CreateChannel::new(category.name.clone())
            .kind(ChannelType::Category)
            .position(category.position)
            .permissions(overwrites.iter().map(conversions::overwrite_model));
        GuildId::new(guild.get())
            .create_channel(&self.http, builder)
            .await
            .map(|created| fresco_core::ChannelId(created.id.get()))
            .map_err(|e| HostError::new(format!("create category {}: {e}", category.name)))
    }

    async fn create_channel(
        &self,
        guild: fresco_core::GuildId,
        channel: &ChannelSpec,
        parent: Option<fresco_core::ChannelId>,
        overwrites: Vec<OverwriteSpec>,
    ) -> Result<fresco_core::ChannelId, HostError> {
        let mut builder = CreateChannel::new(channel.name.clone())
            .position(channel.position)
            .permissions(overwrites.iter().map(conversions::overwrite_model));
        builder = match &channel.kind {
            ChannelKind::Text {
                topic,
                slowmode_secs,
                nsfw,
            } => {
                let mut b = builder
                    .kind(ChannelType::Text)
                    .rate_limit_per_user(*slowmode_secs)
                    .nsfw(*nsfw);
                if let Some(topic) = topic {
                    b = b.topic(topic.clone());
                }
                b
            }
            ChannelKind::Voice {
                bitrate,
                user_limit,
            } => {
                let mut b = builder.kind(ChannelType::Voice).bitrate(*bitrate);
                if let Some(limit) = user_limit {
                    b = b.user_limit(*limit);
                }
                b
            }
        };
        if let Some(parent) = parent {
            builder = builder.category(ChannelId::new(parent.get()));
        }
        GuildId::new(guild.get())
            .create_channel(&self.http, builder)
            .await
            .map(|created| fresco_core::ChannelId(created.id.get()))
            .map_err(|e| HostError::new(format!("create channel {}: {e}", channel.name)))
    }

    async fn reposition_roles(
        &self,
        guild: fresco_core::GuildId,
        positions: Vec<(fresco_core::RoleId, u16)>,
    ) -> Result<(), HostError> {
        let guild_id = GuildId::new(guild.get());
        // The HTTP client exposes single-role repositioning only; the first
        // failure abandons the rest of the batch.
        for (role, position) in positions {
            guild_id
                .edit_role_position(&self.http, RoleId::new(role.get()), position)
                .await
                .map_err(|e| HostError::new(format!("reposition role {role}: {e}")))?;
        }
        Ok(())
    }
}
