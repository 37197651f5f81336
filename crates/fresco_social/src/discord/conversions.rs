//! Conversions between Serenity models and the engine's domain types.

use fresco_core::{
    CategorySpec, ChannelKind, ChannelSpec, MemberId, OverwriteSpec, PermissionPair,
    PermissionSet, Principal, RoleSpec,
};
use serenity::model::channel::{GuildChannel, PermissionOverwrite, PermissionOverwriteType};
use serenity::model::guild::{PremiumTier, Role};
use serenity::model::id::{RoleId, UserId};
use serenity::model::permissions::Permissions;
use serenity::model::prelude::ChannelType;

/// A guild's voice bit-rate cap in bits per second, by boost tier.
pub(crate) fn bitrate_ceiling(tier: PremiumTier) -> u32 {
    match tier {
        PremiumTier::Tier1 => 128_000,
        PremiumTier::Tier2 => 256_000,
        PremiumTier::Tier3 => 384_000,
        _ => 96_000,
    }
}

pub(crate) fn role_spec(role: &Role) -> RoleSpec {
    RoleSpec {
        id: fresco_core::RoleId(role.id.get()),
        name: role.name.to_string(),
        permissions: PermissionSet(role.permissions.bits()),
        color: role.colour.0,
        hoist: role.hoist,
        mentionable: role.mentionable,
        position: role.position,
        managed: role.managed,
    }
}

pub(crate) fn category_spec(channel: &GuildChannel) -> CategorySpec {
    CategorySpec {
        id: fresco_core::ChannelId(channel.id.get()),
        name: channel.name.to_string(),
        position: channel.position,
        overwrites: overwrite_specs(&channel.permission_overwrites),
    }
}

/// Convert a non-category channel, or `None` for kinds the mirror does not
/// carry (threads, forums, directories). Announcement channels behave as
/// text and stage channels as voice for mirroring purposes.
pub(crate) fn channel_spec(channel: &GuildChannel) -> Option<ChannelSpec> {
    let kind = match channel.kind {
        ChannelType::Text | ChannelType::News => ChannelKind::Text {
            topic: channel.topic.as_ref().map(|t| t.to_string()),
            slowmode_secs: channel.rate_limit_per_user.unwrap_or(0),
            nsfw: channel.nsfw,
        },
        ChannelType::Voice | ChannelType::Stage => ChannelKind::Voice {
            bitrate: channel.bitrate.unwrap_or(64_000),
            user_limit: channel.user_limit,
        },
        _ => return None,
    };
    Some(ChannelSpec {
        id: fresco_core::ChannelId(channel.id.get()),
        name: channel.name.to_string(),
        position: channel.position,
        parent: channel.parent_id.map(|p| fresco_core::ChannelId(p.get())),
        overwrites: overwrite_specs(&channel.permission_overwrites),
        kind,
    })
}

pub(crate) fn overwrite_specs(overwrites: &[PermissionOverwrite]) -> Vec<OverwriteSpec> {
    overwrites.iter().filter_map(overwrite_spec).collect()
}

pub(crate) fn overwrite_spec(overwrite: &PermissionOverwrite) -> Option<OverwriteSpec> {
    let principal = match overwrite.kind {
        PermissionOverwriteType::Role(id) => Principal::Role(fresco_core::RoleId(id.get())),
        PermissionOverwriteType::Member(id) => Principal::Member(MemberId(id.get())),
        _ => return None,
    };
    Some(OverwriteSpec::new(
        principal,
        PermissionPair::new(
            PermissionSet(overwrite.allow.bits()),
            PermissionSet(overwrite.deny.bits()),
        ),
    ))
}

pub(crate) fn overwrite_model(spec: &OverwriteSpec) -> PermissionOverwrite {
    let kind = match spec.principal {
        Principal::Role(id) => PermissionOverwriteType::Role(RoleId::new(id.get())),
        Principal::Member(id) => PermissionOverwriteType::Member(UserId::new(id.get())),
    };
    PermissionOverwrite {
        allow: Permissions::from_bits_truncate(spec.permissions.allow.bits()),
        deny: Permissions::from_bits_truncate(spec.permissions.deny.bits()),
        kind,
    }
}
