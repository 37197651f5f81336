//! Category and channel reconstruction in the target guild.

use crate::{translate_overwrites, Action, EntityKind, GuildHost, ItemOutcome, Stage, StageReport};
use fresco_core::{
    by_category_position, by_parent_then_own_position, CategorySpec, ChannelKind, ChannelSpec,
    GuildSnapshot, IdentityMap,
};
use tracing::{info, instrument, warn};

/// Recreate the source guild's categories and channels in the target.
///
/// Three passes, each per-item fault-tolerant: categories in ascending
/// position order (recording each created category in the identity map
/// before any channel can reference it), then text channels, then voice
/// channels, both ordered by owning category position and own position.
/// A channel whose source category never made it into the map is created
/// uncategorized. Voice bit-rates are clamped to the target guild's
/// platform ceiling.
#[instrument(skip_all, fields(source = %source.id, target = %target.id))]
pub async fn reconcile_channels<H>(
    host: &H,
    source: &GuildSnapshot,
    target: &GuildSnapshot,
    map: &mut IdentityMap,
) -> StageReport
where
    H: GuildHost + ?Sized,
{
    let mut report = StageReport::new(Stage::Channels);

    let mut categories: Vec<&CategorySpec> = source.categories.iter().collect();
    categories.sort_by(|a, b| by_category_position(a, b));

    for category in categories {
        let overwrites =
            translate_overwrites(host, &category.overwrites, source, target, map).await;
        match host.create_category(target.id, category, overwrites).await {
            Ok(new_id) => {
                info!(name = %category.name, id = %new_id, "Created category");
                map.bind_category(category.id, new_id);
                report.push(ItemOutcome::succeeded(
                    EntityKind::Category,
                    Action::Create,
                    &category.name,
                ));
            }
            Err(e) => {
                warn!(name = %category.name, error = %e, "Failed to create category");
                report.push(ItemOutcome::failed(
                    EntityKind::Category,
                    Action::Create,
                    &category.name,
                    e,
                ));
            }
        }
    }

    let category_positions = source.category_positions();
    let channel_order = by_parent_then_own_position(&category_positions);

    // Text channels first, then voice, mirroring the source ordering
    // within each pass.
    for voice_pass in [false, true] {
        let mut channels: Vec<&ChannelSpec> = source
            .channels
            .iter()
            .filter(|c| c.is_voice() == voice_pass)
            .collect();
        channels.sort_by(|a, b| channel_order(a, b));

        for channel in channels {
            let kind = if voice_pass {
                EntityKind::VoiceChannel
            } else {
                EntityKind::TextChannel
            };
            let parent = channel.parent.and_then(|p| map.category(p));
            let overwrites =
                translate_overwrites(host, &channel.overwrites, source, target, map).await;
            let adjusted = clamp_bitrate(channel, target.bitrate_ceiling);

            match host
                .create_channel(target.id, &adjusted, parent, overwrites)
                .await
            {
                Ok(new_id) => {
                    info!(name = %channel.name, id = %new_id, "Created channel");
                    report.push(ItemOutcome::succeeded(kind, Action::Create, &channel.name));
                }
                Err(e) => {
                    warn!(name = %channel.name, error = %e, "Failed to create channel");
                    report.push(ItemOutcome::failed(kind, Action::Create, &channel.name, e));
                }
            }
        }
    }

    info!(
        created = report.succeeded(),
        failed = report.failed(),
        "Channel stage finished"
    );
    report
}

/// Cap a voice channel's bit-rate at the target guild's platform limit.
fn clamp_bitrate(channel: &ChannelSpec, ceiling: u32) -> ChannelSpec {
    let mut adjusted = channel.clone();
    if let ChannelKind::Voice { bitrate, .. } = &mut adjusted.kind {
        *bitrate = (*bitrate).min(ceiling);
    }
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresco_core::ChannelId;

    fn voice(bitrate: u32) -> ChannelSpec {
        ChannelSpec {
            id: ChannelId(1),
            name: "lounge".to_string(),
            position: 0,
            parent: None,
            overwrites: Vec::new(),
            kind: ChannelKind::Voice {
                bitrate,
                user_limit: None,
            },
        }
    }

    #[test]
    fn bitrate_above_ceiling_is_clamped() {
        let adjusted = clamp_bitrate(&voice(384_000), 96_000);
        assert!(matches!(
            adjusted.kind,
            ChannelKind::Voice {
                bitrate: 96_000,
                ..
            }
        ));
    }

    #[test]
    fn bitrate_below_ceiling_is_kept() {
        let adjusted = clamp_bitrate(&voice(64_000), 96_000);
        assert!(matches!(
            adjusted.kind,
            ChannelKind::Voice {
                bitrate: 64_000,
                ..
            }
        ));
    }

    #[test]
    fn text_channels_are_untouched() {
        let text = ChannelSpec {
            id: ChannelId(2),
            name: "general".to_string(),
            position: 0,
            parent: None,
            overwrites: Vec::new(),
            kind: ChannelKind::Text {
                topic: Some("hello".to_string()),
                slowmode_secs: 5,
                nsfw: false,
            },
        };
        assert_eq!(clamp_bitrate(&text, 96_000), text);
    }
}
