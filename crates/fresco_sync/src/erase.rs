//! Removal of the target guild's existing structure.

use crate::{Action, EntityKind, GuildHost, ItemOutcome, Stage, StageReport};
use fresco_core::GuildSnapshot;
use tracing::{info, instrument, warn};

/// Delete every channel in the target guild, then every category.
///
/// Channels go first so no category is deleted out from under a channel
/// that still references it. Each deletion is best-effort: a failure is
/// recorded and the remaining deletions continue. Items the acting
/// principal lacks authority over surface here as per-item failures.
#[instrument(skip_all, fields(guild = %target.id, channels = target.channels.len(), categories = target.categories.len()))]
pub async fn erase_structure<H>(host: &H, target: &GuildSnapshot) -> StageReport
where
    H: GuildHost + ?Sized,
{
    let mut report = StageReport::new(Stage::Erase);

    for channel in &target.channels {
        let kind = if channel.is_voice() {
            EntityKind::VoiceChannel
        } else {
            EntityKind::TextChannel
        };
        match host.delete_channel(target.id, channel.id).await {
            Ok(()) => {
                info!(name = %channel.name, "Deleted channel");
                report.push(ItemOutcome::succeeded(kind, Action::Delete, &channel.name));
            }
            Err(e) => {
                warn!(name = %channel.name, error = %e, "Failed to delete channel");
                report.push(ItemOutcome::failed(kind, Action::Delete, &channel.name, e));
            }
        }
    }

    for category in &target.categories {
        match host.delete_channel(target.id, category.id).await {
            Ok(()) => {
                info!(name = %category.name, "Deleted category");
                report.push(ItemOutcome::succeeded(
                    EntityKind::Category,
                    Action::Delete,
                    &category.name,
                ));
            }
            Err(e) => {
                warn!(name = %category.name, error = %e, "Failed to delete category");
                report.push(ItemOutcome::failed(
                    EntityKind::Category,
                    Action::Delete,
                    &category.name,
                    e,
                ));
            }
        }
    }

    info!(
        deleted = report.succeeded(),
        failed = report.failed(),
        "Erase stage finished"
    );
    report
}
