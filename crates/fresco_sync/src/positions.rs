//! Role hierarchy ordering in the target guild.

use crate::{Action, EntityKind, GuildHost, ItemOutcome, Stage, StageReport};
use fresco_core::{by_descending_position, GuildSnapshot, IdentityMap, RoleSpec};
use tracing::{info, instrument, warn};

/// Mirror the source guild's role ordering onto the target.
///
/// Source roles (managed and "everyone" excluded) are ranked highest
/// authority first and assigned candidate positions counting down from the
/// total count. Each entry is resolved through the identity map against the
/// target's current roles; anything unmapped, mapped to a managed or
/// "everyone" role, or sitting at or above the acting principal's ceiling
/// is dropped. The survivors are submitted as a single batch whose failure
/// is terminal for this stage only.
///
/// `target` must be a fresh snapshot: roles created earlier in the run have
/// positions the pre-run snapshot does not know about.
#[instrument(skip_all, fields(source = %source.id, target = %target.id))]
pub async fn reconcile_positions<H>(
    host: &H,
    source: &GuildSnapshot,
    target: &GuildSnapshot,
    map: &IdentityMap,
) -> StageReport
where
    H: GuildHost + ?Sized,
{
    let mut report = StageReport::new(Stage::Positions);

    let mut ranked: Vec<&RoleSpec> = source
        .roles
        .iter()
        .filter(|r| !r.managed && r.id != source.everyone)
        .collect();
    ranked.sort_by(|a, b| by_descending_position(a, b));

    let total = ranked.len() as u16;
    let mut batch = Vec::new();
    let mut names = Vec::new();

    for (rank, role) in ranked.iter().enumerate() {
        let desired = total - rank as u16;
        let Some(mapped) = map.role(role.id) else {
            report.push(ItemOutcome::skipped(
                EntityKind::Role,
                Action::Reposition,
                &role.name,
                "no target counterpart",
            ));
            continue;
        };
        let Some(current) = target.role(mapped) else {
            report.push(ItemOutcome::skipped(
                EntityKind::Role,
                Action::Reposition,
                &role.name,
                "mapped role no longer present",
            ));
            continue;
        };
        if current.managed || current.id == target.everyone {
            report.push(ItemOutcome::skipped(
                EntityKind::Role,
                Action::Reposition,
                &role.name,
                "not repositionable",
            ));
            continue;
        }
        if current.position >= target.acting_ceiling {
            report.push(ItemOutcome::skipped(
                EntityKind::Role,
                Action::Reposition,
                &role.name,
                "at or above the authority ceiling",
            ));
            continue;
        }
        batch.push((mapped, desired));
        names.push(role.name.clone());
    }

    if batch.is_empty() {
        info!("No roles to reposition");
        return report;
    }

    match host.reposition_roles(target.id, batch).await {
        Ok(()) => {
            info!(count = names.len(), "Updated role positions");
            for name in names {
                report.push(ItemOutcome::succeeded(
                    EntityKind::Role,
                    Action::Reposition,
                    name,
                ));
            }
        }
        Err(e) => {
            warn!(error = %e, "Failed to update role positions");
            report.push(ItemOutcome::failed(
                EntityKind::Role,
                Action::Reposition,
                "role ordering batch",
                e,
            ));
        }
    }

    report
}
