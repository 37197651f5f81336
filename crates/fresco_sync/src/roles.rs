//! Role reconciliation between source and target guilds.

use crate::{Action, EntityKind, GuildHost, ItemOutcome, Stage, StageReport};
use fresco_core::{by_ascending_position, GuildSnapshot, IdentityMap, RoleSpec};
use std::collections::{HashMap, HashSet};
use tracing::{info, instrument, warn};

/// Reconcile the target guild's roles against the source and populate the
/// role half of the identity map.
///
/// The two "everyone" roles are mapped to each other up front; neither is
/// ever copied. Target roles with no same-named source counterpart are
/// deleted if they are not managed, not "everyone", and sit strictly below
/// the acting principal's ceiling. Source roles are then processed lowest
/// authority first: a same-named target role is updated in place, anything
/// else is created. Every create, update, and delete is independently
/// fault-tolerant; a failed item simply never enters the map, and the
/// stages that follow skip whatever does not resolve through it.
#[instrument(skip_all, fields(source = %source.id, target = %target.id))]
pub async fn reconcile_roles<H>(
    host: &H,
    source: &GuildSnapshot,
    target: &GuildSnapshot,
    map: &mut IdentityMap,
) -> StageReport
where
    H: GuildHost + ?Sized,
{
    let mut report = StageReport::new(Stage::Roles);

    // The default roles correspond by role, not by copy.
    map.bind_role(source.everyone, target.everyone);

    let source_names: HashSet<&str> = source.roles.iter().map(|r| r.name.as_str()).collect();

    for role in &target.roles {
        if source_names.contains(role.name.as_str())
            || role.managed
            || role.id == target.everyone
            || role.position >= target.acting_ceiling
        {
            continue;
        }
        match host.delete_role(target.id, role.id).await {
            Ok(()) => {
                info!(name = %role.name, "Deleted role");
                report.push(ItemOutcome::succeeded(
                    EntityKind::Role,
                    Action::Delete,
                    &role.name,
                ));
            }
            Err(e) => {
                warn!(name = %role.name, error = %e, "Failed to delete role");
                report.push(ItemOutcome::failed(
                    EntityKind::Role,
                    Action::Delete,
                    &role.name,
                    e,
                ));
            }
        }
    }

    // Matching candidates in the target, excluding roles the reconciler
    // must never touch.
    let existing: HashMap<&str, &RoleSpec> = target
        .roles
        .iter()
        .filter(|r| !r.managed && r.id != target.everyone)
        .map(|r| (r.name.as_str(), r))
        .collect();

    let mut ordered: Vec<&RoleSpec> = source
        .roles
        .iter()
        .filter(|r| r.id != source.everyone && !r.managed)
        .collect();
    ordered.sort_by(|a, b| by_ascending_position(a, b));

    for role in ordered {
        match existing.get(role.name.as_str()) {
            Some(current) if current.position >= target.acting_ceiling => {
                warn!(name = %role.name, "Skipping role update above the authority ceiling");
                report.push(ItemOutcome::skipped(
                    EntityKind::Role,
                    Action::Update,
                    &role.name,
                    "at or above the authority ceiling",
                ));
            }
            Some(current) => match host.edit_role(target.id, current.id, role).await {
                Ok(()) => {
                    info!(name = %role.name, "Updated role");
                    map.bind_role(role.id, current.id);
                    report.push(ItemOutcome::succeeded(
                        EntityKind::Role,
                        Action::Update,
                        &role.name,
                    ));
                }
                Err(e) => {
                    warn!(name = %role.name, error = %e, "Failed to update role");
                    report.push(ItemOutcome::failed(
                        EntityKind::Role,
                        Action::Update,
                        &role.name,
                        e,
                    ));
                }
            },
            None => match host.create_role(target.id, role).await {
                Ok(new_id) => {
                    info!(name = %role.name, id = %new_id, "Created role");
                    map.bind_role(role.id, new_id);
                    report.push(ItemOutcome::succeeded(
                        EntityKind::Role,
                        Action::Create,
                        &role.name,
                    ));
                }
                Err(e) => {
                    warn!(name = %role.name, error = %e, "Failed to create role");
                    report.push(ItemOutcome::failed(
                        EntityKind::Role,
                        Action::Create,
                        &role.name,
                        e,
                    ));
                }
            },
        }
    }

    info!(
        mapped = map.role_count(),
        failed = report.failed(),
        "Role stage finished"
    );
    report
}
