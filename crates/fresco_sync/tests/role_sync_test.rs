//! Role reconciliation against the in-memory host.

mod support;

use fresco_core::{IdentityMap, PermissionSet, RoleId};
use fresco_sync::{reconcile_roles, Disposition, GuildHost};
use support::{managed_role, role, Call, FakeGuild, MemoryHost};

const SOURCE: u64 = 100;
const TARGET: u64 = 200;

async fn reconcile(host: &MemoryHost) -> (IdentityMap, fresco_sync::StageReport) {
    let source = host.snapshot(fresco_core::GuildId(SOURCE)).await.unwrap();
    let target = host.snapshot(fresco_core::GuildId(TARGET)).await.unwrap();
    let mut map = IdentityMap::new();
    let report = reconcile_roles(host, &source, &target, &mut map).await;
    (map, report)
}

#[tokio::test]
async fn missing_roles_are_created_and_stale_roles_deleted() {
    let host = MemoryHost::new()
        .with_guild(
            SOURCE,
            FakeGuild::new("source", 1)
                .with_role(role(11, "Admin", 3))
                .with_role(role(12, "Mod", 2)),
        )
        .with_guild(TARGET, FakeGuild::new("target", 2).with_role(role(21, "OldRole", 1)));

    let (map, report) = reconcile(&host).await;

    let target = host.guild(TARGET);
    assert!(target.role_named("Admin").is_some());
    assert!(target.role_named("Mod").is_some());
    assert!(target.role_named("OldRole").is_none());
    assert_eq!(map.role(RoleId(11)), target.role_named("Admin").map(|r| r.id));
    assert_eq!(map.role(RoleId(12)), target.role_named("Mod").map(|r| r.id));
    assert_eq!(report.failed(), 0);
}

#[tokio::test]
async fn everyone_is_mapped_by_role_not_copied() {
    let host = MemoryHost::new()
        .with_guild(SOURCE, FakeGuild::new("source", 1))
        .with_guild(TARGET, FakeGuild::new("target", 2));

    let (map, _) = reconcile(&host).await;

    assert_eq!(map.role(RoleId(1)), Some(RoleId(2)));
    // Only the everyone role remains; nothing was created or deleted.
    assert_eq!(host.guild(TARGET).roles.len(), 1);
    assert_eq!(
        host.calls().iter().filter(|c| c.is_mutation()).count(),
        0
    );
}

#[tokio::test]
async fn matching_role_is_updated_in_place() {
    let mut stale = role(21, "Admin", 1);
    stale.color = 0xff0000;
    stale.permissions = PermissionSet(0x1);
    let host = MemoryHost::new()
        .with_guild(SOURCE, FakeGuild::new("source", 1).with_role(role(11, "Admin", 3)))
        .with_guild(TARGET, FakeGuild::new("target", 2).with_role(stale));

    let (map, _) = reconcile(&host).await;

    let target = host.guild(TARGET);
    let admin = target.role_named("Admin").unwrap();
    assert_eq!(admin.id, RoleId(21), "existing role keeps its identifier");
    assert_eq!(admin.color, 0x3498db);
    assert_eq!(admin.permissions, PermissionSet(0x400));
    assert_eq!(map.role(RoleId(11)), Some(RoleId(21)));
    assert!(
        host.calls()
            .contains(&Call::EditRole(fresco_core::GuildId(TARGET), RoleId(21))),
        "expected an in-place edit, not a delete/create cycle"
    );
}

#[tokio::test]
async fn managed_roles_are_never_touched() {
    let host = MemoryHost::new()
        .with_guild(
            SOURCE,
            FakeGuild::new("source", 1).with_role(managed_role(11, "SourceBot", 2)),
        )
        .with_guild(
            TARGET,
            FakeGuild::new("target", 2).with_role(managed_role(21, "TargetBot", 1)),
        );

    let (map, _) = reconcile(&host).await;

    let target = host.guild(TARGET);
    assert!(target.role_named("TargetBot").is_some(), "managed target survives");
    assert!(target.role_named("SourceBot").is_none(), "managed source is not copied");
    assert_eq!(map.role(RoleId(11)), None);
    assert_eq!(
        host.calls().iter().filter(|c| c.is_mutation()).count(),
        0
    );
}

#[tokio::test]
async fn roles_at_or_above_the_ceiling_are_left_alone() {
    let host = MemoryHost::new()
        .with_guild(SOURCE, FakeGuild::new("source", 1))
        .with_guild(
            TARGET,
            FakeGuild::new("target", 2)
                .with_acting_ceiling(5)
                .with_role(role(21, "Untouchable", 7))
                .with_role(role(22, "Removable", 2)),
        );

    reconcile(&host).await;

    let target = host.guild(TARGET);
    assert!(target.role_named("Untouchable").is_some());
    assert!(target.role_named("Removable").is_none());
}

#[tokio::test]
async fn matching_role_above_the_ceiling_is_not_edited() {
    let host = MemoryHost::new()
        .with_guild(SOURCE, FakeGuild::new("source", 1).with_role(role(11, "Admin", 3)))
        .with_guild(
            TARGET,
            FakeGuild::new("target", 2)
                .with_acting_ceiling(5)
                .with_role(role(21, "Admin", 8)),
        );

    let (map, report) = reconcile(&host).await;

    assert_eq!(map.role(RoleId(11)), None);
    assert!(!host
        .calls()
        .contains(&Call::EditRole(fresco_core::GuildId(TARGET), RoleId(21))));
    assert!(report
        .items
        .iter()
        .any(|i| matches!(i.disposition, Disposition::Skipped(_))));
}

#[tokio::test]
async fn failed_create_is_recorded_and_absent_from_map() {
    let host = MemoryHost::new()
        .with_guild(
            SOURCE,
            FakeGuild::new("source", 1)
                .with_role(role(11, "Admin", 3))
                .with_role(role(12, "Mod", 2)),
        )
        .with_guild(TARGET, FakeGuild::new("target", 2));
    host.fail_on("create_role:Admin");

    let (map, report) = reconcile(&host).await;

    assert_eq!(map.role(RoleId(11)), None, "failed role never enters the map");
    assert!(map.role(RoleId(12)).is_some(), "reconciliation continued");
    assert_eq!(report.failed(), 1);
    assert!(host.guild(TARGET).role_named("Mod").is_some());
}

#[tokio::test]
async fn creation_processes_lowest_authority_first() {
    let host = MemoryHost::new()
        .with_guild(
            SOURCE,
            FakeGuild::new("source", 1)
                .with_role(role(11, "Admin", 3))
                .with_role(role(12, "Mod", 2))
                .with_role(role(13, "Member", 1)),
        )
        .with_guild(TARGET, FakeGuild::new("target", 2));

    reconcile(&host).await;

    let created: Vec<String> = host
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::CreateRole(_, name) => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(created, ["Member", "Mod", "Admin"]);
}
