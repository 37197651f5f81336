//! Translation of permission overwrites into the target guild.

use crate::GuildHost;
use fresco_core::{GuildSnapshot, IdentityMap, OverwriteSpec, Principal};
use tracing::{debug, warn};

/// Retarget a source overwrite set at the target guild's principals.
///
/// Role principals resolve through the identity map, with the source
/// "everyone" retargeted at the target "everyone". Member identifiers are
/// stable platform-wide, so member principals are kept as-is when the
/// member also belongs to the target guild. Entries that do not resolve
/// are dropped; the returned set is scoped to resolved principals only.
pub async fn translate_overwrites<H>(
    host: &H,
    overwrites: &[OverwriteSpec],
    source: &GuildSnapshot,
    target: &GuildSnapshot,
    map: &IdentityMap,
) -> Vec<OverwriteSpec>
where
    H: GuildHost + ?Sized,
{
    let mut translated = Vec::with_capacity(overwrites.len());

    for entry in overwrites {
        match entry.principal {
            Principal::Role(role) if role == source.everyone => {
                translated.push(OverwriteSpec::new(
                    Principal::Role(target.everyone),
                    entry.permissions,
                ));
            }
            Principal::Role(role) => match map.role(role) {
                Some(mapped) => {
                    translated.push(OverwriteSpec::new(Principal::Role(mapped), entry.permissions));
                }
                None => {
                    debug!(%role, "Dropping overwrite for unmapped role");
                }
            },
            Principal::Member(member) => match host.has_member(target.id, member).await {
                Ok(true) => {
                    translated.push(OverwriteSpec::new(
                        Principal::Member(member),
                        entry.permissions,
                    ));
                }
                Ok(false) => {
                    debug!(%member, "Dropping overwrite for member absent from target");
                }
                Err(e) => {
                    warn!(%member, error = %e, "Dropping overwrite after member lookup failure");
                }
            },
        }
    }

    translated
}
