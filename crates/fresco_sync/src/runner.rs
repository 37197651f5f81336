//! Orchestration of one complete sync run.

use crate::{
    erase_structure, reconcile_channels, reconcile_positions, reconcile_roles, GuildHost,
    ProgressSink, SyncReport,
};
use fresco_core::{GuildId, IdentityMap};
use fresco_error::HostError;
use std::future::Future;
use tracing::{error, info, instrument};

/// The operator's answer to the confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Verdict {
    /// The operator confirmed the run.
    #[display("approved")]
    Approved,
    /// The operator declined.
    #[display("declined")]
    Declined,
    /// The confirmation prompt expired.
    #[display("timed out")]
    TimedOut,
}

/// How a guarded run ended.
#[derive(Debug)]
pub enum SyncOutcome {
    /// The run was aborted before any mutation was issued.
    Aborted(Verdict),
    /// All stages ran; the report carries the per-item outcomes.
    Completed(SyncReport),
}

/// Run a full structure sync, gated on a confirmation verdict.
///
/// Nothing is read from or written to the host until `confirm` resolves to
/// [`Verdict::Approved`]; a decline or timeout aborts with zero host calls.
/// After approval both guilds are snapshot — an unknown identifier aborts
/// here, still before any mutation — and the stages run in order: erase,
/// roles, channels, positions (against a refreshed target snapshot, since
/// the earlier stages change what the target contains). A progress line is
/// emitted at every stage boundary.
///
/// Per-item and per-stage failures are recorded in the returned report and
/// never abort the run. An error escaping this function itself (a failed
/// snapshot, for instance) leaves the target in whatever partial state the
/// completed calls produced; there is no rollback.
#[instrument(skip(confirm, host, progress), fields(source = %source, target = %target))]
pub async fn run_guarded<C, H, P>(
    confirm: C,
    host: &H,
    source: GuildId,
    target: GuildId,
    progress: &P,
) -> Result<SyncOutcome, HostError>
where
    C: Future<Output = Verdict>,
    H: GuildHost + ?Sized,
    P: ProgressSink + ?Sized,
{
    let verdict = confirm.await;
    if verdict != Verdict::Approved {
        info!(%verdict, "Sync aborted before any mutation");
        return Ok(SyncOutcome::Aborted(verdict));
    }

    let source_snapshot = host.snapshot(source).await.inspect_err(|e| {
        error!(guild = %source, error = %e, "Failed to read source guild");
    })?;
    let target_snapshot = host.snapshot(target).await.inspect_err(|e| {
        error!(guild = %target, error = %e, "Failed to read target guild");
    })?;

    info!(
        source_name = %source_snapshot.name,
        target_name = %target_snapshot.name,
        "Starting structure sync"
    );

    let mut map = IdentityMap::new();
    let mut report = SyncReport::default();

    progress
        .emit("Deleting existing channels and categories...")
        .await;
    report.push(erase_structure(host, &target_snapshot).await);

    progress.emit("Copying roles...").await;
    report.push(reconcile_roles(host, &source_snapshot, &target_snapshot, &mut map).await);

    progress.emit("Copying categories and channels...").await;
    report.push(reconcile_channels(host, &source_snapshot, &target_snapshot, &mut map).await);

    progress.emit("Adjusting role positions...").await;
    let refreshed = host.snapshot(target).await.inspect_err(|e| {
        error!(guild = %target, error = %e, "Failed to re-read target guild");
    })?;
    report.push(reconcile_positions(host, &source_snapshot, &refreshed, &map).await);

    progress
        .emit(&format!("Structure sync finished: {}", report.summary()))
        .await;
    info!(failed = report.failed(), "Structure sync finished");

    Ok(SyncOutcome::Completed(report))
}
