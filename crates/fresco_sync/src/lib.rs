//! Guild structure reconciliation engine.
//!
//! This crate implements the procedure that mirrors one guild's
//! organizational structure onto another: erase the target's channels and
//! categories, reconcile roles into an identity map, rebuild categories and
//! channels with translated permission overwrites, then mirror role
//! ordering.
//!
//! The engine is platform-agnostic: every remote operation goes through the
//! [`GuildHost`] trait, so the whole procedure runs unchanged against an
//! in-memory double in tests and against the Discord API in production
//! (see `fresco_social`).
//!
//! # Fault tolerance
//!
//! Remote calls fail routinely (missing permissions, deleted entities,
//! transient API errors). The engine isolates failures at two granularities:
//!
//! - **per item**: a failed create/update/delete is recorded in the stage's
//!   [`StageReport`] and reconciliation continues; the item is simply absent
//!   from the [`IdentityMap`](fresco_core::IdentityMap) and downstream
//!   stages skip anything that does not resolve through it.
//! - **per stage**: the role reposition batch either applies or is recorded
//!   as a stage failure; the run continues to completion reporting either
//!   way.
//!
//! There is no rollback. A run that fails partway leaves the target in a
//! partially reconciled state by design.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod channels;
mod erase;
mod host;
mod overwrites;
mod positions;
mod progress;
mod report;
mod roles;
mod runner;

pub use channels::reconcile_channels;
pub use erase::erase_structure;
pub use host::GuildHost;
pub use overwrites::translate_overwrites;
pub use positions::reconcile_positions;
pub use progress::{LogSink, ProgressSink};
pub use report::{Action, Disposition, EntityKind, ItemOutcome, Stage, StageReport, SyncReport};
pub use roles::reconcile_roles;
pub use runner::{run_guarded, SyncOutcome, Verdict};
