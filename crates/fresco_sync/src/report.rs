//! Per-item and per-stage outcome reporting.
//!
//! Fault isolation is modeled as values rather than log lines: every
//! attempted remote operation produces an [`ItemOutcome`], stages collect
//! them into [`StageReport`]s, and a run yields one [`SyncReport`].

/// The kind of entity an outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EntityKind {
    /// A role.
    #[display("role")]
    Role,
    /// A category.
    #[display("category")]
    Category,
    /// A text channel.
    #[display("text channel")]
    TextChannel,
    /// A voice channel.
    #[display("voice channel")]
    VoiceChannel,
}

/// What the engine attempted to do with an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Action {
    /// Entity was created in the target guild.
    #[display("create")]
    Create,
    /// Entity was updated in place.
    #[display("update")]
    Update,
    /// Entity was deleted from the target guild.
    #[display("delete")]
    Delete,
    /// Entity was repositioned in the hierarchy.
    #[display("reposition")]
    Reposition,
}

/// How an attempted operation ended.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Disposition {
    /// The remote call succeeded.
    #[display("succeeded")]
    Succeeded,
    /// The remote call failed; the run continued without the item.
    #[display("failed: {_0}")]
    Failed(String),
    /// The item was filtered out before any remote call was made.
    #[display("skipped: {_0}")]
    Skipped(String),
}

/// Outcome of one attempted operation on one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// Entity kind.
    pub kind: EntityKind,
    /// Entity name, as known at the time of the attempt.
    pub name: String,
    /// What was attempted.
    pub action: Action,
    /// How it ended.
    pub disposition: Disposition,
}

impl ItemOutcome {
    /// A successful operation.
    pub fn succeeded(kind: EntityKind, action: Action, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            action,
            disposition: Disposition::Succeeded,
        }
    }

    /// A failed operation, with the underlying cause.
    pub fn failed(
        kind: EntityKind,
        action: Action,
        name: impl Into<String>,
        cause: impl ToString,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            action,
            disposition: Disposition::Failed(cause.to_string()),
        }
    }

    /// An operation filtered out before any remote call.
    pub fn skipped(
        kind: EntityKind,
        action: Action,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            action,
            disposition: Disposition::Skipped(reason.into()),
        }
    }

    /// Whether the underlying remote call failed.
    pub fn is_failure(&self) -> bool {
        matches!(self.disposition, Disposition::Failed(_))
    }
}

/// A reconciliation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Stage {
    /// Deleting the target's existing channels and categories.
    #[display("erase")]
    Erase,
    /// Deleting, creating, and updating roles.
    #[display("roles")]
    Roles,
    /// Recreating categories and channels.
    #[display("channels")]
    Channels,
    /// Mirroring role ordering.
    #[display("positions")]
    Positions,
}

/// All outcomes produced by one stage.
#[derive(Debug, Clone)]
pub struct StageReport {
    /// Which stage produced these outcomes.
    pub stage: Stage,
    /// Outcomes in the order the operations were attempted.
    pub items: Vec<ItemOutcome>,
}

impl StageReport {
    /// An empty report for the given stage.
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            items: Vec::new(),
        }
    }

    /// Record an outcome.
    pub fn push(&mut self, outcome: ItemOutcome) {
        self.items.push(outcome);
    }

    /// Number of successful operations.
    pub fn succeeded(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.disposition == Disposition::Succeeded)
            .count()
    }

    /// Number of failed operations.
    pub fn failed(&self) -> usize {
        self.items.iter().filter(|i| i.is_failure()).count()
    }

    /// The failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.items.iter().filter(|i| i.is_failure())
    }
}

/// The complete record of one sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Stage reports in execution order.
    pub stages: Vec<StageReport>,
}

impl SyncReport {
    /// Record a completed stage.
    pub fn push(&mut self, stage: StageReport) {
        self.stages.push(stage);
    }

    /// Look up a stage's report.
    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    /// Total failed operations across all stages.
    pub fn failed(&self) -> usize {
        self.stages.iter().map(StageReport::failed).sum()
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        let succeeded: usize = self.stages.iter().map(StageReport::succeeded).sum();
        let failed = self.failed();
        if failed == 0 {
            format!("{succeeded} operations applied")
        } else {
            format!("{succeeded} operations applied, {failed} failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_counts() {
        let mut report = StageReport::new(Stage::Roles);
        report.push(ItemOutcome::succeeded(
            EntityKind::Role,
            Action::Create,
            "mod",
        ));
        report.push(ItemOutcome::failed(
            EntityKind::Role,
            Action::Delete,
            "old",
            "Missing Permissions",
        ));
        report.push(ItemOutcome::skipped(
            EntityKind::Role,
            Action::Update,
            "bot",
            "managed role",
        ));
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn summary_mentions_failures() {
        let mut sync = SyncReport::default();
        let mut stage = StageReport::new(Stage::Erase);
        stage.push(ItemOutcome::failed(
            EntityKind::Category,
            Action::Delete,
            "general",
            "boom",
        ));
        sync.push(stage);
        assert!(sync.summary().contains("1 failed"));
    }
}
