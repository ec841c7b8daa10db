use crate::{
    error::TargetFailure,
    filter::{FilterRecord, FilterTarget},
    key::FilterKey,
    obs::WriteKind,
};

///
/// MutationReport
///
/// Outcome of one logical add/replace/remove across its fan-out targets.
///

#[derive(Clone, Debug, PartialEq)]
pub struct MutationReport {
    pub kind: WriteKind,
    /// Records mirrored after an acknowledged add or replace, in visit order.
    pub applied: Vec<FilterRecord>,
    /// Keys removed after an acknowledged remove, in visit order.
    pub removed: Vec<FilterKey>,
    /// Targets without an applicable clause.
    pub skipped: Vec<FilterTarget>,
    pub failed: Vec<TargetFailure>,
}

impl MutationReport {
    #[must_use]
    pub const fn new(kind: WriteKind) -> Self {
        Self {
            kind,
            applied: Vec::new(),
            removed: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// No target failed. Skipped targets do not count as failures.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Nothing was sent to the transport.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty() && self.removed.is_empty() && self.failed.is_empty()
    }

    #[must_use]
    pub fn failed_targets(&self) -> Vec<&FilterTarget> {
        self.failed.iter().map(|failure| &failure.target).collect()
    }
}

///
/// MutationObserver
///
/// Incremental callbacks for widgets that react per target, e.g. to
/// re-enable a pending row or revert one optimistic highlight.
/// `on_complete` fires exactly once per logical call, after every target.
///

pub trait MutationObserver: Send + Sync {
    fn on_applied(&self, _record: &FilterRecord) {}

    fn on_removed(&self, _target: &FilterTarget, _key: &FilterKey) {}

    fn on_skipped(&self, _target: &FilterTarget) {}

    fn on_failed(&self, _failure: &TargetFailure) {}

    fn on_complete(&self, _report: &MutationReport) {}
}

///
/// NoopObserver
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl MutationObserver for NoopObserver {}
