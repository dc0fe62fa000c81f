//! Per-interaction record of the first reply.

use super::kind::ReplyKind;
use crate::sync::CommitOnce;

/// Thread-safe record of whether (and how) an interaction was first replied to.
///
/// One guard is created per inbound interaction and shared by every event
/// derived from it. Once a kind is recorded it never changes and never reverts
/// to empty.
#[derive(Debug, Default)]
pub struct ReplyGuard {
    kind: CommitOnce<ReplyKind>,
}

impl ReplyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `kind` as the first reply. Returns `false` if a reply was
    /// already recorded, leaving the stored kind unchanged.
    pub fn try_record_reply(&self, kind: ReplyKind) -> bool {
        self.kind.try_commit(kind).is_ok()
    }

    /// Snapshot of the recorded reply kind.
    pub fn current_kind(&self) -> Option<ReplyKind> {
        self.kind.get()
    }

    pub fn has_replied(&self) -> bool {
        self.kind.is_committed()
    }

    pub fn is_deferred_reply(&self) -> bool {
        self.current_kind() == Some(ReplyKind::DeferredCreateMessage)
    }

    pub fn is_deferred_update(&self) -> bool {
        self.current_kind() == Some(ReplyKind::DeferredUpdateMessage)
    }
}
