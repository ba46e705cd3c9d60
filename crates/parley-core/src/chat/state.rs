//! The state a chat session controller owns.

use parley_types::message::ChatLog;
use parley_types::session::SessionPhase;

/// Draft input, chat log and phase of one session.
///
/// `phase` is `Pending` only between the start of a submission and the
/// resolution of its request; at most one request is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub draft: String,
    pub log: ChatLog,
    pub phase: SessionPhase,
}

impl SessionState {
    /// A fresh session starting from `log`.
    pub fn with_log(log: ChatLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.phase == SessionPhase::Pending
    }

    /// Whether the draft would be submitted (non-empty after trimming).
    pub fn has_submittable_draft(&self) -> bool {
        !self.draft.trim().is_empty()
    }
}
