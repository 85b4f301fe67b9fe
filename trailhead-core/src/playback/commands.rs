//! Command types processed by the playback session actor.

use tokio::sync::oneshot;

use crate::catalog::{Catalog, ItemId};

use super::session::SessionPhase;

/// Outcome of an [`advance`](super::SessionHandle::advance) request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The session switched to the next lesson in the module.
    SwitchedTo(crate::catalog::LessonId),
    /// The current lesson was the last one: the session closed and a
    /// module-complete event was emitted.
    ModuleCompleted { module_id: u32 },
}

/// Current externally visible session state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub phase: SessionPhase,
    /// The active item, when a session exists or an open is pending.
    pub item: Option<ItemId>,
}

impl SessionStatus {
    pub fn closed() -> Self {
        Self {
            phase: SessionPhase::Closed,
            item: None,
        }
    }
}

/// Commands sent to the session actor.
///
/// Public operations carry a oneshot responder; internal commands
/// (readiness continuations) carry the generation they were registered
/// under so stale ones can be discarded.
pub enum SessionCommand {
    Open {
        item: ItemId,
        responder: oneshot::Sender<crate::Result<()>>,
    },
    /// Internal: a deferred open whose readiness notification fired.
    ResumeOpen { item: ItemId, generation: u64 },
    Switch {
        item: ItemId,
        responder: oneshot::Sender<crate::Result<()>>,
    },
    Close {
        responder: oneshot::Sender<()>,
    },
    Advance {
        responder: oneshot::Sender<crate::Result<AdvanceOutcome>>,
    },
    Retreat {
        responder: oneshot::Sender<crate::Result<()>>,
    },
    Status {
        responder: oneshot::Sender<SessionStatus>,
    },
    /// Snapshot of the catalogue for view projection.
    CatalogState {
        responder: oneshot::Sender<Catalog>,
    },
    Shutdown {
        responder: oneshot::Sender<()>,
    },
}
