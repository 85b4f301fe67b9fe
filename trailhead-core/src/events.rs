//! Session events broadcast to presentation layers.
//!
//! Every catalogue or session mutation is followed by one of these events so
//! view surfaces (progress ring, playlist, resource panel) can re-project.
//! Delivery uses a broadcast channel; send errors mean no subscribers, which
//! is fine.

use crate::catalog::{ItemId, LessonId};

/// Notifications emitted by the playback session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A session was created for the given item.
    Opened { item: ItemId },
    /// The active session moved to a different item in place.
    Switched { item: ItemId },
    /// A lesson was marked complete and the change was persisted.
    LessonCompleted { id: LessonId },
    /// Every lesson of the module is now complete.
    ModuleCompleted { module_id: u32 },
    /// A sampled playback position was persisted.
    PositionSaved { id: LessonId, seconds: f64 },
    /// The session was torn down and its adapter released.
    Closed,
}
