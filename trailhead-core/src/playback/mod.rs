//! Playback session: the ephemeral binding between an open catalogue item
//! and its video adapter.
//!
//! Built as a single actor (see [`actor`]) so that every state transition,
//! adapter call, and persistence write-through happens sequentially.

mod actor;
mod adapter;
mod commands;
mod handle;
mod session;
pub mod simulated;

pub use actor::spawn_session;
pub use adapter::{
    AdapterBinding, AdapterEvent, AdapterEvents, AdapterFactory, PlaybackError, VideoAdapter,
};
pub use commands::{AdvanceOutcome, SessionStatus};
pub use handle::SessionHandle;
pub use session::SessionPhase;
