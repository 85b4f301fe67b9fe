//! Abstraction over the embedded video player.
//!
//! The real player (an external embedding client) is an opaque capability:
//! it loads content, reports a playback position, seeks, stops, and pushes
//! state-change notifications. This module defines that boundary so the
//! session logic never touches a concrete player.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::catalog::VideoRef;

/// Errors from the playback session and its adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    /// The video capability has not finished initializing.
    ///
    /// Transient: opens issued in this state are deferred until the
    /// capability signals readiness.
    #[error("video capability is not ready")]
    AdapterUnavailable,

    /// The adapter failed internally. The session is closed in response.
    #[error("video adapter failed: {reason}")]
    AdapterFailed { reason: String },

    /// An operation requiring an active session found none.
    #[error("no active playback session")]
    NoActiveSession,

    /// The requested operation does not apply to the active item kind
    /// (e.g. advancing through a webinar, which has no playlist).
    #[error("operation not supported for {item_kind}")]
    UnsupportedItem { item_kind: &'static str },

    /// The session actor is no longer running.
    #[error("playback session shut down")]
    SessionShutdown,
}

/// State-change notifications pushed by a video adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterEvent {
    /// The player finished initializing and content can be controlled.
    Ready,
    /// Playback started or resumed.
    Playing,
    /// Playback paused or buffered.
    Paused,
    /// Playback reached the end of the content.
    Ended,
    /// The player failed irrecoverably.
    Failed { reason: String },
}

/// Receiving half of an adapter's event stream.
pub type AdapterEvents = mpsc::UnboundedReceiver<AdapterEvent>;

/// A live instance of the embedded video player, bound to one content item.
///
/// Exclusively owned by the playback session and released (stopped,
/// detached) on every session exit path.
#[async_trait]
pub trait VideoAdapter: Send {
    /// Loads new content in place, without recreating the player.
    ///
    /// # Errors
    /// - `PlaybackError::AdapterFailed` - The player rejected the content
    async fn load(&mut self, video: &VideoRef) -> Result<(), PlaybackError>;

    /// Current playback position in seconds.
    async fn position(&self) -> f64;

    /// Moves playback to the given position in seconds.
    async fn seek_to(&mut self, seconds: f64);

    /// Stops playback. The adapter may not be used afterwards.
    async fn stop(&mut self);
}

/// An adapter together with its event stream, as returned by a factory.
pub struct AdapterBinding {
    pub adapter: Box<dyn VideoAdapter>,
    pub events: AdapterEvents,
}

/// Creates video adapters once the underlying capability is ready.
///
/// Readiness is signaled once, asynchronously (the external player script
/// may still be loading); [`AdapterFactory::wait_ready`] registers against
/// that one-shot notification.
#[async_trait]
pub trait AdapterFactory: Send + Sync {
    /// Whether the capability has finished initializing.
    fn is_ready(&self) -> bool;

    /// Completes once the capability is ready. Completes immediately when
    /// it already is.
    async fn wait_ready(&self);

    /// Creates an adapter bound to the given video reference. With
    /// `autoplay`, playback starts as soon as the player reports ready;
    /// otherwise it waits for an explicit play.
    ///
    /// # Errors
    /// - `PlaybackError::AdapterUnavailable` - Called before readiness
    /// - `PlaybackError::AdapterFailed` - The player could not be created
    fn create(&self, video: &VideoRef, autoplay: bool) -> Result<AdapterBinding, PlaybackError>;
}
