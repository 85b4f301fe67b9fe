//! Handle for communicating with the playback session actor.

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::catalog::{Catalog, ItemId};
use crate::events::SessionEvent;

use super::adapter::PlaybackError;
use super::commands::{AdvanceOutcome, SessionCommand, SessionStatus};

/// Handle for communicating with the playback session actor.
///
/// Provides an ergonomic async API for sending commands to the session.
/// It can be cloned and shared across tasks safely.
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionCommand>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    pub(super) fn new(
        sender: mpsc::Sender<SessionCommand>,
        events: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self { sender, events }
    }

    /// Opens a lesson or recorded webinar, tearing down any current
    /// session first.
    ///
    /// # Errors
    /// - `CatalogError::LessonNotFound` / `WebinarNotFound` - Unknown id
    /// - `PlaybackError::AdapterFailed` - The player could not be created
    /// - `PlaybackError::SessionShutdown` - The actor is gone
    pub async fn open(&self, item: ItemId) -> crate::Result<()> {
        let (responder, rx) = oneshot::channel();
        self.send(SessionCommand::Open { item, responder }).await?;
        rx.await.map_err(|_| PlaybackError::SessionShutdown)?
    }

    /// Switches the active session to another item; idempotent when the
    /// item is already active.
    ///
    /// # Errors
    /// - `PlaybackError::NoActiveSession` - Nothing is open
    /// - `CatalogError::LessonNotFound` / `WebinarNotFound` - Unknown id
    pub async fn switch(&self, item: ItemId) -> crate::Result<()> {
        let (responder, rx) = oneshot::channel();
        self.send(SessionCommand::Switch { item, responder }).await?;
        rx.await.map_err(|_| PlaybackError::SessionShutdown)?
    }

    /// Closes the session. Safe to call when nothing is open.
    ///
    /// # Errors
    /// - `PlaybackError::SessionShutdown` - The actor is gone
    pub async fn close(&self) -> crate::Result<()> {
        let (responder, rx) = oneshot::channel();
        self.send(SessionCommand::Close { responder }).await?;
        Ok(rx.await.map_err(|_| PlaybackError::SessionShutdown)?)
    }

    /// Marks the current lesson complete and moves on: to the next lesson,
    /// or closing with a module-complete signal on the last one.
    ///
    /// # Errors
    /// - `PlaybackError::NoActiveSession` - Nothing is open
    /// - `PlaybackError::UnsupportedItem` - A webinar is active
    pub async fn advance(&self) -> crate::Result<AdvanceOutcome> {
        let (responder, rx) = oneshot::channel();
        self.send(SessionCommand::Advance { responder }).await?;
        rx.await.map_err(|_| PlaybackError::SessionShutdown)?
    }

    /// Switches to the previous lesson in the module; no-op on the first.
    ///
    /// # Errors
    /// - `PlaybackError::NoActiveSession` - Nothing is open
    /// - `PlaybackError::UnsupportedItem` - A webinar is active
    pub async fn retreat(&self) -> crate::Result<()> {
        let (responder, rx) = oneshot::channel();
        self.send(SessionCommand::Retreat { responder }).await?;
        rx.await.map_err(|_| PlaybackError::SessionShutdown)?
    }

    /// Current session phase and active item.
    ///
    /// # Errors
    /// - `PlaybackError::SessionShutdown` - The actor is gone
    pub async fn status(&self) -> crate::Result<SessionStatus> {
        let (responder, rx) = oneshot::channel();
        self.send(SessionCommand::Status { responder }).await?;
        Ok(rx.await.map_err(|_| PlaybackError::SessionShutdown)?)
    }

    /// A snapshot of the catalogue with current progress, for projection
    /// into view state.
    ///
    /// # Errors
    /// - `PlaybackError::SessionShutdown` - The actor is gone
    pub async fn catalog(&self) -> crate::Result<Catalog> {
        let (responder, rx) = oneshot::channel();
        self.send(SessionCommand::CatalogState { responder }).await?;
        Ok(rx.await.map_err(|_| PlaybackError::SessionShutdown)?)
    }

    /// Stops the actor after releasing any active adapter.
    ///
    /// # Errors
    /// - `PlaybackError::SessionShutdown` - The actor was already gone
    pub async fn shutdown(&self) -> crate::Result<()> {
        let (responder, rx) = oneshot::channel();
        self.send(SessionCommand::Shutdown { responder }).await?;
        Ok(rx.await.map_err(|_| PlaybackError::SessionShutdown)?)
    }

    /// Subscribes to session events for presentation re-projection.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Whether the actor is still accepting commands.
    pub fn is_running(&self) -> bool {
        !self.sender.is_closed()
    }

    async fn send(&self, command: SessionCommand) -> Result<(), PlaybackError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| PlaybackError::SessionShutdown)
    }
}
