//! Playback session state machine.
//!
//! All state lives in [`PlaybackEngine`], which is owned by the session
//! actor and mutated from a single task: no locks around the catalogue, and
//! each mutation's persistence write-through completes before the next
//! command is accepted.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::time::{Instant, Interval, interval_at};

use crate::catalog::{Catalog, ItemId, LessonId};
use crate::config::TrailheadConfig;
use crate::events::SessionEvent;
use crate::progress::{self, ProgressStore};

use super::adapter::{AdapterEvent, AdapterEvents, AdapterFactory, VideoAdapter};
use super::commands::{AdvanceOutcome, SessionCommand, SessionStatus};
use super::PlaybackError;

/// Lifecycle phase of the playback session.
///
/// `Closed → Opening → Playing ⇄ Paused → Completed → Closed`, with
/// `Opening → Closed` on immediate failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Closed,
    Opening,
    Playing,
    Paused,
    Completed,
}

/// The ephemeral binding between an open item and its video adapter.
///
/// At most one exists at a time; every exit path releases the adapter
/// through [`PlaybackEngine::close`].
struct ActiveSession {
    item: ItemId,
    adapter: Box<dyn VideoAdapter>,
    /// Event stream from the adapter; detached once the sender goes away.
    events: Option<AdapterEvents>,
    /// Position sampling timer, present only while playing a lesson.
    sampler: Option<Interval>,
    phase: SessionPhase,
    /// Saved position to seek to once the adapter reports ready.
    resume_at: Option<f64>,
}

/// Something the engine needs to react to besides an external command.
pub(super) enum EngineWake {
    Adapter(AdapterEvent),
    SampleTick,
}

/// Session state machine: catalogue, persistence, and the active adapter.
pub(super) struct PlaybackEngine {
    catalog: Catalog,
    store: Box<dyn ProgressStore>,
    factory: Arc<dyn AdapterFactory>,
    config: TrailheadConfig,
    events: broadcast::Sender<SessionEvent>,
    /// Sender for internally generated commands (readiness continuations).
    internal_tx: mpsc::UnboundedSender<SessionCommand>,
    active: Option<ActiveSession>,
    /// Item whose open is waiting on adapter readiness.
    pending_open: Option<ItemId>,
    /// Bumped on every open and close; continuations registered under an
    /// older generation are stale and must not act.
    generation: u64,
}

impl PlaybackEngine {
    pub(super) fn new(
        catalog: Catalog,
        store: Box<dyn ProgressStore>,
        factory: Arc<dyn AdapterFactory>,
        config: TrailheadConfig,
        events: broadcast::Sender<SessionEvent>,
        internal_tx: mpsc::UnboundedSender<SessionCommand>,
    ) -> Self {
        Self {
            catalog,
            store,
            factory,
            config,
            events,
            internal_tx,
            active: None,
            pending_open: None,
            generation: 0,
        }
    }

    pub(super) fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub(super) fn status(&self) -> SessionStatus {
        if let Some(active) = &self.active {
            SessionStatus {
                phase: active.phase,
                item: Some(active.item.clone()),
            }
        } else if let Some(item) = &self.pending_open {
            SessionStatus {
                phase: SessionPhase::Opening,
                item: Some(item.clone()),
            }
        } else {
            SessionStatus::closed()
        }
    }

    /// Opens a lesson or recorded webinar, tearing down any current session
    /// first. When the video capability is not yet ready, the open is
    /// deferred: a continuation registered on the readiness notification
    /// re-delivers it, and is discarded if the session moved on meanwhile.
    pub(super) async fn open(&mut self, item: ItemId) -> crate::Result<()> {
        // Validate up front so unknown ids never tear anything down.
        self.catalog.video_for(&item)?;

        self.close_active().await;
        self.generation = self.generation.wrapping_add(1);

        if !self.factory.is_ready() {
            tracing::debug!(%item, "video capability not ready, deferring open");
            self.pending_open = Some(item.clone());
            let factory = Arc::clone(&self.factory);
            let internal_tx = self.internal_tx.clone();
            let generation = self.generation;
            tokio::spawn(async move {
                factory.wait_ready().await;
                let _ = internal_tx.send(SessionCommand::ResumeOpen { item, generation });
            });
            return Ok(());
        }

        self.complete_open(item)
    }

    /// Continuation of a deferred open. No-op when the generation moved on
    /// (the session was closed or reopened while waiting).
    pub(super) fn resume_open(&mut self, item: ItemId, generation: u64) {
        if generation != self.generation {
            tracing::debug!(%item, "discarding stale deferred open");
            return;
        }
        if let Err(e) = self.complete_open(item) {
            tracing::warn!("deferred open failed: {e}");
            self.pending_open = None;
        }
    }

    fn complete_open(&mut self, item: ItemId) -> crate::Result<()> {
        let video = self.catalog.video_for(&item)?;
        let binding = self
            .factory
            .create(&video, self.config.playback.autoplay)?;
        let resume_at = self.saved_position(&item);

        self.pending_open = None;
        self.active = Some(ActiveSession {
            item: item.clone(),
            adapter: binding.adapter,
            events: Some(binding.events),
            sampler: None,
            phase: SessionPhase::Opening,
            resume_at,
        });

        tracing::info!(%item, "playback session opened");
        self.emit(SessionEvent::Opened { item });
        Ok(())
    }

    /// Switches the active session to another item. Idempotent: switching
    /// to the already-active item does no adapter work. Items of the same
    /// video kind are loaded in place; a kind change recreates the adapter.
    pub(super) async fn switch(&mut self, item: ItemId) -> crate::Result<()> {
        let Some(active) = &self.active else {
            return Err(PlaybackError::NoActiveSession.into());
        };
        if active.item == item {
            return Ok(());
        }

        let video = self.catalog.video_for(&item)?;
        let current_kind = self.catalog.video_for(&active.item)?.kind;
        if video.kind != current_kind {
            return self.open(item).await;
        }

        let resume_at = self.saved_position(&item);
        // Checked above; re-borrow mutably for the in-place load.
        let Some(active) = self.active.as_mut() else {
            return Err(PlaybackError::NoActiveSession.into());
        };
        active.sampler = None;
        active.adapter.stop().await;
        active.adapter.load(&video).await?;
        active.item = item.clone();
        active.phase = SessionPhase::Opening;
        active.resume_at = resume_at;

        tracing::debug!(%item, "switched playback in place");
        self.emit(SessionEvent::Switched { item });
        Ok(())
    }

    /// Tears down the session: cancels sampling, stops and releases the
    /// adapter, clears the active reference. Safe to call when no session
    /// is active.
    pub(super) async fn close(&mut self) {
        self.pending_open = None;
        self.generation = self.generation.wrapping_add(1);
        self.close_active().await;
    }

    async fn close_active(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.sampler = None;
            active.adapter.stop().await;
            tracing::info!(item = %active.item, "playback session closed");
            self.emit(SessionEvent::Closed);
        }
    }

    /// Marks the current lesson complete, then moves to the next lesson in
    /// the module, or closes the session and reports module completion when
    /// this was the last one.
    pub(super) async fn advance(&mut self) -> crate::Result<AdvanceOutcome> {
        let current = self.active_lesson()?;
        self.complete_lesson(&current)?;

        let module = self.catalog.module_containing(&current)?;
        let module_id = module.id;
        let next = module.lesson_after(&current).map(|lesson| lesson.id.clone());

        match next {
            Some(next_id) => {
                self.switch(ItemId::Lesson(next_id.clone())).await?;
                Ok(AdvanceOutcome::SwitchedTo(next_id))
            }
            None => {
                self.close().await;
                self.emit(SessionEvent::ModuleCompleted { module_id });
                Ok(AdvanceOutcome::ModuleCompleted { module_id })
            }
        }
    }

    /// Switches to the previous lesson in the module; no-op on the first.
    pub(super) async fn retreat(&mut self) -> crate::Result<()> {
        let current = self.active_lesson()?;
        let module = self.catalog.module_containing(&current)?;
        let previous = module
            .lesson_before(&current)
            .map(|lesson| lesson.id.clone());

        if let Some(previous_id) = previous {
            self.switch(ItemId::Lesson(previous_id)).await?;
        }
        Ok(())
    }

    pub(super) async fn handle_adapter_event(&mut self, event: AdapterEvent) {
        match event {
            AdapterEvent::Ready => {
                if let Some(active) = self.active.as_mut()
                    && let Some(seconds) = active.resume_at.take()
                {
                    tracing::debug!(seconds, "resuming from saved position");
                    active.adapter.seek_to(seconds).await;
                }
            }
            AdapterEvent::Playing => {
                if let Some(active) = self.active.as_mut() {
                    active.phase = SessionPhase::Playing;
                    // Webinars carry no progress state, so nothing samples.
                    if active.sampler.is_none() && active.item.as_lesson().is_some() {
                        let period = self.config.playback.sample_interval;
                        active.sampler = Some(interval_at(Instant::now() + period, period));
                    }
                }
            }
            AdapterEvent::Paused => {
                if let Some(active) = self.active.as_mut() {
                    active.phase = SessionPhase::Paused;
                    active.sampler = None;
                }
            }
            AdapterEvent::Ended => {
                let finished = self.active.as_mut().and_then(|active| {
                    active.sampler = None;
                    active.phase = SessionPhase::Completed;
                    active.item.as_lesson().cloned()
                });
                if let Some(id) = finished
                    && let Err(e) = self.complete_lesson(&id)
                {
                    tracing::warn!("failed to record completion: {e}");
                }
            }
            AdapterEvent::Failed { reason } => {
                tracing::error!(%reason, "video adapter failed, closing session");
                self.close().await;
            }
        }
    }

    /// One position-sampling tick: read the adapter position and write it
    /// through catalogue and persistence.
    pub(super) async fn handle_sample_tick(&mut self) {
        let sampled = match self.active.as_mut() {
            Some(active) if active.phase == SessionPhase::Playing => {
                match active.item.as_lesson().cloned() {
                    Some(id) => Some((id, active.adapter.position().await)),
                    None => None,
                }
            }
            _ => None,
        };

        let Some((id, seconds)) = sampled else { return };
        if let Err(e) = self.catalog.record_position(&id, seconds) {
            tracing::warn!("dropping position sample: {e}");
            return;
        }
        self.persist();
        self.emit(SessionEvent::PositionSaved { id, seconds });
    }

    /// Resolves the next adapter event or sampling tick. Pending forever
    /// while no session is active; the actor is then driven purely by
    /// commands.
    pub(super) async fn next_wake(&mut self) -> EngineWake {
        let Some(active) = self.active.as_mut() else {
            return std::future::pending().await;
        };

        tokio::select! {
            event = Self::next_adapter_event(&mut active.events) => EngineWake::Adapter(event),
            _ = Self::next_tick(&mut active.sampler) => EngineWake::SampleTick,
        }
    }

    async fn next_adapter_event(events: &mut Option<AdapterEvents>) -> AdapterEvent {
        let Some(receiver) = events.as_mut() else {
            return std::future::pending().await;
        };
        match receiver.recv().await {
            Some(event) => event,
            None => {
                // Sender gone: nothing more will ever arrive.
                *events = None;
                std::future::pending().await
            }
        }
    }

    async fn next_tick(sampler: &mut Option<Interval>) {
        let Some(interval) = sampler.as_mut() else {
            return std::future::pending().await;
        };
        interval.tick().await;
    }

    fn active_lesson(&self) -> Result<LessonId, PlaybackError> {
        let Some(active) = &self.active else {
            return Err(PlaybackError::NoActiveSession);
        };
        active
            .item
            .as_lesson()
            .cloned()
            .ok_or(PlaybackError::UnsupportedItem {
                item_kind: "webinar",
            })
    }

    /// Marks a lesson complete and writes through when the flag changed.
    fn complete_lesson(&mut self, id: &LessonId) -> crate::Result<()> {
        if self.catalog.mark_complete(id)? {
            self.persist();
            self.emit(SessionEvent::LessonCompleted { id: id.clone() });
        }
        Ok(())
    }

    fn saved_position(&self, item: &ItemId) -> Option<f64> {
        item.as_lesson()
            .and_then(|id| self.catalog.lesson(id).ok())
            .and_then(|lesson| lesson.watched_seconds)
    }

    /// Write-through of the full progress snapshot. Persistence failures
    /// are logged, never fatal.
    fn persist(&mut self) {
        if let Err(e) = progress::save(
            self.store.as_mut(),
            &self.catalog,
            &self.config.persistence,
        ) {
            tracing::warn!("progress write-through failed: {e}");
        }
    }

    fn emit(&self, event: SessionEvent) {
        // Ignore send errors (no subscribers is OK)
        let _ = self.events.send(event);
    }
}
