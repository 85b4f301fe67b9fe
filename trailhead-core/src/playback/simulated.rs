//! Simulated video adapter for development and tests.
//!
//! Mimics the embedded player closely enough to exercise the whole session
//! state machine offline: positions advance with (possibly paused) tokio
//! time, readiness can be delayed, and a controller injects the state
//! changes a real player would push.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use crate::catalog::VideoRef;

use super::adapter::{
    AdapterBinding, AdapterEvent, AdapterFactory, PlaybackError, VideoAdapter,
};

#[derive(Debug)]
struct PlayerState {
    video: VideoRef,
    /// Position accumulated up to the last play/pause/seek transition.
    base_seconds: f64,
    /// Set while playing; position grows with elapsed time since then.
    playing_since: Option<Instant>,
    load_count: usize,
    stopped: bool,
}

impl PlayerState {
    fn position(&self) -> f64 {
        let elapsed = self
            .playing_since
            .map(|since| since.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        self.base_seconds + elapsed
    }

    fn freeze(&mut self) {
        self.base_seconds = self.position();
        self.playing_since = None;
    }
}

fn lock(state: &Arc<Mutex<PlayerState>>) -> MutexGuard<'_, PlayerState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Test-side remote control for a simulated adapter.
///
/// Injects the notifications a real player would emit on its own.
#[derive(Clone)]
pub struct SimulatedAdapterController {
    state: Arc<Mutex<PlayerState>>,
    events: mpsc::UnboundedSender<AdapterEvent>,
}

impl SimulatedAdapterController {
    /// Playback starts or resumes.
    pub fn play(&self) {
        let mut state = lock(&self.state);
        if state.playing_since.is_none() {
            state.playing_since = Some(Instant::now());
        }
        drop(state);
        let _ = self.events.send(AdapterEvent::Playing);
    }

    /// Playback pauses; the position freezes.
    pub fn pause(&self) {
        lock(&self.state).freeze();
        let _ = self.events.send(AdapterEvent::Paused);
    }

    /// Playback reaches the end of the content.
    pub fn finish(&self) {
        lock(&self.state).freeze();
        let _ = self.events.send(AdapterEvent::Ended);
    }

    /// The player fails irrecoverably.
    pub fn fail(&self, reason: impl Into<String>) {
        lock(&self.state).freeze();
        let _ = self.events.send(AdapterEvent::Failed {
            reason: reason.into(),
        });
    }

    pub fn position(&self) -> f64 {
        lock(&self.state).position()
    }

    pub fn current_video(&self) -> VideoRef {
        lock(&self.state).video.clone()
    }

    /// How many times content was loaded into this adapter, including the
    /// initial load at creation.
    pub fn load_count(&self) -> usize {
        lock(&self.state).load_count
    }

    pub fn is_stopped(&self) -> bool {
        lock(&self.state).stopped
    }
}

/// Simulated player instance.
pub struct SimulatedVideoAdapter {
    state: Arc<Mutex<PlayerState>>,
    events: mpsc::UnboundedSender<AdapterEvent>,
    autoplay: bool,
}

impl SimulatedVideoAdapter {
    fn announce(&self) {
        let _ = self.events.send(AdapterEvent::Ready);
        if self.autoplay {
            let mut state = lock(&self.state);
            state.playing_since = Some(Instant::now());
            drop(state);
            let _ = self.events.send(AdapterEvent::Playing);
        }
    }
}

#[async_trait]
impl VideoAdapter for SimulatedVideoAdapter {
    async fn load(&mut self, video: &VideoRef) -> Result<(), PlaybackError> {
        {
            let mut state = lock(&self.state);
            state.video = video.clone();
            state.base_seconds = 0.0;
            state.playing_since = None;
            state.stopped = false;
            state.load_count += 1;
        }
        self.announce();
        Ok(())
    }

    async fn position(&self) -> f64 {
        lock(&self.state).position()
    }

    async fn seek_to(&mut self, seconds: f64) {
        let mut state = lock(&self.state);
        let was_playing = state.playing_since.is_some();
        state.base_seconds = seconds.max(0.0);
        state.playing_since = was_playing.then(Instant::now);
    }

    async fn stop(&mut self) {
        let mut state = lock(&self.state);
        state.freeze();
        state.stopped = true;
    }
}

/// Factory producing simulated adapters, with controllable readiness.
pub struct SimulatedAdapterFactory {
    ready: watch::Sender<bool>,
    created: Mutex<usize>,
    last_controller: Mutex<Option<SimulatedAdapterController>>,
}

impl SimulatedAdapterFactory {
    /// A factory whose capability is ready from the start.
    pub fn ready() -> Self {
        Self::with_readiness(true)
    }

    /// A factory whose capability is still loading; call
    /// [`mark_ready`](Self::mark_ready) to deliver the readiness signal.
    pub fn pending() -> Self {
        Self::with_readiness(false)
    }

    fn with_readiness(ready: bool) -> Self {
        let (ready, _) = watch::channel(ready);
        Self {
            ready,
            created: Mutex::new(0),
            last_controller: Mutex::new(None),
        }
    }

    /// Signals that the capability finished initializing.
    pub fn mark_ready(&self) {
        // send_replace stores the value even with no receiver subscribed,
        // so a readiness signal ahead of the first waiter is not lost.
        self.ready.send_replace(true);
    }

    /// How many adapters this factory has created.
    pub fn created_count(&self) -> usize {
        *self
            .created
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Controller for the most recently created adapter.
    pub fn controller(&self) -> Option<SimulatedAdapterController> {
        self.last_controller
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl AdapterFactory for SimulatedAdapterFactory {
    fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    async fn wait_ready(&self) {
        let mut receiver = self.ready.subscribe();
        // The factory owns the sender, so this cannot error before it
        // resolves; ignore anyway.
        let _ = receiver.wait_for(|ready| *ready).await;
    }

    fn create(&self, video: &VideoRef, autoplay: bool) -> Result<AdapterBinding, PlaybackError> {
        if !self.is_ready() {
            return Err(PlaybackError::AdapterUnavailable);
        }

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let state = Arc::new(Mutex::new(PlayerState {
            video: video.clone(),
            base_seconds: 0.0,
            playing_since: None,
            load_count: 1,
            stopped: false,
        }));

        let controller = SimulatedAdapterController {
            state: Arc::clone(&state),
            events: event_tx.clone(),
        };
        *self
            .last_controller
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(controller);
        *self
            .created
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) += 1;

        let adapter = SimulatedVideoAdapter {
            state,
            events: event_tx,
            autoplay,
        };
        adapter.announce();

        Ok(AdapterBinding {
            adapter: Box::new(adapter),
            events: event_rx,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_position_advances_only_while_playing() {
        let factory = SimulatedAdapterFactory::ready();
        let binding = factory.create(&VideoRef::youtube("abc"), false).unwrap();
        let controller = factory.controller().unwrap();

        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(binding.adapter.position().await, 0.0);

        controller.play();
        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(binding.adapter.position().await, 4.0);

        controller.pause();
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(binding.adapter.position().await, 4.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seek_rebases_position() {
        let factory = SimulatedAdapterFactory::ready();
        let mut binding = factory.create(&VideoRef::youtube("abc"), true).unwrap();

        binding.adapter.seek_to(120.0).await;
        tokio::time::advance(Duration::from_secs(2)).await;
        // Autoplay was on, so time keeps accruing after the seek.
        assert_eq!(binding.adapter.position().await, 122.0);
    }

    #[tokio::test]
    async fn test_pending_factory_rejects_create_until_ready() {
        let factory = SimulatedAdapterFactory::pending();
        assert!(!factory.is_ready());
        assert!(matches!(
            factory.create(&VideoRef::youtube("abc"), true),
            Err(PlaybackError::AdapterUnavailable)
        ));

        factory.mark_ready();
        factory.wait_ready().await;
        assert!(factory.create(&VideoRef::youtube("abc"), true).is_ok());
    }

    #[tokio::test]
    async fn test_readiness_signaled_before_any_waiter_is_not_lost() {
        let factory = SimulatedAdapterFactory::pending();

        // No receiver exists at this point; the signal must still stick.
        factory.mark_ready();

        assert!(factory.is_ready());
        factory.wait_ready().await;
        assert!(factory.create(&VideoRef::youtube("abc"), true).is_ok());
    }

    #[tokio::test]
    async fn test_autoplay_emits_ready_then_playing() {
        let factory = SimulatedAdapterFactory::ready();
        let mut binding = factory
            .create(&VideoRef::mp4("http://host/v.mp4"), true)
            .unwrap();

        assert_eq!(binding.events.recv().await, Some(AdapterEvent::Ready));
        assert_eq!(binding.events.recv().await, Some(AdapterEvent::Playing));
    }

    #[tokio::test]
    async fn test_without_autoplay_only_ready_is_announced() {
        let factory = SimulatedAdapterFactory::ready();
        let mut binding = factory.create(&VideoRef::youtube("abc"), false).unwrap();

        assert_eq!(binding.events.recv().await, Some(AdapterEvent::Ready));
        assert!(binding.events.try_recv().is_err());
    }
}
