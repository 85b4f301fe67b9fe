//! Actor implementation for the playback session.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use crate::catalog::Catalog;
use crate::config::TrailheadConfig;
use crate::progress::ProgressStore;

use super::adapter::AdapterFactory;
use super::commands::SessionCommand;
use super::handle::SessionHandle;
use super::session::{EngineWake, PlaybackEngine};

/// Spawns the playback session actor and returns its handle.
///
/// The actor owns the catalogue, the progress store, and at most one video
/// adapter, and processes commands sequentially: state transitions and
/// their persistence write-throughs never interleave.
pub fn spawn_session(
    catalog: Catalog,
    store: Box<dyn ProgressStore>,
    factory: Arc<dyn AdapterFactory>,
    config: TrailheadConfig,
) -> SessionHandle {
    let (sender, receiver) = mpsc::channel(64);
    let (internal_tx, internal_rx) = mpsc::unbounded_channel();
    let (event_tx, _) = broadcast::channel(128);

    let engine = PlaybackEngine::new(
        catalog,
        store,
        factory,
        config,
        event_tx.clone(),
        internal_tx,
    );

    tokio::spawn(async move {
        run_actor_loop(engine, receiver, internal_rx).await;
    });

    SessionHandle::new(sender, event_tx)
}

/// One thing the actor loop reacted to.
enum Step {
    Command(SessionCommand),
    Wake(EngineWake),
    Disconnected,
}

/// Runs the main actor message processing loop.
///
/// Processes external commands, internal continuations, adapter events, and
/// sampling ticks one at a time, in order. The loop ends when the command
/// channel closes or a shutdown command arrives.
async fn run_actor_loop(
    mut engine: PlaybackEngine,
    mut receiver: mpsc::Receiver<SessionCommand>,
    mut internal: mpsc::UnboundedReceiver<SessionCommand>,
) {
    tracing::debug!("playback session actor started");

    loop {
        let step = tokio::select! {
            maybe_command = receiver.recv() => match maybe_command {
                Some(command) => Step::Command(command),
                None => Step::Disconnected,
            },
            Some(command) = internal.recv() => Step::Command(command),
            wake = engine.next_wake() => Step::Wake(wake),
        };

        match step {
            Step::Command(command) => {
                if !handle_command(&mut engine, command).await {
                    break;
                }
            }
            Step::Wake(EngineWake::Adapter(event)) => engine.handle_adapter_event(event).await,
            Step::Wake(EngineWake::SampleTick) => engine.handle_sample_tick().await,
            Step::Disconnected => break,
        }
    }

    tracing::debug!("playback session actor stopped");
}

/// Handles a single command. Returns true to continue processing,
/// false to shut down.
async fn handle_command(engine: &mut PlaybackEngine, command: SessionCommand) -> bool {
    match command {
        SessionCommand::Open { item, responder } => {
            let result = engine.open(item).await;
            let _ = responder.send(result);
        }

        SessionCommand::ResumeOpen { item, generation } => {
            engine.resume_open(item, generation);
        }

        SessionCommand::Switch { item, responder } => {
            let result = engine.switch(item).await;
            let _ = responder.send(result);
        }

        SessionCommand::Close { responder } => {
            engine.close().await;
            let _ = responder.send(());
        }

        SessionCommand::Advance { responder } => {
            let result = engine.advance().await;
            let _ = responder.send(result);
        }

        SessionCommand::Retreat { responder } => {
            let result = engine.retreat().await;
            let _ = responder.send(result);
        }

        SessionCommand::Status { responder } => {
            let _ = responder.send(engine.status());
        }

        SessionCommand::CatalogState { responder } => {
            let _ = responder.send(engine.catalog().clone());
        }

        SessionCommand::Shutdown { responder } => {
            tracing::debug!("playback session actor shutting down");
            engine.close().await;
            let _ = responder.send(());
            return false; // Signal to break out of the loop
        }
    }
    true // Continue processing
}
