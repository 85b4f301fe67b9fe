//! CLI command implementations

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Subcommand;
use trailhead_core::catalog::{ItemId, LessonId};
use trailhead_core::config::TrailheadConfig;
use trailhead_core::events::SessionEvent;
use trailhead_core::playback::simulated::SimulatedAdapterFactory;
use trailhead_core::playback::spawn_session;
use trailhead_core::progress::{self, JsonFileProgressStore};
use trailhead_core::view::{
    LessonStatus, PlaylistView, ProgressRingView, ResourcePanelView, WebinarSidebarView,
};
use trailhead_core::{Catalog, Result};

use crate::catalog_data;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the course catalogue with per-lesson progress
    Catalog {
        /// Directory holding the progress snapshot
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
    },
    /// List recorded and upcoming webinars
    Webinars,
    /// Show overall progress
    Progress {
        /// Directory holding the progress snapshot
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
    },
    /// Play a lesson or recorded webinar with the simulated player
    Play {
        /// Lesson id (e.g. "2-3") or webinar id (e.g. "webinar-1")
        item: String,
        /// How many seconds of simulated viewing before closing
        #[arg(short, long, default_value = "12")]
        watch: u64,
        /// Watch through to the end instead of closing early
        #[arg(long)]
        finish: bool,
        /// Directory holding the progress snapshot
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
    },
    /// Mark a lesson as complete
    Complete {
        /// Lesson id (e.g. "2-3")
        lesson: String,
        /// Directory holding the progress snapshot
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
    },
    /// Discard all saved progress
    Reset {
        /// Directory holding the progress snapshot
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Catalog { data_dir } => show_catalog(data_dir),
        Commands::Webinars => show_webinars(),
        Commands::Progress { data_dir } => show_progress(data_dir),
        Commands::Play {
            item,
            watch,
            finish,
            data_dir,
        } => play(item, watch, finish, data_dir).await,
        Commands::Complete { lesson, data_dir } => complete_lesson(lesson, data_dir),
        Commands::Reset { data_dir } => reset_progress(data_dir),
    }
}

/// Print the catalogue as module playlists with progress markers.
fn show_catalog(data_dir: PathBuf) -> Result<()> {
    let config = TrailheadConfig::from_env();
    let catalog = load_catalog(&data_dir, &config);

    for module in catalog.modules() {
        let view = PlaylistView::project(module, None);
        println!(
            "Module {}: {} ({}/{} lessons)",
            module.id, view.module_title, view.progress.completed, view.progress.total
        );
        for entry in &view.entries {
            let marker = match entry.status {
                LessonStatus::Completed => "[x]".to_string(),
                LessonStatus::Active => "[>]".to_string(),
                LessonStatus::Pending { number } => format!("[{number}]"),
            };
            println!("  {marker} {}  {} ({})", entry.id, entry.title, entry.duration);
        }
        println!();
    }
    Ok(())
}

/// Print recorded and live webinars.
fn show_webinars() -> Result<()> {
    let catalog = catalog_data::sample_catalog();

    println!("Recorded webinars:");
    for webinar in catalog.recorded_webinars() {
        let view = WebinarSidebarView::project(webinar);
        println!("  {}  {} ({}, {})", webinar.id, view.title, view.duration, view.date);
        println!("      {}", view.description);
    }

    println!();
    println!("Upcoming live webinars:");
    for live in catalog.live_webinars() {
        println!(
            "  {} {}  {}  ({} spots left)",
            live.date, live.time, live.title, live.spots_left
        );
        println!("      {} — {}", live.speaker.name, live.speaker.role);
        println!("      join: {}", live.join_url);
    }
    Ok(())
}

/// Print the overall progress ring numbers.
fn show_progress(data_dir: PathBuf) -> Result<()> {
    let config = TrailheadConfig::from_env();
    let catalog = load_catalog(&data_dir, &config);

    let ring = ProgressRingView::project(&catalog, config.view.ring_radius);
    let completed: usize = catalog
        .modules()
        .iter()
        .map(|m| progress::module_progress(m).0)
        .sum();

    println!(
        "Overall progress: {}% ({completed}/{} lessons)",
        ring.percent,
        catalog.lesson_count()
    );
    println!(
        "Ring stroke: circumference {:.1}, offset {:.1}",
        ring.circumference, ring.stroke_offset
    );
    Ok(())
}

/// Run a simulated playback session, printing session events as they
/// arrive, then report the resulting progress.
async fn play(item: String, watch: u64, finish: bool, data_dir: PathBuf) -> Result<()> {
    let config = TrailheadConfig::from_env();
    let catalog = load_catalog(&data_dir, &config);
    let store = JsonFileProgressStore::new(&data_dir, config.persistence.storage_key);

    let item = parse_item(&item);
    let factory = Arc::new(SimulatedAdapterFactory::ready());
    let handle = spawn_session(catalog, Box::new(store), factory.clone(), config.clone());
    let mut events = handle.subscribe();

    if let Err(e) = handle.open(item.clone()).await {
        println!("{}", e.user_message());
        handle.shutdown().await?;
        return Ok(());
    }

    if let Some(panel) = ResourcePanelView::project(&handle.catalog().await?, &item) {
        println!("{}:", panel.heading);
        for resource in &panel.resources {
            println!("  - {} ({})", resource.title, resource.url);
        }
    }

    let deadline = tokio::time::sleep(Duration::from_secs(watch));
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => print_event(&event),
                Err(_) => break,
            },
            _ = &mut deadline => break,
        }
    }

    if finish && let Some(controller) = factory.controller() {
        controller.finish();
        // Drain the completion events before tearing down.
        while let Ok(event) =
            tokio::time::timeout(Duration::from_millis(100), events.recv()).await
        {
            match event {
                Ok(event) => print_event(&event),
                Err(_) => break,
            }
        }
    }

    handle.close().await?;
    let catalog = handle.catalog().await?;
    handle.shutdown().await?;

    let ring = ProgressRingView::project(&catalog, TrailheadConfig::from_env().view.ring_radius);
    println!("Overall progress now: {}%", ring.percent);
    Ok(())
}

/// Mark a lesson complete directly, without opening a player.
fn complete_lesson(lesson: String, data_dir: PathBuf) -> Result<()> {
    let config = TrailheadConfig::from_env();
    let mut catalog = load_catalog(&data_dir, &config);
    let mut store = JsonFileProgressStore::new(&data_dir, config.persistence.storage_key);

    let id = LessonId::from(lesson.as_str());
    match catalog.mark_complete(&id) {
        Ok(true) => {
            progress::save(&mut store, &catalog, &config.persistence)?;
            println!("Marked {id} complete");
        }
        Ok(false) => println!("{id} was already complete"),
        Err(e) => println!("{}", trailhead_core::TrailheadError::from(e).user_message()),
    }
    Ok(())
}

/// Delete the saved snapshot.
fn reset_progress(data_dir: PathBuf) -> Result<()> {
    let config = TrailheadConfig::from_env();
    let store = JsonFileProgressStore::new(&data_dir, config.persistence.storage_key);

    match std::fs::remove_file(store.path()) {
        Ok(()) => println!("Progress reset"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            println!("No saved progress to reset");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Builds the sample catalogue with saved progress applied.
fn load_catalog(data_dir: &PathBuf, config: &TrailheadConfig) -> Catalog {
    let mut catalog = catalog_data::sample_catalog();
    let store = JsonFileProgressStore::new(data_dir, config.persistence.storage_key);
    progress::restore(&store, &mut catalog);
    catalog
}

fn parse_item(raw: &str) -> ItemId {
    if raw.starts_with("webinar-") {
        ItemId::Webinar(raw.to_string())
    } else {
        ItemId::Lesson(LessonId::from(raw))
    }
}

fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::Opened { item } => println!("opened {item}"),
        SessionEvent::Switched { item } => println!("switched to {item}"),
        SessionEvent::LessonCompleted { id } => println!("lesson {id} completed"),
        SessionEvent::ModuleCompleted { module_id } => {
            println!("module {module_id} completed")
        }
        SessionEvent::PositionSaved { id, seconds } => {
            println!("saved position {seconds:.0}s for {id}")
        }
        SessionEvent::Closed => println!("session closed"),
    }
}
