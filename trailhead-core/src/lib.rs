//! Trailhead Core - learning-path catalogue and playback engine
//!
//! This crate provides the building blocks for a client-side learning path:
//! an immutable course catalogue (modules, lessons, webinars), durable
//! watch-progress persistence, a playback session driving an abstract video
//! adapter, and pure view-state projection for presentation layers.

pub mod catalog;
pub mod config;
pub mod events;
pub mod playback;
pub mod progress;
pub mod view;

// Re-export main types for convenient access
pub use catalog::{Catalog, CatalogError, ItemId, Lesson, LessonId, Module};
pub use config::TrailheadConfig;
pub use events::SessionEvent;
pub use playback::{PlaybackError, SessionHandle, spawn_session};
pub use progress::{PersistenceError, ProgressSnapshot, ProgressStore};

/// Core errors that can bubble up from any Trailhead subsystem.
#[derive(Debug, thiserror::Error)]
pub enum TrailheadError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrailheadError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            TrailheadError::Catalog(e) => match e {
                CatalogError::LessonNotFound { id } => {
                    format!("Lesson {id} is not part of this course")
                }
                CatalogError::WebinarNotFound { id } => {
                    format!("Webinar {id} was not found")
                }
            },
            TrailheadError::Persistence(_) => "Could not access saved progress".to_string(),
            TrailheadError::Playback(e) => match e {
                PlaybackError::AdapterUnavailable => {
                    "The video player is still loading".to_string()
                }
                PlaybackError::NoActiveSession => "Nothing is currently playing".to_string(),
                _ => "Playback error occurred".to_string(),
            },
            TrailheadError::Configuration { .. } => "Configuration error occurred".to_string(),
            TrailheadError::Io(_) => "File system error occurred".to_string(),
        }
    }

    /// Checks if this error is due to a missing catalogue item rather than
    /// an internal failure. Callers may degrade these to a quiet no-op.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TrailheadError::Catalog(_))
    }
}

pub type Result<T> = std::result::Result<T, TrailheadError>;
