//! Pure projection of catalogue and session state into renderable view
//! state.
//!
//! Nothing here holds state of its own: each function takes the current
//! catalogue (and active item, where relevant) and produces a plain value
//! the presentation layer can render. Callers re-project after every
//! session event.

pub mod input;

use crate::catalog::{Catalog, ItemId, LessonId, Module, RecordedWebinar, Resource};
use crate::progress::{module_progress, overall_percent};

/// Renderable state of the overall progress ring.
///
/// The ring is drawn as a circle of the configured radius whose stroke is
/// dashed to the full circumference and offset by the unfilled share.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRingView {
    pub percent: u8,
    pub circumference: f64,
    pub stroke_offset: f64,
}

impl ProgressRingView {
    pub fn project(catalog: &Catalog, radius: f64) -> Self {
        let percent = overall_percent(catalog);
        let circumference = 2.0 * std::f64::consts::PI * radius;
        let stroke_offset = circumference - (f64::from(percent) / 100.0) * circumference;
        Self {
            percent,
            circumference,
            stroke_offset,
        }
    }
}

/// Status marker shown next to a playlist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonStatus {
    Completed,
    Active,
    /// Not yet watched; shows the lesson's 1-based position in the module.
    Pending { number: usize },
}

/// One row of the module playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistEntry {
    pub id: LessonId,
    pub title: String,
    pub duration: String,
    pub status: LessonStatus,
}

/// The mini progress bar shown in the playlist header.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleProgressView {
    pub completed: usize,
    pub total: usize,
    /// Fill width as a percentage of the bar, unrounded.
    pub percent_width: f64,
}

/// The playlist sidebar for one module.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistView {
    pub module_title: String,
    pub progress: ModuleProgressView,
    pub entries: Vec<PlaylistEntry>,
}

impl PlaylistView {
    /// Projects the playlist for a module. `active` marks which lesson (if
    /// any) is currently open; a completed lesson keeps its check mark even
    /// while active.
    pub fn project(module: &Module, active: Option<&LessonId>) -> Self {
        let (completed, total) = module_progress(module);
        let percent_width = if total == 0 {
            0.0
        } else {
            100.0 * completed as f64 / total as f64
        };

        let entries = module
            .lessons
            .iter()
            .enumerate()
            .map(|(index, lesson)| {
                let status = if lesson.completed {
                    LessonStatus::Completed
                } else if active == Some(&lesson.id) {
                    LessonStatus::Active
                } else {
                    LessonStatus::Pending { number: index + 1 }
                };
                PlaylistEntry {
                    id: lesson.id.clone(),
                    title: lesson.title.clone(),
                    duration: lesson.duration.clone(),
                    status,
                }
            })
            .collect();

        Self {
            module_title: module.title.clone(),
            progress: ModuleProgressView {
                completed,
                total,
                percent_width,
            },
            entries,
        }
    }
}

/// The downloadable-materials panel below the playlist. Hidden entirely
/// (projected as `None`) when the active item has no resources.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourcePanelView {
    pub heading: &'static str,
    pub resources: Vec<Resource>,
}

impl ResourcePanelView {
    pub fn project(catalog: &Catalog, item: &ItemId) -> Option<Self> {
        let (heading, resources) = match item {
            ItemId::Lesson(id) => {
                let lesson = catalog.lesson(id).ok()?;
                ("Lesson materials", lesson.resources.clone())
            }
            ItemId::Webinar(id) => {
                let webinar = catalog.recorded_webinar(id).ok()?;
                ("Webinar materials", webinar.resources.clone())
            }
        };
        if resources.is_empty() {
            return None;
        }
        Some(Self { heading, resources })
    }
}

/// Sidebar shown instead of the playlist when a recorded webinar is open.
#[derive(Debug, Clone, PartialEq)]
pub struct WebinarSidebarView {
    pub title: String,
    pub description: String,
    pub duration: String,
    pub date: String,
    pub resources: Vec<Resource>,
}

impl WebinarSidebarView {
    pub fn project(webinar: &RecordedWebinar) -> Self {
        Self {
            title: webinar.title.clone(),
            description: webinar.description.clone(),
            duration: webinar.duration.clone(),
            date: webinar.date.clone(),
            resources: webinar.resources.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_fixtures::catalog_of;
    use crate::catalog::{Lesson, VideoRef};

    #[test]
    fn test_ring_projection_matches_stroke_math() {
        let mut catalog = catalog_of(1, 4);
        catalog.mark_complete(&"1-1".into()).unwrap();

        let ring = ProgressRingView::project(&catalog, 90.0);
        let circumference = 2.0 * std::f64::consts::PI * 90.0;

        assert_eq!(ring.percent, 25);
        assert!((ring.circumference - circumference).abs() < 1e-9);
        assert!((ring.stroke_offset - circumference * 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_ring_is_full_circle_offset_at_zero_percent() {
        let catalog = catalog_of(2, 3);
        let ring = ProgressRingView::project(&catalog, 90.0);
        assert_eq!(ring.percent, 0);
        assert!((ring.stroke_offset - ring.circumference).abs() < 1e-9);
    }

    #[test]
    fn test_playlist_statuses_and_pending_numbers() {
        let mut catalog = catalog_of(1, 4);
        catalog.mark_complete(&"1-1".into()).unwrap();
        let module = &catalog.modules()[0];

        let active = LessonId::from("1-2");
        let view = PlaylistView::project(module, Some(&active));

        assert_eq!(view.entries[0].status, LessonStatus::Completed);
        assert_eq!(view.entries[1].status, LessonStatus::Active);
        assert_eq!(view.entries[2].status, LessonStatus::Pending { number: 3 });
        assert_eq!(view.entries[3].status, LessonStatus::Pending { number: 4 });
    }

    #[test]
    fn test_playlist_completed_wins_over_active() {
        let mut catalog = catalog_of(1, 2);
        catalog.mark_complete(&"1-1".into()).unwrap();
        let module = &catalog.modules()[0];

        let active = LessonId::from("1-1");
        let view = PlaylistView::project(module, Some(&active));
        assert_eq!(view.entries[0].status, LessonStatus::Completed);
    }

    #[test]
    fn test_module_progress_bar_width() {
        let mut catalog = catalog_of(1, 3);
        catalog.mark_complete(&"1-1".into()).unwrap();
        let view = PlaylistView::project(&catalog.modules()[0], None);

        assert_eq!(view.progress.completed, 1);
        assert_eq!(view.progress.total, 3);
        assert!((view.progress.percent_width - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_resource_panel_hidden_without_resources() {
        let catalog = catalog_of(1, 1);
        let item = ItemId::Lesson(LessonId::from("1-1"));
        assert_eq!(ResourcePanelView::project(&catalog, &item), None);
    }

    #[test]
    fn test_resource_panel_lists_lesson_materials() {
        let lesson = Lesson::new("1-1", "Intro", "5 min", VideoRef::youtube("a"))
            .with_resources(vec![Resource::new("Checklist", "https://host/check.pdf")]);
        let catalog = Catalog::with_modules(vec![crate::catalog::Module::new(
            1,
            "Start",
            vec![lesson],
        )]);

        let item = ItemId::Lesson(LessonId::from("1-1"));
        let panel = ResourcePanelView::project(&catalog, &item).unwrap();
        assert_eq!(panel.heading, "Lesson materials");
        assert_eq!(panel.resources.len(), 1);
        assert_eq!(panel.resources[0].title, "Checklist");
    }

    #[test]
    fn test_webinar_sidebar_carries_labels_and_resources() {
        let webinar = RecordedWebinar {
            id: "webinar-1".to_string(),
            title: "Scaling your store".to_string(),
            description: "A retrospective on the first year".to_string(),
            duration: "58 min".to_string(),
            date: "15 Jan 2026".to_string(),
            video: VideoRef::youtube("vid"),
            resources: vec![Resource::new("Slides", "https://host/slides.pdf")],
        };

        let view = WebinarSidebarView::project(&webinar);
        assert_eq!(view.duration, "58 min");
        assert_eq!(view.date, "15 Jan 2026");
        assert_eq!(view.resources.len(), 1);
    }
}
