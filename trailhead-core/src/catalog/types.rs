//! Catalogue entity types: modules, lessons, webinars, and their parts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a lesson, formatted `"<module>-<lesson>"` (e.g. `"2-1"`).
///
/// Identifiers uniquely locate exactly one (module, lesson) pair and are
/// never reused or mutated after catalogue definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(String);

impl LessonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LessonId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier for any openable catalogue item.
///
/// A playback session is bound to exactly one of these at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemId {
    Lesson(LessonId),
    Webinar(String),
}

impl ItemId {
    /// Returns the lesson id when this item is a lesson.
    pub fn as_lesson(&self) -> Option<&LessonId> {
        match self {
            ItemId::Lesson(id) => Some(id),
            ItemId::Webinar(_) => None,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Lesson(id) => write!(f, "lesson {id}"),
            ItemId::Webinar(id) => write!(f, "webinar {id}"),
        }
    }
}

/// Supported video reference kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoKind {
    /// A hosted video identified by its platform id
    Youtube,
    /// A directly hosted MP4 identified by URL
    Mp4,
}

/// Reference to playable video content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    pub kind: VideoKind,
    /// Platform video id for [`VideoKind::Youtube`], full URL for
    /// [`VideoKind::Mp4`]
    pub value: String,
}

impl VideoRef {
    pub fn youtube(id: impl Into<String>) -> Self {
        Self {
            kind: VideoKind::Youtube,
            value: id.into(),
        }
    }

    pub fn mp4(url: impl Into<String>) -> Self {
        Self {
            kind: VideoKind::Mp4,
            value: url.into(),
        }
    }
}

/// Downloadable material attached to a lesson or webinar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

impl Resource {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// A single trackable video unit with completion and position state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    /// Human-readable duration label, e.g. "8 min"
    pub duration: String,
    pub video: VideoRef,
    pub completed: bool,
    /// Last sampled playback position, if the lesson was ever watched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watched_seconds: Option<f64>,
    pub resources: Vec<Resource>,
}

impl Lesson {
    pub fn new(
        id: impl Into<LessonId>,
        title: impl Into<String>,
        duration: impl Into<String>,
        video: VideoRef,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration: duration.into(),
            video,
            completed: false,
            watched_seconds: None,
            resources: Vec::new(),
        }
    }

    pub fn with_resources(mut self, resources: Vec<Resource>) -> Self {
        self.resources = resources;
        self
    }
}

/// A thematic group of ordered lessons.
///
/// Lesson order within a module is the display and navigation order;
/// module order is fixed at catalogue-definition time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: u32,
    pub title: String,
    pub lessons: Vec<Lesson>,
}

impl Module {
    pub fn new(id: u32, title: impl Into<String>, lessons: Vec<Lesson>) -> Self {
        Self {
            id,
            title: title.into(),
            lessons,
        }
    }

    /// Position of the given lesson within this module, if present.
    pub fn lesson_index(&self, id: &LessonId) -> Option<usize> {
        self.lessons.iter().position(|lesson| &lesson.id == id)
    }

    /// The lesson following `id` in display order, if one exists.
    pub fn lesson_after(&self, id: &LessonId) -> Option<&Lesson> {
        let index = self.lesson_index(id)?;
        self.lessons.get(index + 1)
    }

    /// The lesson preceding `id` in display order, if one exists.
    pub fn lesson_before(&self, id: &LessonId) -> Option<&Lesson> {
        let index = self.lesson_index(id)?;
        index.checked_sub(1).and_then(|i| self.lessons.get(i))
    }
}

/// A previously broadcast webinar available on demand.
///
/// Webinars carry no completion or position state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedWebinar {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Human-readable duration label, e.g. "58 min"
    pub duration: String,
    /// Human-readable broadcast date label, e.g. "15 Jan 2026"
    pub date: String,
    pub video: VideoRef,
    pub resources: Vec<Resource>,
}

/// Presenter of a live webinar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    pub role: String,
    pub avatar_url: String,
}

/// An upcoming live webinar. Read-only display entity; joining happens
/// through the external URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveWebinar {
    pub id: u32,
    pub date: chrono::NaiveDate,
    /// Local start time label, e.g. "15:00"
    pub time: String,
    pub title: String,
    pub description: String,
    pub speaker: Speaker,
    pub join_url: String,
    pub spots_left: u32,
}
