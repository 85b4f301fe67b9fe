//! Course catalogue: modules, lessons, and webinar collections.
//!
//! The catalogue shape is fixed at build time; only per-lesson progress
//! fields (`completed`, `watched_seconds`) mutate at runtime. Lookups are
//! linear scans, which is acceptable for a small static catalogue.

mod types;

pub use types::{
    ItemId, Lesson, LessonId, LiveWebinar, Module, RecordedWebinar, Resource, Speaker, VideoKind,
    VideoRef,
};

/// Errors from catalogue lookups and mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("lesson {id} not found in catalogue")]
    LessonNotFound { id: LessonId },

    #[error("recorded webinar {id} not found in catalogue")]
    WebinarNotFound { id: String },
}

/// The in-memory course catalogue.
///
/// Owned by the application for its entire lifetime. There are no deletion
/// operations; modules and lessons are never reordered at runtime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    modules: Vec<Module>,
    recorded_webinars: Vec<RecordedWebinar>,
    live_webinars: Vec<LiveWebinar>,
}

impl Catalog {
    pub fn new(
        modules: Vec<Module>,
        recorded_webinars: Vec<RecordedWebinar>,
        live_webinars: Vec<LiveWebinar>,
    ) -> Self {
        Self {
            modules,
            recorded_webinars,
            live_webinars,
        }
    }

    /// Creates a catalogue holding only course modules.
    pub fn with_modules(modules: Vec<Module>) -> Self {
        Self {
            modules,
            ..Default::default()
        }
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn recorded_webinars(&self) -> &[RecordedWebinar] {
        &self.recorded_webinars
    }

    pub fn live_webinars(&self) -> &[LiveWebinar] {
        &self.live_webinars
    }

    /// Total number of lessons across all modules.
    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }

    /// Finds a lesson by id.
    ///
    /// # Errors
    /// - `CatalogError::LessonNotFound` - No lesson carries this id
    pub fn lesson(&self, id: &LessonId) -> Result<&Lesson, CatalogError> {
        self.modules
            .iter()
            .flat_map(|module| module.lessons.iter())
            .find(|lesson| &lesson.id == id)
            .ok_or_else(|| CatalogError::LessonNotFound { id: id.clone() })
    }

    /// Finds the module containing the given lesson.
    ///
    /// # Errors
    /// - `CatalogError::LessonNotFound` - No module contains this lesson
    pub fn module_containing(&self, id: &LessonId) -> Result<&Module, CatalogError> {
        self.modules
            .iter()
            .find(|module| module.lesson_index(id).is_some())
            .ok_or_else(|| CatalogError::LessonNotFound { id: id.clone() })
    }

    /// Finds a recorded webinar by id.
    ///
    /// # Errors
    /// - `CatalogError::WebinarNotFound` - No webinar carries this id
    pub fn recorded_webinar(&self, id: &str) -> Result<&RecordedWebinar, CatalogError> {
        self.recorded_webinars
            .iter()
            .find(|webinar| webinar.id == id)
            .ok_or_else(|| CatalogError::WebinarNotFound { id: id.to_string() })
    }

    /// Resolves the video reference for any openable item.
    ///
    /// # Errors
    /// - `CatalogError::LessonNotFound` / `CatalogError::WebinarNotFound`
    pub fn video_for(&self, item: &ItemId) -> Result<VideoRef, CatalogError> {
        match item {
            ItemId::Lesson(id) => Ok(self.lesson(id)?.video.clone()),
            ItemId::Webinar(id) => Ok(self.recorded_webinar(id)?.video.clone()),
        }
    }

    /// Marks a lesson complete. Idempotent: returns `true` when the flag
    /// actually changed, so callers can skip redundant write-throughs.
    ///
    /// # Errors
    /// - `CatalogError::LessonNotFound` - No lesson carries this id
    pub fn mark_complete(&mut self, id: &LessonId) -> Result<bool, CatalogError> {
        let lesson = self.lesson_mut(id)?;
        let changed = !lesson.completed;
        lesson.completed = true;
        Ok(changed)
    }

    /// Records the last sampled playback position for a lesson.
    /// Positions are clamped to be non-negative.
    ///
    /// # Errors
    /// - `CatalogError::LessonNotFound` - No lesson carries this id
    pub fn record_position(&mut self, id: &LessonId, seconds: f64) -> Result<(), CatalogError> {
        let lesson = self.lesson_mut(id)?;
        lesson.watched_seconds = Some(seconds.max(0.0));
        Ok(())
    }

    fn lesson_mut(&mut self, id: &LessonId) -> Result<&mut Lesson, CatalogError> {
        self.modules
            .iter_mut()
            .flat_map(|module| module.lessons.iter_mut())
            .find(|lesson| &lesson.id == id)
            .ok_or_else(|| CatalogError::LessonNotFound { id: id.clone() })
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::*;

    /// Builds a catalogue of `modules` modules with `lessons_per_module`
    /// lessons each, ids formatted the usual `"<module>-<lesson>"` way.
    pub fn catalog_of(modules: u32, lessons_per_module: u32) -> Catalog {
        let modules = (1..=modules)
            .map(|m| {
                let lessons = (1..=lessons_per_module)
                    .map(|l| {
                        Lesson::new(
                            format!("{m}-{l}").as_str(),
                            format!("Lesson {m}.{l}"),
                            "5 min",
                            VideoRef::youtube(format!("vid-{m}-{l}")),
                        )
                    })
                    .collect();
                Module::new(m, format!("Module {m}"), lessons)
            })
            .collect();
        Catalog::with_modules(modules)
    }
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::catalog_of;
    use super::*;

    #[test]
    fn test_lookup_consistency_for_all_known_ids() {
        let catalog = catalog_of(3, 4);

        for module in catalog.modules() {
            for lesson in &module.lessons {
                let found = catalog.lesson(&lesson.id).unwrap();
                let containing = catalog.module_containing(&lesson.id).unwrap();
                assert_eq!(found.id, lesson.id);
                assert_eq!(containing.id, module.id);
                assert!(containing.lesson_index(&lesson.id).is_some());
            }
        }
    }

    #[test]
    fn test_lookups_agree_on_unknown_id() {
        let catalog = catalog_of(2, 2);
        let unknown = LessonId::from("9-9");

        assert_eq!(
            catalog.lesson(&unknown),
            Err(CatalogError::LessonNotFound {
                id: unknown.clone()
            })
        );
        assert_eq!(
            catalog.module_containing(&unknown),
            Err(CatalogError::LessonNotFound { id: unknown })
        );
    }

    #[test]
    fn test_mark_complete_is_idempotent() {
        let mut catalog = catalog_of(1, 2);
        let id = LessonId::from("1-1");

        assert_eq!(catalog.mark_complete(&id), Ok(true));
        let after_first = catalog.clone();

        assert_eq!(catalog.mark_complete(&id), Ok(false));
        assert_eq!(catalog, after_first);
    }

    #[test]
    fn test_record_position_clamps_negative() {
        let mut catalog = catalog_of(1, 1);
        let id = LessonId::from("1-1");

        catalog.record_position(&id, -3.5).unwrap();
        assert_eq!(catalog.lesson(&id).unwrap().watched_seconds, Some(0.0));

        catalog.record_position(&id, 42.0).unwrap();
        assert_eq!(catalog.lesson(&id).unwrap().watched_seconds, Some(42.0));
    }

    #[test]
    fn test_mutations_on_unknown_id_fail() {
        let mut catalog = catalog_of(1, 1);
        let unknown = LessonId::from("7-1");

        assert!(catalog.mark_complete(&unknown).is_err());
        assert!(catalog.record_position(&unknown, 10.0).is_err());
    }

    #[test]
    fn test_module_navigation_order() {
        let catalog = catalog_of(1, 3);
        let module = catalog.module_containing(&LessonId::from("1-2")).unwrap();

        assert_eq!(
            module.lesson_after(&LessonId::from("1-2")).map(|l| &l.id),
            Some(&LessonId::from("1-3"))
        );
        assert_eq!(
            module.lesson_before(&LessonId::from("1-2")).map(|l| &l.id),
            Some(&LessonId::from("1-1"))
        );
        assert!(module.lesson_after(&LessonId::from("1-3")).is_none());
        assert!(module.lesson_before(&LessonId::from("1-1")).is_none());
    }
}
