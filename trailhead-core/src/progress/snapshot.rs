//! Serialized progress snapshots and their merge into a live catalogue.
//!
//! The snapshot is keyed by lesson id rather than by (module index, lesson
//! index), so saved progress survives a reordering of modules or lessons
//! between catalogue versions. Ids present only in the snapshot (the
//! catalogue shrank) are ignored; lessons present only in the catalogue
//! (it grew) keep their defaults.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, LessonId};

/// Progress fields persisted per lesson.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LessonProgress {
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub watched_seconds: Option<f64>,
}

/// A serialized projection of the catalogue's mutable progress fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// When this snapshot was written.
    #[serde(default)]
    pub saved_at: DateTime<Utc>,
    /// Per-lesson progress, keyed by lesson id.
    pub lessons: BTreeMap<LessonId, LessonProgress>,
}

impl ProgressSnapshot {
    /// Captures the current progress state of a catalogue.
    ///
    /// Only lessons with non-default progress are recorded, keeping the
    /// stored payload proportional to what the user actually watched.
    pub fn capture(catalog: &Catalog) -> Self {
        let lessons = catalog
            .modules()
            .iter()
            .flat_map(|module| module.lessons.iter())
            .filter(|lesson| lesson.completed || lesson.watched_seconds.is_some())
            .map(|lesson| {
                (
                    lesson.id.clone(),
                    LessonProgress {
                        completed: lesson.completed,
                        watched_seconds: lesson.watched_seconds,
                    },
                )
            })
            .collect();

        Self {
            saved_at: Utc::now(),
            lessons,
        }
    }

    /// Overwrites the progress fields of every live lesson that has an
    /// entry in this snapshot. Unknown snapshot ids are ignored; lessons
    /// without an entry keep their defaults.
    pub fn apply(&self, catalog: &mut Catalog) {
        for (id, progress) in &self.lessons {
            if catalog.lesson(id).is_err() {
                tracing::debug!(lesson = %id, "saved progress for unknown lesson, skipping");
                continue;
            }
            if progress.completed {
                // Errors are impossible here after the lookup above, but
                // stay on the fallible path rather than unwrapping.
                let _ = catalog.mark_complete(id);
            }
            if let Some(seconds) = progress.watched_seconds {
                let _ = catalog.record_position(id, seconds);
            }
        }
    }

    /// Serializes the snapshot. Never fails for any valid catalogue state:
    /// the snapshot holds only booleans, finite floats, and string keys.
    pub fn to_json(&self, pretty: bool) -> String {
        let result = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        result.unwrap_or_else(|e| {
            tracing::error!("progress snapshot failed to serialize: {e}");
            String::from("{\"lessons\":{}}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_fixtures::catalog_of;

    #[test]
    fn test_capture_skips_untouched_lessons() {
        let mut catalog = catalog_of(2, 2);
        catalog.mark_complete(&"1-2".into()).unwrap();
        catalog.record_position(&"2-1".into(), 180.0).unwrap();

        let snapshot = ProgressSnapshot::capture(&catalog);

        assert_eq!(snapshot.lessons.len(), 2);
        assert!(snapshot.lessons[&LessonId::from("1-2")].completed);
        assert_eq!(
            snapshot.lessons[&LessonId::from("2-1")].watched_seconds,
            Some(180.0)
        );
    }

    #[test]
    fn test_round_trip_restores_exact_fields() {
        let mut original = catalog_of(3, 3);
        original.mark_complete(&"1-1".into()).unwrap();
        original.mark_complete(&"2-3".into()).unwrap();
        original.record_position(&"3-2".into(), 61.5).unwrap();

        let json = ProgressSnapshot::capture(&original).to_json(false);
        let restored: ProgressSnapshot = serde_json::from_str(&json).unwrap();

        let mut fresh = catalog_of(3, 3);
        restored.apply(&mut fresh);

        assert_eq!(fresh, original);
    }

    #[test]
    fn test_merge_ignores_ids_missing_from_catalogue() {
        // Snapshot taken against a larger catalogue than the live one
        let mut large = catalog_of(4, 4);
        large.mark_complete(&"4-4".into()).unwrap();
        large.mark_complete(&"1-1".into()).unwrap();
        let snapshot = ProgressSnapshot::capture(&large);

        let mut small = catalog_of(2, 2);
        snapshot.apply(&mut small);

        assert!(small.lesson(&"1-1".into()).unwrap().completed);
        assert!(small.lesson(&"4-4".into()).is_err());
    }

    #[test]
    fn test_merge_leaves_new_lessons_at_defaults() {
        // Snapshot taken against a smaller catalogue than the live one
        let mut small = catalog_of(1, 2);
        small.mark_complete(&"1-1".into()).unwrap();
        let snapshot = ProgressSnapshot::capture(&small);

        let mut grown = catalog_of(3, 4);
        snapshot.apply(&mut grown);

        assert!(grown.lesson(&"1-1".into()).unwrap().completed);
        let untouched = grown.lesson(&"3-4".into()).unwrap();
        assert!(!untouched.completed);
        assert_eq!(untouched.watched_seconds, None);
    }

    #[test]
    fn test_merge_survives_module_reordering() {
        let mut catalog = catalog_of(2, 2);
        catalog.mark_complete(&"2-1".into()).unwrap();
        let snapshot = ProgressSnapshot::capture(&catalog);

        // A "new catalogue version" with modules swapped: id keying still
        // lands the progress on the right lesson.
        let fresh = catalog_of(2, 2);
        let mut modules: Vec<_> = fresh.modules().to_vec();
        modules.reverse();
        let mut reordered = Catalog::with_modules(modules);
        snapshot.apply(&mut reordered);

        assert!(reordered.lesson(&"2-1".into()).unwrap().completed);
        assert!(!reordered.lesson(&"1-1".into()).unwrap().completed);
    }
}
