//! Derived progress percentages for display.

use crate::catalog::{Catalog, Module};

/// Completed and total lesson counts for one module.
pub fn module_progress(module: &Module) -> (usize, usize) {
    let completed = module.lessons.iter().filter(|l| l.completed).count();
    (completed, module.lessons.len())
}

/// Whole-course completion percentage in `[0, 100]`.
///
/// Rounds half-up (`12.5` becomes `13`). An empty catalogue reports 0.
pub fn overall_percent(catalog: &Catalog) -> u8 {
    let total = catalog.lesson_count();
    if total == 0 {
        return 0;
    }

    let completed = catalog
        .modules()
        .iter()
        .map(|module| module_progress(module).0)
        .sum::<usize>();

    (100.0 * completed as f64 / total as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_fixtures::catalog_of;

    #[test]
    fn test_module_progress_counts() {
        let mut catalog = catalog_of(1, 4);
        catalog.mark_complete(&"1-1".into()).unwrap();
        catalog.mark_complete(&"1-3".into()).unwrap();

        let module = &catalog.modules()[0];
        assert_eq!(module_progress(module), (2, 4));
    }

    #[test]
    fn test_overall_percent_rounds_half_up() {
        // 3 of 24 complete: 12.5% rounds up to 13
        let mut catalog = catalog_of(6, 4);
        catalog.mark_complete(&"1-1".into()).unwrap();
        catalog.mark_complete(&"1-2".into()).unwrap();
        catalog.mark_complete(&"2-1".into()).unwrap();

        assert_eq!(overall_percent(&catalog), 13);
    }

    #[test]
    fn test_overall_percent_bounds() {
        let mut catalog = catalog_of(2, 2);
        assert_eq!(overall_percent(&catalog), 0);

        for id in ["1-1", "1-2", "2-1", "2-2"] {
            catalog.mark_complete(&id.into()).unwrap();
        }
        assert_eq!(overall_percent(&catalog), 100);
    }

    #[test]
    fn test_overall_percent_empty_catalog_is_zero() {
        assert_eq!(overall_percent(&Catalog::default()), 0);
    }
}
