// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Active-diagram resolution on view entry.

use crate::cache::SessionCache;
use crate::model::{Catalog, DiagramId, Scope};

/// Decides which diagram is active when a scope is entered, and records every later change back
/// into the injected session cache so a restart resumes the same diagram.
pub struct SelectionController {
    cache: Box<dyn SessionCache>,
}

impl SelectionController {
    pub fn new(cache: Box<dyn SessionCache>) -> Self {
        Self { cache }
    }

    /// Resolution order: a syntactically valid cached id wins immediately, without checking
    /// catalog membership (responsiveness over correctness; the body view absorbs a miss). A
    /// malformed cached id is discarded. Otherwise the most-recently-updated catalog entry, and
    /// `None` for an empty catalog; a diagram is never auto-created.
    pub fn resolve(&self, scope: &Scope, catalog: &Catalog) -> Option<DiagramId> {
        if let Some(cached) = self.cache.last_active(scope.project_id()) {
            match DiagramId::parse(&cached) {
                Ok(diagram_id) => return Some(diagram_id),
                Err(err) => {
                    log::debug!("discarding malformed cached diagram id {cached:?}: {err}");
                    self.cache.clear_last_active(scope.project_id());
                }
            }
        }

        catalog.records().first().map(|record| *record.diagram_id())
    }

    /// Writes the new active id through to the cache; `None` clears the project's entry.
    pub fn remember(&self, scope: &Scope, active: Option<&DiagramId>) {
        match active {
            Some(diagram_id) => self
                .cache
                .set_last_active(scope.project_id(), &diagram_id.to_string()),
            None => self.cache.clear_last_active(scope.project_id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionController;
    use crate::cache::{MemorySessionCache, SessionCache};
    use crate::model::{fixtures, Catalog, DiagramId};
    use std::sync::Arc;

    // Shares the underlying cache with the controller so tests can seed and inspect it.
    #[derive(Clone)]
    struct SharedCache(Arc<MemorySessionCache>);

    impl SessionCache for SharedCache {
        fn last_active(&self, project_id: &crate::model::ProjectId) -> Option<String> {
            self.0.last_active(project_id)
        }

        fn set_last_active(&self, project_id: &crate::model::ProjectId, diagram_id: &str) {
            self.0.set_last_active(project_id, diagram_id)
        }

        fn clear_last_active(&self, project_id: &crate::model::ProjectId) {
            self.0.clear_last_active(project_id)
        }
    }

    fn controller() -> (SelectionController, SharedCache) {
        let cache = SharedCache(Arc::new(MemorySessionCache::new()));
        (SelectionController::new(Box::new(cache.clone())), cache)
    }

    #[test]
    fn cached_valid_id_wins_even_when_absent_from_the_catalog() {
        let scope = fixtures::scope();
        let (controller, cache) = controller();
        let cached = DiagramId::generate();
        cache.set_last_active(scope.project_id(), &cached.to_string());

        let catalog = Catalog::from_records(vec![fixtures::record(&scope, "Other", 5)]);

        assert_eq!(controller.resolve(&scope, &catalog), Some(cached));
    }

    #[test]
    fn malformed_cached_id_falls_back_to_most_recently_updated() {
        let scope = fixtures::scope();
        let (controller, cache) = controller();
        cache.set_last_active(scope.project_id(), "diagram-7");

        let fresh = fixtures::record(&scope, "Fresh", 1);
        let fresh_id = *fresh.diagram_id();
        let catalog = Catalog::from_records(vec![fixtures::record(&scope, "Old", 60), fresh]);

        assert_eq!(controller.resolve(&scope, &catalog), Some(fresh_id));
        // The malformed entry is discarded, not kept around to re-fail next time.
        assert_eq!(cache.last_active(scope.project_id()), None);
    }

    #[test]
    fn empty_catalog_resolves_to_none() {
        let scope = fixtures::scope();
        let (controller, _cache) = controller();

        assert_eq!(controller.resolve(&scope, &Catalog::default()), None);
    }

    #[test]
    fn remember_writes_through_and_clears_on_none() {
        let scope = fixtures::scope();
        let (controller, cache) = controller();
        let diagram_id = DiagramId::generate();

        controller.remember(&scope, Some(&diagram_id));
        assert_eq!(
            cache.last_active(scope.project_id()),
            Some(diagram_id.to_string())
        );

        controller.remember(&scope, None);
        assert_eq!(cache.last_active(scope.project_id()), None);
    }
}
