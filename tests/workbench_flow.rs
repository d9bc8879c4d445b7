// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end library flow against the in-memory store: load, resolve, create, rename, delete,
//! reconcile, reload.

use std::sync::Arc;

use chrono::{Duration, Utc};

use proteus::cache::{MemorySessionCache, SessionCache};
use proteus::model::{
    DiagramId, DiagramRecord, ProjectId, Scope, UserId, DEFAULT_DIAGRAM_BODY,
};
use proteus::ops;
use proteus::reconcile::reconcile_duplicates;
use proteus::select::SelectionController;
use proteus::store::{load_catalog, MemoryDiagramStore};

#[derive(Clone)]
struct SharedCache(Arc<MemorySessionCache>);

impl SessionCache for SharedCache {
    fn last_active(&self, project_id: &ProjectId) -> Option<String> {
        self.0.last_active(project_id)
    }

    fn set_last_active(&self, project_id: &ProjectId, diagram_id: &str) {
        self.0.set_last_active(project_id, diagram_id)
    }

    fn clear_last_active(&self, project_id: &ProjectId) {
        self.0.clear_last_active(project_id)
    }
}

fn record(scope: &Scope, name: &str, minutes_ago: i64) -> DiagramRecord {
    DiagramRecord::new(
        DiagramId::generate(),
        *scope,
        name,
        DEFAULT_DIAGRAM_BODY,
        None,
        Utc::now() - Duration::minutes(minutes_ago),
    )
}

#[test]
fn full_session_flow_against_the_memory_store() {
    let scope = Scope::new(ProjectId::generate(), UserId::generate());
    let store = MemoryDiagramStore::new();
    store.seed(record(&scope, "Order Fulfilment", 200));
    store.seed(record(&scope, "Order Fulfilment", 30));
    store.seed(record(&scope, "Customer Onboarding", 10));

    let cache = SharedCache(Arc::new(MemorySessionCache::new()));
    let selection = SelectionController::new(Box::new(cache.clone()));

    // First entry into the scope: no cached id, so the most recently updated diagram wins.
    let load = load_catalog(&store, &scope);
    assert!(!load.degraded);
    let mut catalog = load.catalog;
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.records()[0].name(), "Customer Onboarding");

    let active = selection.resolve(&scope, &catalog);
    catalog.set_active_diagram_id(active);
    assert_eq!(
        catalog.active_record().map(|record| record.name()),
        Some("Customer Onboarding")
    );
    selection.remember(&scope, catalog.active_diagram_id());

    // Create a diagram; it is appended, activated, and persisted.
    let created = ops::create_diagram(&mut catalog, &store, &scope).expect("create");
    assert_eq!(created.name, "Untitled Diagram");
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.active_diagram_id(), Some(&created.diagram_id));
    selection.remember(&scope, catalog.active_diagram_id());
    assert_eq!(store.rows().len(), 4);

    // A second restart within the session resumes the created diagram from the cache.
    let resumed = SelectionController::new(Box::new(cache.clone()));
    let reload = load_catalog(&store, &scope);
    assert_eq!(
        resumed.resolve(&scope, &reload.catalog),
        Some(created.diagram_id)
    );

    // Rename it away from the auto-generated name.
    ops::rename_diagram(&mut catalog, &store, &created.diagram_id, "Claims Intake")
        .expect("rename");
    assert!(store.rows().iter().any(|row| row.name() == "Claims Intake"));

    // Delete it; the active id moves to the first remaining tab and the cache follows.
    let deleted = ops::delete_diagram(&mut catalog, &store, &scope, &created.diagram_id)
        .expect("delete");
    let new_active = deleted.new_active.expect("a diagram remains");
    selection.remember(&scope, Some(&new_active));
    assert_eq!(catalog.len(), 3);
    assert_eq!(
        cache.last_active(scope.project_id()),
        Some(new_active.to_string())
    );

    // Reconcile drops the older "Order Fulfilment"; the newer one and everything else survive.
    let report = reconcile_duplicates(&store, &scope).expect("reconcile");
    assert_eq!(report.removed, 1);
    assert_eq!(report.failed, 0);

    let final_load = load_catalog(&store, &scope);
    let names: Vec<&str> = final_load
        .catalog
        .records()
        .iter()
        .map(|record| record.name())
        .collect();
    assert_eq!(names, ["Customer Onboarding", "Order Fulfilment"]);
}

#[test]
fn degraded_load_still_allows_creation() {
    let scope = Scope::new(ProjectId::generate(), UserId::generate());
    let store = MemoryDiagramStore::new();
    store.fail_next("store offline");

    let load = load_catalog(&store, &scope);
    assert!(load.degraded);
    let mut catalog = load.catalog;
    assert!(catalog.is_empty());

    let created = ops::create_diagram(&mut catalog, &store, &scope).expect("create");
    assert_eq!(created.name, "Untitled Diagram");
    assert_eq!(store.rows().len(), 1);
}
