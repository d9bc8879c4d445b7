// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence against the hosted diagram table.
//!
//! The store is consumed, not implemented: `RestDiagramStore` speaks PostgREST-style HTTP to the
//! hosted table, `MemoryDiagramStore` backs tests and demo mode. Every call is a blocking
//! request/response awaited sequentially by the caller; there is no queueing and no retry.

use std::fmt;

use crate::model::{Catalog, DiagramId, DiagramRecord, IdError, Scope};

pub mod memory;
pub mod rest;
pub mod schema;

pub use memory::MemoryDiagramStore;
pub use rest::RestDiagramStore;
pub use schema::{ProbeOutcome, SchemaVariant};

pub trait DiagramStore {
    /// All diagrams for the scope, most-recently-updated first. The resolved schema variant
    /// decides whether the project filter applies or the listing is owner-only.
    fn list(&self, scope: &Scope) -> Result<Vec<DiagramRecord>, StoreError>;

    fn insert(&self, record: &DiagramRecord) -> Result<(), StoreError>;

    /// Full-row overwrite of name, body, preview, and `updated_at`.
    fn update(&self, record: &DiagramRecord) -> Result<(), StoreError>;

    /// Deleting an id that is already gone is not an error.
    fn delete(&self, scope: &Scope, diagram_id: &DiagramId) -> Result<(), StoreError>;
}

/// Result of a catalog load. A failed load degrades to an empty catalog instead of propagating,
/// so a load error never blocks creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub degraded: bool,
}

pub fn load_catalog(store: &dyn DiagramStore, scope: &Scope) -> CatalogLoad {
    match store.list(scope) {
        Ok(records) => CatalogLoad {
            catalog: Catalog::from_records(records),
            degraded: false,
        },
        Err(err) => {
            log::warn!("catalog load failed for project {}: {err}", scope.project_id());
            CatalogLoad {
                catalog: Catalog::default(),
                degraded: true,
            }
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    Transport {
        url: String,
        source: Box<reqwest::Error>,
    },
    Status {
        url: String,
        status: u16,
        body: String,
    },
    Json {
        context: &'static str,
        source: serde_json::Error,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: IdError,
    },
    NotFound {
        diagram_id: DiagramId,
    },
    Unavailable {
        reason: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { url, source } => write!(f, "transport error for {url}: {source}"),
            Self::Status { url, status, body } => {
                write!(f, "store rejected request to {url} ({status}): {body}")
            }
            Self::Json { context, source } => write!(f, "json error in {context}: {source}"),
            Self::InvalidId {
                field,
                value,
                source,
            } => write!(f, "invalid id for {field}: {value:?}: {source}"),
            Self::NotFound { diagram_id } => write!(f, "diagram not found (id={diagram_id})"),
            Self::Unavailable { reason } => write!(f, "store unavailable: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source.as_ref()),
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            Self::Status { .. } | Self::NotFound { .. } | Self::Unavailable { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{load_catalog, MemoryDiagramStore};
    use crate::model::fixtures;

    #[test]
    fn load_catalog_orders_by_recency() {
        let scope = fixtures::scope();
        let store = MemoryDiagramStore::new();
        store.seed(fixtures::record(&scope, "Old", 120));
        store.seed(fixtures::record(&scope, "Fresh", 1));

        let load = load_catalog(&store, &scope);

        assert!(!load.degraded);
        assert_eq!(load.catalog.records()[0].name(), "Fresh");
    }

    #[test]
    fn load_catalog_degrades_to_empty_instead_of_erroring() {
        let scope = fixtures::scope();
        let store = MemoryDiagramStore::new();
        store.seed(fixtures::record(&scope, "X", 10));
        store.fail_next("store offline");

        let load = load_catalog(&store, &scope);

        assert!(load.degraded);
        assert!(load.catalog.is_empty());
    }
}
