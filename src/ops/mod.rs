// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutating catalog commands.
//!
//! Every command applies its optimistic local update first, then attempts the store write. A
//! store failure reverts the optimistic update before the error is returned, so local and remote
//! state are never silently left diverged.

use std::fmt;

use crate::model::{next_untitled_name, Catalog, DiagramId, DiagramRecord, Scope};
use crate::store::{DiagramStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
    pub diagram_id: DiagramId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Where the active id landed after the delete: the first remaining entry, or none.
    pub new_active: Option<DiagramId>,
}

/// Creates a diagram with the next untitled name and the default body, appends it to the tab
/// strip, and makes it active. Creation is always explicit; nothing else calls this.
pub fn create_diagram(
    catalog: &mut Catalog,
    store: &dyn DiagramStore,
    scope: &Scope,
) -> Result<CreateOutcome, OpError> {
    let name = next_untitled_name(catalog.names());
    let record = DiagramRecord::create(*scope, name.clone());
    let diagram_id = *record.diagram_id();
    let previous_active = catalog.active_diagram_id().copied();

    catalog.push(record.clone());
    catalog.set_active_diagram_id(Some(diagram_id));

    match store.insert(&record) {
        Ok(()) => Ok(CreateOutcome { diagram_id, name }),
        Err(source) => {
            catalog.remove(&diagram_id);
            catalog.set_active_diagram_id(previous_active);
            Err(OpError::CreateRejected { name, source })
        }
    }
}

/// Update-in-place rename. The untitled-only gate is a UI affordance; the command itself renames
/// any existing diagram.
pub fn rename_diagram(
    catalog: &mut Catalog,
    store: &dyn DiagramStore,
    diagram_id: &DiagramId,
    new_name: impl Into<String>,
) -> Result<(), OpError> {
    let Some(record) = catalog.get_mut(diagram_id) else {
        return Err(OpError::NotFound {
            diagram_id: *diagram_id,
        });
    };

    let old_name = record.name().to_owned();
    let old_updated_at = record.updated_at();
    record.set_name(new_name);
    let updated = record.clone();

    match store.update(&updated) {
        Ok(()) => Ok(()),
        Err(source) => {
            if let Some(record) = catalog.get_mut(diagram_id) {
                record.set_name(old_name);
                record.set_updated_at(old_updated_at);
            }
            Err(OpError::RenameRejected {
                diagram_id: *diagram_id,
                source,
            })
        }
    }
}

/// Removes a diagram from catalog and store. The caller is responsible for having confirmed the
/// delete; the active-id transition happens here (never to a dangling id).
pub fn delete_diagram(
    catalog: &mut Catalog,
    store: &dyn DiagramStore,
    scope: &Scope,
    diagram_id: &DiagramId,
) -> Result<DeleteOutcome, OpError> {
    let previous_active = catalog.active_diagram_id().copied();
    let Some((index, removed)) = catalog.remove(diagram_id) else {
        return Err(OpError::NotFound {
            diagram_id: *diagram_id,
        });
    };

    match store.delete(scope, diagram_id) {
        Ok(()) => Ok(DeleteOutcome {
            new_active: catalog.active_diagram_id().copied(),
        }),
        Err(source) => {
            catalog.insert_at(index, removed);
            catalog.set_active_diagram_id(previous_active);
            Err(OpError::DeleteRejected {
                diagram_id: *diagram_id,
                source,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteAllOutcome {
    /// Diagrams removed from catalog and store.
    pub removed: usize,
    /// Rows whose delete failed; they stay in the catalog and the store.
    pub failed: usize,
    /// Where the active id landed: `None` when the scope is fully emptied, otherwise a
    /// surviving entry.
    pub new_active: Option<DiagramId>,
}

/// Wipes every diagram in the catalog, one row at a time in the same error-absorbing manner as
/// the duplicate pass, so one rejected delete cannot strand the rest. The caller is responsible
/// for having confirmed the wipe.
pub fn delete_all_diagrams(
    catalog: &mut Catalog,
    store: &dyn DiagramStore,
    scope: &Scope,
) -> DeleteAllOutcome {
    let diagram_ids: Vec<DiagramId> = catalog
        .records()
        .iter()
        .map(|record| *record.diagram_id())
        .collect();

    let mut outcome = DeleteAllOutcome::default();
    for diagram_id in diagram_ids {
        match store.delete(scope, &diagram_id) {
            Ok(()) => {
                catalog.remove(&diagram_id);
                outcome.removed += 1;
            }
            Err(err) => {
                log::warn!("delete-all: delete of {diagram_id} failed: {err}");
                outcome.failed += 1;
            }
        }
    }

    // A stale restored id survives `remove` (it was never a member); an emptied catalog must
    // still end up with no active id.
    if catalog.is_empty() {
        catalog.set_active_diagram_id(None);
    }
    outcome.new_active = catalog.active_diagram_id().copied();
    outcome
}

/// Persists a full-body overwrite coming back from the external editor.
pub fn save_body(
    catalog: &mut Catalog,
    store: &dyn DiagramStore,
    diagram_id: &DiagramId,
    body: impl Into<String>,
) -> Result<(), OpError> {
    let Some(record) = catalog.get_mut(diagram_id) else {
        return Err(OpError::NotFound {
            diagram_id: *diagram_id,
        });
    };

    let old_body = record.body().to_owned();
    let old_updated_at = record.updated_at();
    record.set_body(body);
    let updated = record.clone();

    match store.update(&updated) {
        Ok(()) => Ok(()),
        Err(source) => {
            if let Some(record) = catalog.get_mut(diagram_id) {
                record.set_body(old_body);
                record.set_updated_at(old_updated_at);
            }
            Err(OpError::SaveRejected {
                diagram_id: *diagram_id,
                source,
            })
        }
    }
}

#[derive(Debug)]
pub enum OpError {
    NotFound { diagram_id: DiagramId },
    CreateRejected { name: String, source: StoreError },
    RenameRejected { diagram_id: DiagramId, source: StoreError },
    DeleteRejected { diagram_id: DiagramId, source: StoreError },
    SaveRejected { diagram_id: DiagramId, source: StoreError },
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { diagram_id } => write!(f, "diagram not found (id={diagram_id})"),
            Self::CreateRejected { name, source } => {
                write!(f, "failed to create diagram {name:?}: {source}")
            }
            Self::RenameRejected { diagram_id, source } => {
                write!(f, "failed to rename diagram {diagram_id}: {source}")
            }
            Self::DeleteRejected { diagram_id, source } => {
                write!(f, "failed to delete diagram {diagram_id}: {source}")
            }
            Self::SaveRejected { diagram_id, source } => {
                write!(f, "failed to save diagram {diagram_id}: {source}")
            }
        }
    }
}

impl std::error::Error for OpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::CreateRejected { source, .. }
            | Self::RenameRejected { source, .. }
            | Self::DeleteRejected { source, .. }
            | Self::SaveRejected { source, .. } => Some(source),
        }
    }
}
