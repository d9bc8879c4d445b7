// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Duplicate-name reconciliation.
//!
//! An explicit, user-confirmed maintenance pass, never run automatically. Within each group of
//! same-named diagrams the most recently updated one survives; only the losers are deleted, one
//! row at a time, so a partial failure can leave duplicates behind but can never lose a survivor.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::{DiagramId, DiagramRecord, Scope};
use crate::store::{DiagramStore, StoreError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Diagrams actually deleted from the store.
    pub removed: usize,
    /// Losers whose delete failed; they remain as duplicates for a later run.
    pub failed: usize,
}

/// The ids that would be deleted: every member of a same-named group except the one with the
/// latest `updated_at` (ties broken by id so the plan is deterministic).
pub fn duplicate_losers(records: &[DiagramRecord]) -> Vec<DiagramId> {
    let mut groups: BTreeMap<&str, Vec<&DiagramRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.name()).or_default().push(record);
    }

    let mut losers = Vec::new();
    for members in groups.values() {
        if members.len() < 2 {
            continue;
        }
        let survivor = members
            .iter()
            .max_by_key(|record| (record.updated_at(), *record.diagram_id()))
            .map(|record| *record.diagram_id())
            .expect("group has at least two members");
        losers.extend(
            members
                .iter()
                .map(|record| *record.diagram_id())
                .filter(|diagram_id| *diagram_id != survivor),
        );
    }
    losers
}

pub fn reconcile_duplicates(
    store: &dyn DiagramStore,
    scope: &Scope,
) -> Result<ReconcileReport, ReconcileError> {
    let records = store
        .list(scope)
        .map_err(|source| ReconcileError::Load { source })?;

    let mut report = ReconcileReport::default();
    for diagram_id in duplicate_losers(&records) {
        match store.delete(scope, &diagram_id) {
            Ok(()) => report.removed += 1,
            Err(err) => {
                log::warn!("reconcile: delete of duplicate {diagram_id} failed: {err}");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

#[derive(Debug)]
pub enum ReconcileError {
    Load { source: StoreError },
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { source } => write!(f, "cannot load diagrams for reconciliation: {source}"),
        }
    }
}

impl std::error::Error for ReconcileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load { source } => Some(source),
        }
    }
}
