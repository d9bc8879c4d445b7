// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Mutex;

use super::{DiagramStore, StoreError};
use crate::model::{DiagramId, DiagramRecord, Scope};

/// In-process store used by tests, benches, and `--demo` mode.
///
/// `fail_next` arms a one-shot failure so callers can exercise their rollback paths.
#[derive(Debug, Default)]
pub struct MemoryDiagramStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<DiagramRecord>,
    fail_next: Option<String>,
    fail_next_delete: Option<String>,
}

impl MemoryDiagramStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, record: DiagramRecord) {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        inner.rows.push(record);
    }

    /// The next store call, whatever it is, fails with `Unavailable`.
    pub fn fail_next(&self, reason: impl Into<String>) {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        inner.fail_next = Some(reason.into());
    }

    /// Only the next `delete` fails; other calls proceed.
    pub fn fail_next_delete(&self, reason: impl Into<String>) {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        inner.fail_next_delete = Some(reason.into());
    }

    /// Snapshot of every row, unordered, for assertions.
    pub fn rows(&self) -> Vec<DiagramRecord> {
        let inner = self.inner.lock().expect("memory store lock poisoned");
        inner.rows.clone()
    }

    fn take_failure(inner: &mut Inner) -> Result<(), StoreError> {
        match inner.fail_next.take() {
            Some(reason) => Err(StoreError::Unavailable { reason }),
            None => Ok(()),
        }
    }
}

impl DiagramStore for MemoryDiagramStore {
    fn list(&self, scope: &Scope) -> Result<Vec<DiagramRecord>, StoreError> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        Self::take_failure(&mut inner)?;

        let mut rows: Vec<DiagramRecord> = inner
            .rows
            .iter()
            .filter(|row| row.scope().owner_user_id() == scope.owner_user_id())
            .filter(|row| row.scope().project_id() == scope.project_id())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        Ok(rows)
    }

    fn insert(&self, record: &DiagramRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        Self::take_failure(&mut inner)?;
        inner.rows.push(record.clone());
        Ok(())
    }

    fn update(&self, record: &DiagramRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        Self::take_failure(&mut inner)?;

        let Some(row) = inner
            .rows
            .iter_mut()
            .find(|row| row.diagram_id() == record.diagram_id())
        else {
            return Err(StoreError::NotFound {
                diagram_id: *record.diagram_id(),
            });
        };
        *row = record.clone();
        Ok(())
    }

    fn delete(&self, _scope: &Scope, diagram_id: &DiagramId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        Self::take_failure(&mut inner)?;
        if let Some(reason) = inner.fail_next_delete.take() {
            return Err(StoreError::Unavailable { reason });
        }
        inner.rows.retain(|row| row.diagram_id() != diagram_id);
        Ok(())
    }
}
