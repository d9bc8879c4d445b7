// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::diagram::DiagramRecord;
use super::ids::DiagramId;

/// The in-memory diagram list for the current scope, in tab order, plus the active id.
///
/// Loaded records arrive most-recently-updated first; created records are appended at the end.
/// The active id normally references a member, with one exception: a just-restored cached id is
/// used before any load completes and may reference a deleted diagram (the body view handles the
/// miss).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<DiagramRecord>,
    active_diagram_id: Option<DiagramId>,
}

impl Catalog {
    /// Builds a catalog in recency order. No name deduplication happens here; duplicates show up
    /// as separate tabs until the reconciler runs.
    pub fn from_records(mut records: Vec<DiagramRecord>) -> Self {
        records.sort_by(|a, b| {
            b.updated_at()
                .cmp(&a.updated_at())
                .then_with(|| a.diagram_id().cmp(b.diagram_id()))
        });
        Self {
            records,
            active_diagram_id: None,
        }
    }

    pub fn records(&self) -> &[DiagramRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, diagram_id: &DiagramId) -> Option<&DiagramRecord> {
        self.records
            .iter()
            .find(|record| record.diagram_id() == diagram_id)
    }

    pub fn get_mut(&mut self, diagram_id: &DiagramId) -> Option<&mut DiagramRecord> {
        self.records
            .iter_mut()
            .find(|record| record.diagram_id() == diagram_id)
    }

    pub fn position(&self, diagram_id: &DiagramId) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.diagram_id() == diagram_id)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(DiagramRecord::name)
    }

    pub fn active_diagram_id(&self) -> Option<&DiagramId> {
        self.active_diagram_id.as_ref()
    }

    pub fn active_record(&self) -> Option<&DiagramRecord> {
        self.active_diagram_id
            .as_ref()
            .and_then(|active| self.get(active))
    }

    pub fn set_active_diagram_id(&mut self, diagram_id: Option<DiagramId>) {
        self.active_diagram_id = diagram_id;
    }

    /// Appends a record at the end of the tab strip.
    pub fn push(&mut self, record: DiagramRecord) {
        self.records.push(record);
    }

    /// Reinserts a record at a given position (rollback of a failed delete).
    pub fn insert_at(&mut self, index: usize, record: DiagramRecord) {
        let index = index.min(self.records.len());
        self.records.insert(index, record);
    }

    /// Removes a record and transitions the active id: removing the active diagram activates the
    /// first remaining entry (or none when the catalog empties); removing any other diagram
    /// leaves the active id untouched. Returns the position and record for rollback.
    pub fn remove(&mut self, diagram_id: &DiagramId) -> Option<(usize, DiagramRecord)> {
        let index = self.position(diagram_id)?;
        let removed = self.records.remove(index);

        if self.active_diagram_id.as_ref() == Some(diagram_id) {
            self.active_diagram_id = self.records.first().map(|record| *record.diagram_id());
        }

        Some((index, removed))
    }

    /// The id one tab to the right of the active one, wrapping past the end. With no active id,
    /// the first tab.
    pub fn next_id(&self) -> Option<DiagramId> {
        if self.records.is_empty() {
            return None;
        }
        let next_index = match self.active_position() {
            Some(index) => (index + 1) % self.records.len(),
            None => 0,
        };
        Some(*self.records[next_index].diagram_id())
    }

    /// The id one tab to the left of the active one, wrapping past the start. With no active id,
    /// the last tab.
    pub fn prev_id(&self) -> Option<DiagramId> {
        if self.records.is_empty() {
            return None;
        }
        let prev_index = match self.active_position() {
            Some(0) | None => self.records.len() - 1,
            Some(index) => index - 1,
        };
        Some(*self.records[prev_index].diagram_id())
    }

    fn active_position(&self) -> Option<usize> {
        self.active_diagram_id
            .as_ref()
            .and_then(|active| self.position(active))
    }
}

#[cfg(test)]
mod tests {
    use super::Catalog;
    use crate::model::fixtures;

    #[test]
    fn from_records_orders_most_recently_updated_first() {
        let scope = fixtures::scope();
        let old = fixtures::record(&scope, "Old", 120);
        let fresh = fixtures::record(&scope, "Fresh", 5);
        let catalog = Catalog::from_records(vec![old.clone(), fresh.clone()]);

        assert_eq!(catalog.records()[0].name(), "Fresh");
        assert_eq!(catalog.records()[1].name(), "Old");
    }

    #[test]
    fn duplicate_names_stay_as_separate_entries() {
        let scope = fixtures::scope();
        let a = fixtures::record(&scope, "X", 10);
        let b = fixtures::record(&scope, "X", 20);
        let catalog = Catalog::from_records(vec![a, b]);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn removing_the_active_record_activates_the_first_remaining() {
        let scope = fixtures::scope();
        let catalog_records: Vec<_> = ["A", "B", "C"]
            .iter()
            .enumerate()
            .map(|(i, name)| fixtures::record(&scope, name, (i as i64 + 1) * 10))
            .collect();
        let mut catalog = Catalog::from_records(catalog_records);
        let second = *catalog.records()[1].diagram_id();
        let first = *catalog.records()[0].diagram_id();
        catalog.set_active_diagram_id(Some(second));

        catalog.remove(&second).expect("remove active");

        assert_eq!(catalog.active_diagram_id(), Some(&first));
    }

    #[test]
    fn removing_a_non_active_record_keeps_the_active_id() {
        let scope = fixtures::scope();
        let a = fixtures::record(&scope, "A", 10);
        let b = fixtures::record(&scope, "B", 20);
        let active = *a.diagram_id();
        let other = *b.diagram_id();
        let mut catalog = Catalog::from_records(vec![a, b]);
        catalog.set_active_diagram_id(Some(active));

        catalog.remove(&other).expect("remove other");

        assert_eq!(catalog.active_diagram_id(), Some(&active));
    }

    #[test]
    fn removing_the_only_record_clears_the_active_id() {
        let scope = fixtures::scope();
        let only = fixtures::record(&scope, "Solo", 10);
        let id = *only.diagram_id();
        let mut catalog = Catalog::from_records(vec![only]);
        catalog.set_active_diagram_id(Some(id));

        catalog.remove(&id).expect("remove only");

        assert_eq!(catalog.active_diagram_id(), None);
        assert!(catalog.is_empty());
    }

    #[test]
    fn cycling_wraps_at_both_ends() {
        let scope = fixtures::scope();
        let records: Vec<_> = ["A", "B", "C"]
            .iter()
            .enumerate()
            .map(|(i, name)| fixtures::record(&scope, name, (i as i64 + 1) * 10))
            .collect();
        let mut catalog = Catalog::from_records(records);
        let first = *catalog.records()[0].diagram_id();
        let last = *catalog.records()[2].diagram_id();

        catalog.set_active_diagram_id(Some(last));
        assert_eq!(catalog.next_id(), Some(first));

        catalog.set_active_diagram_id(Some(first));
        assert_eq!(catalog.prev_id(), Some(last));
    }

    #[test]
    fn cycling_an_empty_catalog_yields_none() {
        let catalog = Catalog::default();
        assert_eq!(catalog.next_id(), None);
        assert_eq!(catalog.prev_id(), None);
    }
}
