// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::ids::DiagramId;
use super::scope::Scope;

/// Name given to a freshly created diagram before the user picks one.
pub const UNTITLED_NAME: &str = "Untitled Diagram";

/// Body written for a freshly created diagram: one empty, non-executable process.
pub const DEFAULT_DIAGRAM_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bpmn:definitions xmlns:bpmn="http://www.omg.org/spec/BPMN/20100524/MODEL" xmlns:bpmndi="http://www.omg.org/spec/BPMN/20100524/DI" id="Definitions_1" targetNamespace="http://bpmn.io/schema/bpmn">
  <bpmn:process id="Process_1" isExecutable="false"/>
  <bpmndi:BPMNDiagram id="BPMNDiagram_1">
    <bpmndi:BPMNPlane id="BPMNPlane_1" bpmnElement="Process_1"/>
  </bpmndi:BPMNDiagram>
</bpmn:definitions>
"#;

/// A single row of the hosted `process_diagrams` table, mirrored locally.
///
/// The body is opaque to Proteus; it is fed to the external editor and written back whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramRecord {
    diagram_id: DiagramId,
    scope: Scope,
    name: String,
    body: String,
    preview: Option<String>,
    updated_at: DateTime<Utc>,
}

impl DiagramRecord {
    pub fn new(
        diagram_id: DiagramId,
        scope: Scope,
        name: impl Into<String>,
        body: impl Into<String>,
        preview: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            diagram_id,
            scope,
            name: name.into(),
            body: body.into(),
            preview,
            updated_at,
        }
    }

    /// A brand-new untitled-style record with a generated id and the default body.
    pub fn create(scope: Scope, name: impl Into<String>) -> Self {
        Self::new(
            DiagramId::generate(),
            scope,
            name,
            DEFAULT_DIAGRAM_BODY,
            None,
            Utc::now(),
        )
    }

    pub fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Full-body overwrite; partial edits are never applied.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.updated_at = Utc::now();
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn set_preview(&mut self, preview: Option<String>) {
        self.preview = preview;
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }

    /// Whether the name is still auto-generated, i.e. eligible for quick rename.
    pub fn is_untitled(&self) -> bool {
        untitled_suffix(&self.name).is_some()
    }
}

fn untitled_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^Untitled Diagram(?: ([1-9][0-9]*))?$").expect("untitled name pattern")
    })
}

/// The numeric rank of an auto-generated name: bare `Untitled Diagram` is 1, `Untitled Diagram N`
/// is N. Returns `None` for user-curated names.
pub fn untitled_suffix(name: &str) -> Option<u32> {
    let captures = untitled_pattern().captures(name)?;
    match captures.get(1) {
        Some(suffix) => suffix.as_str().parse().ok(),
        None => Some(1),
    }
}

/// Picks the default name for the next created diagram: `Untitled Diagram` when the catalog has
/// no auto-generated names, otherwise one past the highest existing suffix (so the second
/// untitled diagram is `Untitled Diagram 2`).
pub fn next_untitled_name<'a>(existing_names: impl Iterator<Item = &'a str>) -> String {
    let highest = existing_names.filter_map(untitled_suffix).max();
    match highest {
        None => UNTITLED_NAME.to_owned(),
        Some(n) => format!("{UNTITLED_NAME} {}", n.saturating_add(1)),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{next_untitled_name, untitled_suffix, DiagramRecord, UNTITLED_NAME};
    use crate::model::fixtures;

    #[rstest]
    #[case("Untitled Diagram", Some(1))]
    #[case("Untitled Diagram 2", Some(2))]
    #[case("Untitled Diagram 37", Some(37))]
    #[case("Untitled Diagram 0", None)]
    #[case("Untitled Diagram  3", None)]
    #[case("untitled diagram", None)]
    #[case("Order Fulfilment", None)]
    #[case("Untitled Diagramme", None)]
    fn untitled_suffix_matches_only_generated_names(
        #[case] name: &str,
        #[case] expected: Option<u32>,
    ) {
        assert_eq!(untitled_suffix(name), expected);
    }

    #[test]
    fn next_untitled_name_without_untitled_entries_has_no_suffix() {
        let names = ["Order Fulfilment", "Customer Onboarding"];
        assert_eq!(next_untitled_name(names.into_iter()), UNTITLED_NAME);
    }

    #[test]
    fn next_untitled_name_counts_past_the_highest_suffix() {
        let names = ["Untitled Diagram", "Untitled Diagram 3"];
        assert_eq!(next_untitled_name(names.into_iter()), "Untitled Diagram 4");
    }

    #[test]
    fn second_untitled_diagram_is_numbered_two() {
        let names = ["Untitled Diagram"];
        assert_eq!(next_untitled_name(names.into_iter()), "Untitled Diagram 2");
    }

    #[test]
    fn gaps_in_numbering_are_not_reused() {
        let names = ["Untitled Diagram 5"];
        assert_eq!(next_untitled_name(names.into_iter()), "Untitled Diagram 6");
    }

    #[test]
    fn create_uses_default_body_and_no_preview() {
        let scope = fixtures::scope();
        let record = DiagramRecord::create(scope, UNTITLED_NAME);
        assert!(record.is_untitled());
        assert!(record.body().contains("bpmn:definitions"));
        assert_eq!(record.preview(), None);
    }

    #[test]
    fn set_body_advances_updated_at() {
        let scope = fixtures::scope();
        let mut record = fixtures::record(&scope, "X", 60);
        let before = record.updated_at();
        record.set_body("<xml/>");
        assert!(record.updated_at() > before);
    }
}
