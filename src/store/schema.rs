// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Versioned schema adapter for the hosted table.
//!
//! The project-scoping column has drifted across deployments (`projectId` vs `project_id`). The
//! variant is resolved once per store with a capability probe instead of re-trying every query;
//! the owner-only variant is the last resort that always exists, so schema drift degrades to
//! "everything the user owns" rather than to a hard failure.

use crate::model::Scope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    /// Original schema: camelCase `projectId` column.
    ProjectCamel,
    /// Migrated schema: snake_case `project_id` column.
    ProjectSnake,
    /// No usable project column; filter by owner only.
    OwnerOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Supported,
    Unsupported,
}

impl SchemaVariant {
    /// Probe order, newest-expected first. `OwnerOnly` is not probed; it is the fallback.
    pub const PROBED: [SchemaVariant; 2] = [SchemaVariant::ProjectCamel, SchemaVariant::ProjectSnake];

    pub fn project_column(self) -> Option<&'static str> {
        match self {
            Self::ProjectCamel => Some("projectId"),
            Self::ProjectSnake => Some("project_id"),
            Self::OwnerOnly => None,
        }
    }
}

/// Runs the probe over the candidate variants in order and returns the first supported one,
/// falling back to `OwnerOnly` when every probe fails.
pub fn resolve_variant(mut probe: impl FnMut(SchemaVariant) -> ProbeOutcome) -> SchemaVariant {
    for variant in SchemaVariant::PROBED {
        if probe(variant) == ProbeOutcome::Supported {
            return variant;
        }
    }
    SchemaVariant::OwnerOnly
}

/// Equality filters for a catalog listing under the given variant, as PostgREST query pairs.
pub fn catalog_filters(variant: SchemaVariant, scope: &Scope) -> Vec<(String, String)> {
    let mut filters = vec![(
        "owner_user_id".to_owned(),
        format!("eq.{}", scope.owner_user_id()),
    )];
    if let Some(column) = variant.project_column() {
        filters.push((column.to_owned(), format!("eq.{}", scope.project_id())));
    }
    filters
}

#[cfg(test)]
mod tests {
    use super::{catalog_filters, resolve_variant, ProbeOutcome, SchemaVariant};
    use crate::model::fixtures;

    #[test]
    fn resolve_prefers_the_camel_case_column() {
        let mut probed = Vec::new();
        let variant = resolve_variant(|candidate| {
            probed.push(candidate);
            ProbeOutcome::Supported
        });
        assert_eq!(variant, SchemaVariant::ProjectCamel);
        assert_eq!(probed, vec![SchemaVariant::ProjectCamel]);
    }

    #[test]
    fn resolve_falls_through_to_the_snake_case_column() {
        let variant = resolve_variant(|candidate| match candidate {
            SchemaVariant::ProjectSnake => ProbeOutcome::Supported,
            _ => ProbeOutcome::Unsupported,
        });
        assert_eq!(variant, SchemaVariant::ProjectSnake);
    }

    #[test]
    fn resolve_degrades_to_owner_only_when_every_probe_fails() {
        let variant = resolve_variant(|_| ProbeOutcome::Unsupported);
        assert_eq!(variant, SchemaVariant::OwnerOnly);
    }

    #[test]
    fn owner_only_filters_drop_the_project_predicate() {
        let scope = fixtures::scope();
        let filters = catalog_filters(SchemaVariant::OwnerOnly, &scope);
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].0, "owner_user_id");
        assert_eq!(filters[0].1, format!("eq.{}", scope.owner_user_id()));
    }

    #[test]
    fn project_filters_use_the_variant_column() {
        let scope = fixtures::scope();

        let camel = catalog_filters(SchemaVariant::ProjectCamel, &scope);
        assert_eq!(camel[1].0, "projectId");

        let snake = catalog_filters(SchemaVariant::ProjectSnake, &scope);
        assert_eq!(snake[1].0, "project_id");
        assert_eq!(snake[1].1, format!("eq.{}", scope.project_id()));
    }
}
