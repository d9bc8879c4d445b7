// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{Duration, Utc};

use super::diagram::{DiagramRecord, DEFAULT_DIAGRAM_BODY};
use super::ids::{ProjectId, UserId};
use super::scope::Scope;

pub(crate) fn scope() -> Scope {
    Scope::new(ProjectId::generate(), UserId::generate())
}

/// A record last updated `minutes_ago` minutes in the past, so recency ordering is controllable.
pub(crate) fn record(scope: &Scope, name: &str, minutes_ago: i64) -> DiagramRecord {
    DiagramRecord::new(
        super::ids::DiagramId::generate(),
        *scope,
        name,
        DEFAULT_DIAGRAM_BODY,
        None,
        Utc::now() - Duration::minutes(minutes_ago),
    )
}
