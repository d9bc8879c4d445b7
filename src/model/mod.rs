// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: typed ids, diagram records, and the in-memory catalog.

mod catalog;
mod diagram;
#[cfg(test)]
pub(crate) mod fixtures;
mod ids;
mod scope;

pub use catalog::Catalog;
pub use diagram::{
    next_untitled_name, untitled_suffix, DiagramRecord, DEFAULT_DIAGRAM_BODY, UNTITLED_NAME,
};
pub use ids::{DiagramId, Id, IdError, ProjectId, UserId};
pub use scope::Scope;
