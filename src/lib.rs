// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus — terminal workbench for hosted process-diagram catalogs.
//!
//! The catalog (diagram list + active id) is the only local state; persistence is a hosted
//! PostgREST-style table consumed through the `store` module.

pub mod cache;
pub mod model;
pub mod ops;
pub mod reconcile;
pub mod select;
pub mod store;
pub mod tui;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
