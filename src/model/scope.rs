// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{ProjectId, UserId};

/// The (project, user) pair every catalog query is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    project_id: ProjectId,
    owner_user_id: UserId,
}

impl Scope {
    pub fn new(project_id: ProjectId, owner_user_id: UserId) -> Self {
        Self {
            project_id,
            owner_user_id,
        }
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn owner_user_id(&self) -> &UserId {
        &self.owner_user_id
    }
}
