// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authenticated request context.

use serde::{Deserialize, Serialize};
use wicket_core::{Principal, PrincipalId, Role};

/// The authenticated principal attached to a request.
///
/// Inserted into request extensions by the authentication middleware after
/// a successful [`super::SessionAuthenticator::authenticate`]; the
/// gatekeeper and handlers read it from there. Absence means the request
/// never passed authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Canonical principal identity.
    pub id: PrincipalId,
    /// Email address.
    pub email: String,
    /// Assigned role.
    pub role: Role,
}

impl CurrentUser {
    /// Returns `true` if the principal holds one of the given roles.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

impl From<&Principal> for CurrentUser {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id.clone(),
            email: principal.email.clone(),
            role: principal.role,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
