// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API response types.

use serde::{Deserialize, Serialize};
use wicket_core::{Principal, PrincipalId, Role};

use crate::auth::CurrentUser;

// =============================================================================
// PrincipalView
// =============================================================================

/// The externally visible shape of a principal.
///
/// Built from domain types that never serialize the password hash; this
/// view exists so handlers cannot accidentally widen what leaves the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalView {
    /// Principal id.
    pub id: PrincipalId,
    /// Email address.
    pub email: String,
    /// Assigned role.
    pub role: Role,
}

impl From<&Principal> for PrincipalView {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id.clone(),
            email: principal.email.clone(),
            role: principal.role,
        }
    }
}

impl From<&CurrentUser> for PrincipalView {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

// =============================================================================
// AuthResponse
// =============================================================================

/// Response to a successful sign-in or sign-up.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Access token.
    pub token: String,
    /// Token type (always "Bearer").
    pub token_type: String,
    /// Expires in seconds.
    pub expires_in: i64,
    /// The signed-in principal.
    pub user: PrincipalView,
}

impl AuthResponse {
    /// Creates a new auth response.
    pub fn new(token: String, expires_in: i64, user: PrincipalView) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// =============================================================================
// Typed Responses
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Version string.
    pub version: String,
}

impl HealthResponse {
    /// Creates a healthy response.
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            version: crate::VERSION.to_string(),
        }
    }
}

/// Readiness check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Whether the service is ready.
    pub ready: bool,
}

// =============================================================================
// Tests
// =============================================================================
