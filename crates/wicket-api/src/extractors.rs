// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Custom extractors for API handlers.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, OwnerScope};
use crate::error::ApiError;

// =============================================================================
// Auth Extractor
// =============================================================================

/// Extractor for authenticated requests.
///
/// Extracts the [`CurrentUser`] the authentication middleware attached.
/// Returns 401 if the request never passed authentication.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Auth(user): Auth) -> impl IntoResponse {
///     format!("Hello, {}", user.email)
/// }
/// ```
pub struct Auth(pub CurrentUser);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(Auth)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

// =============================================================================
// Scope Extractor
// =============================================================================

/// Extractor for the owner scope a guard may have attached.
///
/// `None` means the grant was unscoped (e.g. an agent listing everything);
/// `Some` constrains the handler's query to one owner's records.
pub struct Scope(pub Option<OwnerScope>);

impl<S> FromRequestParts<S> for Scope
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Scope(parts.extensions.get::<OwnerScope>().cloned()))
    }
}

// =============================================================================
// Tests
// =============================================================================
