// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session authentication.
//!
//! Verifies the bearer credential on an incoming request and resolves it to
//! a principal, rejecting credentials issued before the principal's last
//! password change.

use std::sync::Arc;

use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::CookieJar;
use thiserror::Error;
use wicket_core::{Principal, PrincipalStore, StoreError};

use super::token::{TokenService, SESSION_COOKIE};
use crate::error::ApiError;

// =============================================================================
// AuthError
// =============================================================================

/// Session authentication failure kinds.
///
/// Distinguished internally for diagnostics and tests; at the HTTP boundary
/// every kind except `StoreUnavailable` collapses into one generic 401.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential in either the Authorization header or the session
    /// cookie.
    #[error("no credential provided")]
    MissingCredential,

    /// The credential is malformed, carries a bad signature, or has
    /// expired.
    #[error("invalid credential: {reason}")]
    InvalidCredential {
        /// The underlying verification failure, for logging only.
        reason: String,
    },

    /// The credential's subject no longer resolves to a principal.
    #[error("principal not found")]
    PrincipalNotFound,

    /// The credential was issued at or before the principal's last password
    /// change.
    #[error("credential predates password change")]
    StaleCredential,

    /// The principal store could not be reached.
    #[error("principal store unavailable")]
    StoreUnavailable(#[source] StoreError),
}

impl AuthError {
    /// Returns a short kind tag for logging and tests.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::InvalidCredential { .. } => "invalid_credential",
            AuthError::PrincipalNotFound => "principal_not_found",
            AuthError::StaleCredential => "stale_credential",
            AuthError::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::StoreUnavailable(source) => {
                ApiError::service_unavailable(source.to_string())
            }
            // One generic unauthorized outcome for every credential failure.
            other => ApiError::unauthorized(other.to_string()),
        }
    }
}

// =============================================================================
// SessionAuthenticator
// =============================================================================

/// Authenticates requests from their bearer credential.
#[derive(Clone)]
pub struct SessionAuthenticator {
    tokens: Arc<TokenService>,
    principals: Arc<dyn PrincipalStore>,
}

impl SessionAuthenticator {
    /// Creates a new authenticator.
    pub fn new(tokens: Arc<TokenService>, principals: Arc<dyn PrincipalStore>) -> Self {
        Self { tokens, principals }
    }

    /// Extracts the raw credential from request headers.
    ///
    /// The `Authorization: Bearer` header wins over the session cookie.
    pub fn extract_credential(headers: &HeaderMap) -> Option<String> {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer ").map(|s| s.to_string()));

        if bearer.is_some() {
            return bearer;
        }

        CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }

    /// Authenticates a request, resolving its credential to a principal.
    ///
    /// Each step runs to completion before the next; there is no concurrent
    /// fan-out and no write anywhere, so an aborted request abandons the
    /// lookup without side effects.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthError> {
        let raw = Self::extract_credential(headers).ok_or(AuthError::MissingCredential)?;

        let claims = self.tokens.verify(&raw)?;

        let principal = self
            .principals
            .find_by_id(&claims.sub)
            .await
            .map_err(AuthError::StoreUnavailable)?
            .ok_or(AuthError::PrincipalNotFound)?;

        if principal.password_changed_after(claims.iat) {
            return Err(AuthError::StaleCredential);
        }

        Ok(principal)
    }
}

impl std::fmt::Debug for SessionAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthenticator").finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
