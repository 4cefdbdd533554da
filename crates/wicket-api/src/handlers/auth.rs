// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use wicket_core::{policy, NewPrincipal};

use crate::auth::{clear_session_cookie, session_cookie};
use crate::error::{ApiError, ApiResult};
use crate::extractors::Auth;
use crate::response::{AuthResponse, PrincipalView};
use crate::state::AppState;

// =============================================================================
// Sign In
// =============================================================================

/// Sign-in request body.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// POST /api/v1/auth/signin
///
/// Authenticates by email and password, sets the session cookie, and
/// returns a bearer token.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SignInRequest>,
) -> ApiResult<impl IntoResponse> {
    // Format checks run before any store access, so malformed input never
    // costs a lookup.
    if !policy::email_is_valid(&request.email) || !policy::password_is_acceptable(&request.password)
    {
        return Err(ApiError::invalid_input("malformed email or password"));
    }

    let principal = state.principals.find_by_email(&request.email).await?;

    // Unknown email and wrong password are indistinguishable on purpose.
    let principal = match principal {
        Some(p) if p.verify_password(&request.password) => p,
        _ => return Err(ApiError::InvalidCredentials),
    };

    let issued = state.tokens.issue(principal.id.clone())?;
    let cookie = session_cookie(
        issued.token.clone(),
        &state.config.cookie,
        state.config.secure_cookies(),
    );

    tracing::info!(principal = %principal.id, "Principal signed in");

    Ok((
        jar.add(cookie),
        Json(AuthResponse::new(
            issued.token,
            state.tokens.ttl_secs(),
            PrincipalView::from(&principal),
        )),
    ))
}

// =============================================================================
// Sign Up
// =============================================================================

/// Sign-up request body.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// POST /api/v1/auth/signup
///
/// Creates a principal and signs it in. Email uniqueness and password
/// hashing are the store's responsibility.
pub async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SignUpRequest>,
) -> ApiResult<impl IntoResponse> {
    let principal = state
        .principals
        .create(NewPrincipal::customer(request.email, request.password))
        .await?;

    let issued = state.tokens.issue(principal.id.clone())?;
    let cookie = session_cookie(
        issued.token.clone(),
        &state.config.cookie,
        state.config.secure_cookies(),
    );

    tracing::info!(principal = %principal.id, "Principal signed up");

    Ok((
        StatusCode::CREATED,
        jar.add(cookie),
        Json(AuthResponse::new(
            issued.token,
            state.tokens.ttl_secs(),
            PrincipalView::from(&principal),
        )),
    ))
}

// =============================================================================
// Sign Out
// =============================================================================

/// POST /api/v1/auth/signout
///
/// Clears the session cookie. Stateless otherwise: there is no server-side
/// revocation list in this design.
pub async fn sign_out(jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(clear_session_cookie()),
        Json(serde_json::json!({ "success": true })),
    )
}

// =============================================================================
// Current Principal
// =============================================================================

/// GET /api/v1/auth/me
///
/// Returns the currently authenticated principal.
pub async fn me(Auth(user): Auth) -> Json<PrincipalView> {
    Json(PrincipalView::from(&user))
}
