// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # wicket-api
//!
//! HTTP API server for the wicket help-desk auth service.
//!
//! This crate provides the axum server with JWT session authentication,
//! rule-chain route guarding, and the sign-in/sign-up/sign-out endpoints.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;
pub mod state;

pub use auth::{
    AccessRule, AuthError, Claims, CurrentUser, Gatekeeper, OwnerScope, RequestContext,
    SessionAuthenticator, TokenConfig, TokenService, Verdict,
};
pub use config::{ApiConfig, CookieConfig, DeploymentMode};
pub use error::{ApiError, ApiResult};
pub use response::{AuthResponse, PrincipalView};
pub use server::{ApiServer, ApiServerBuilder};
pub use state::{AppState, AppStateBuilder};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
