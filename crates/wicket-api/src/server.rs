// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server implementation.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use wicket_core::Role;

use crate::auth::AccessRule;
use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::handlers;
use crate::middleware::{AuthLayer, GuardLayer};
use crate::state::{AppState, AppStateBuilder};

// =============================================================================
// ApiServer
// =============================================================================

/// The API server.
///
/// This is the main entry point for creating and running the HTTP server.
pub struct ApiServer {
    state: AppState,
    config: Arc<ApiConfig>,
}

impl ApiServer {
    /// Creates a new API server with the given state.
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        Self { state, config }
    }

    /// Creates the router with all routes and middleware.
    ///
    /// Each guarded route declares its rule chain here, once, at
    /// registration time; the chain never changes per request.
    pub fn router(&self) -> Router {
        let auth = AuthLayer::new(self.state.authenticator()).with_default_public_paths();
        let gatekeeper = self.state.gatekeeper();
        let max_body_size = self.config.max_body_size;

        let guard = |rules: Vec<AccessRule>| {
            GuardLayer::new(gatekeeper.clone(), rules).with_max_body_size(max_body_size)
        };

        Router::new()
            // Health endpoints (public)
            .route("/health", get(handlers::health))
            .route("/ready", get(handlers::ready))
            // Auth endpoints
            .route("/api/v1/auth/signin", post(handlers::sign_in))
            .route("/api/v1/auth/signup", post(handlers::sign_up))
            .route("/api/v1/auth/signout", post(handlers::sign_out))
            .route("/api/v1/auth/me", get(handlers::me))
            // Principal endpoints
            .route(
                "/api/v1/users/{id}",
                get(handlers::get_user).route_layer(guard(vec![
                    AccessRule::RoleIs(vec![Role::Admin]),
                    AccessRule::SelfUser,
                ])),
            )
            // Ticket endpoints
            .route(
                "/api/v1/tickets",
                get(handlers::list_tickets).route_layer(guard(vec![
                    AccessRule::RoleIs(vec![Role::Agent, Role::Admin]),
                    AccessRule::SelfUserTickets,
                ])),
            )
            .route(
                "/api/v1/tickets/{id}",
                get(handlers::get_ticket).route_layer(guard(vec![
                    AccessRule::RoleIs(vec![Role::Agent, Role::Admin]),
                    AccessRule::SelfUserTicket,
                ])),
            )
            // Answer endpoints
            .route(
                "/api/v1/answers/query",
                post(handlers::query_answers).route_layer(guard(vec![
                    AccessRule::RoleIs(vec![Role::Agent, Role::Admin]),
                    AccessRule::SelfTicketTicketAnswers,
                ])),
            )
            .route(
                "/api/v1/answers",
                post(handlers::create_answer).route_layer(guard(vec![
                    AccessRule::RoleIs(vec![Role::Agent, Role::Admin]),
                    AccessRule::SelfTicketAnswer,
                ])),
            )
            .route(
                "/api/v1/answers/{id}",
                get(handlers::get_answer).route_layer(guard(vec![
                    AccessRule::RoleIs(vec![Role::Agent, Role::Admin]),
                    AccessRule::SelfTicketTicketAnswer,
                ])),
            )
            // Apply middleware and state
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(self.config.request_timeout))
                    .layer(auth),
            )
            .with_state(self.state.clone())
    }

    /// Runs the server.
    pub async fn run(self) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let router = self.router();

        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| crate::error::ApiError::internal(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| crate::error::ApiError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Runs the server with graceful shutdown.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let router = self.router();

        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| crate::error::ApiError::internal(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| crate::error::ApiError::internal(format!("Server error: {}", e)))?;

        info!("API server shutdown complete");

        Ok(())
    }

    /// Returns the server address.
    pub fn addr(&self) -> std::net::SocketAddr {
        self.config.socket_addr()
    }
}

// =============================================================================
// Server Builder
// =============================================================================

/// Builder for creating the API server.
pub struct ApiServerBuilder {
    state_builder: AppStateBuilder,
}

impl ApiServerBuilder {
    /// Creates a new server builder.
    pub fn new() -> Self {
        Self {
            state_builder: AppState::builder(),
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.state_builder = self.state_builder.config(config);
        self
    }

    /// Wires all stores to one shared in-memory store.
    pub fn memory_store(mut self, store: Arc<wicket_core::MemoryStore>) -> Self {
        self.state_builder = self.state_builder.memory_store(store);
        self
    }

    /// Builds the server.
    pub fn build(self) -> ApiResult<ApiServer> {
        let state = self.state_builder.build()?;
        Ok(ApiServer::new(state))
    }
}

impl Default for ApiServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
