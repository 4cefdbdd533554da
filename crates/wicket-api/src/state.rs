// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use wicket_core::{MemoryStore, PrincipalStore, TicketAnswerStore, TicketStore};

use crate::auth::{Gatekeeper, SessionAuthenticator, TokenService};
use crate::config::ApiConfig;
use crate::error::ApiResult;

// =============================================================================
// AppState
// =============================================================================

/// Application state shared across all handlers.
///
/// Passed to handlers via axum's state extraction mechanism.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Token service for issuing and verifying credentials.
    pub tokens: Arc<TokenService>,
    /// Principal store.
    pub principals: Arc<dyn PrincipalStore>,
    /// Ticket store.
    pub tickets: Arc<dyn TicketStore>,
    /// Ticket answer store.
    pub answers: Arc<dyn TicketAnswerStore>,
}

impl AppState {
    /// Creates a new app state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Returns the token service.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Builds the session authenticator over this state's collaborators.
    pub fn authenticator(&self) -> SessionAuthenticator {
        SessionAuthenticator::new(self.tokens.clone(), self.principals.clone())
    }

    /// Builds the gatekeeper over this state's collaborators.
    pub fn gatekeeper(&self) -> Gatekeeper {
        Gatekeeper::new(self.tickets.clone(), self.answers.clone())
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing [`AppState`].
pub struct AppStateBuilder {
    config: Option<ApiConfig>,
    tokens: Option<Arc<TokenService>>,
    principals: Option<Arc<dyn PrincipalStore>>,
    tickets: Option<Arc<dyn TicketStore>>,
    answers: Option<Arc<dyn TicketAnswerStore>>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            tokens: None,
            principals: None,
            tickets: None,
            answers: None,
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the token service.
    pub fn tokens(mut self, tokens: Arc<TokenService>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Sets the principal store.
    pub fn principals(mut self, principals: Arc<dyn PrincipalStore>) -> Self {
        self.principals = Some(principals);
        self
    }

    /// Sets the ticket store.
    pub fn tickets(mut self, tickets: Arc<dyn TicketStore>) -> Self {
        self.tickets = Some(tickets);
        self
    }

    /// Sets the answer store.
    pub fn answers(mut self, answers: Arc<dyn TicketAnswerStore>) -> Self {
        self.answers = Some(answers);
        self
    }

    /// Wires all three stores to one shared in-memory store.
    pub fn memory_store(mut self, store: Arc<MemoryStore>) -> Self {
        self.principals = Some(store.clone());
        self.tickets = Some(store.clone());
        self.answers = Some(store);
        self
    }

    /// Builds the state.
    ///
    /// Missing stores default to a fresh shared [`MemoryStore`]; a missing
    /// token service is built from the configuration.
    pub fn build(self) -> ApiResult<AppState> {
        let config = self.config.unwrap_or_default();

        let tokens = match self.tokens {
            Some(tokens) => tokens,
            None => Arc::new(TokenService::new(config.token.clone())?),
        };

        let fallback = Arc::new(MemoryStore::new());
        let principals: Arc<dyn PrincipalStore> = match self.principals {
            Some(p) => p,
            None => fallback.clone(),
        };
        let tickets: Arc<dyn TicketStore> = match self.tickets {
            Some(t) => t,
            None => fallback.clone(),
        };
        let answers: Arc<dyn TicketAnswerStore> = match self.answers {
            Some(a) => a,
            None => fallback,
        };

        Ok(AppState {
            config: Arc::new(config),
            tokens,
            principals,
            tickets,
            answers,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
