// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Test fixtures: seeded stores, token services and routers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use chrono::Utc;

use wicket_api::{ApiConfig, ApiServer, AppState, TokenConfig, TokenService};
use wicket_core::{
    MemoryStore, NewPrincipal, Principal, PrincipalId, PrincipalStore, Role, StoreResult, Ticket,
    TicketAnswer, TicketId,
};

/// Signing secret shared by every fixture.
pub const TEST_SECRET: &str = "test-secret-key-for-token-signing-at-least-32-chars";

/// Demo password satisfying the complexity policy.
pub const TEST_PASSWORD: &str = "Secret123!";

/// Creates a token service over [`TEST_SECRET`].
pub fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(TokenConfig::new(TEST_SECRET)).expect("token service"))
}

/// Creates a store seeded with the standard cast:
///
/// - `u1`, `u2`: customers, each owning one ticket (`t1`, `t2`)
/// - `agent`: support agent
/// - `admin`: administrator
/// - `a1`: an answer on `t1`
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());

    for (id, role) in [
        ("u1", Role::Customer),
        ("u2", Role::Customer),
        ("agent", Role::Agent),
        ("admin", Role::Admin),
    ] {
        store
            .seed_principal(id, format!("{}@example.com", id), TEST_PASSWORD, role, None)
            .expect("seed principal");
    }

    store.insert_ticket(Ticket {
        id: TicketId::new("t1"),
        owner: PrincipalId::new("u1"),
        subject: "screen flickers".to_string(),
        opened_at: Utc::now(),
    });
    store.insert_ticket(Ticket {
        id: TicketId::new("t2"),
        owner: PrincipalId::new("u2"),
        subject: "mouse double-clicks".to_string(),
        opened_at: Utc::now(),
    });
    store.insert_answer(TicketAnswer {
        id: wicket_core::AnswerId::new("a1"),
        ticket: TicketId::new("t1"),
        author: PrincipalId::new("agent"),
        body: "replacement cable is on its way".to_string(),
        written_at: Utc::now(),
    });

    store
}

/// Builds the full application state over the given store.
pub fn test_state(store: Arc<MemoryStore>) -> AppState {
    AppState::builder()
        .config(ApiConfig::default().with_token(TokenConfig::new(TEST_SECRET)))
        .memory_store(store)
        .build()
        .expect("app state")
}

/// Builds the full router over the given store.
pub fn test_router(store: Arc<MemoryStore>) -> Router {
    ApiServer::new(test_state(store)).router()
}

/// Issues a bearer token for the given principal id.
pub fn token_for(id: &str) -> String {
    token_service()
        .issue(PrincipalId::new(id))
        .expect("issue token")
        .token
}

/// Builds a GET request carrying a bearer token.
pub fn authed_get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .expect("request")
}

/// Builds a JSON POST request carrying a bearer token.
pub fn authed_post_json(uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// Builds an anonymous JSON POST request.
pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// Reads a response body as JSON.
pub async fn body_json(body: Body) -> serde_json::Value {
    let bytes = axum::body::to_bytes(body, 1024 * 1024).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

// =============================================================================
// CountingPrincipalStore
// =============================================================================

/// Principal store wrapper that counts every lookup.
///
/// Used to prove that format-rejected sign-ins never reach the store.
pub struct CountingPrincipalStore {
    inner: Arc<MemoryStore>,
    lookups: AtomicUsize,
}

impl CountingPrincipalStore {
    /// Wraps a store.
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    /// Returns the number of lookups performed so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PrincipalStore for CountingPrincipalStore {
    async fn find_by_id(&self, id: &PrincipalId) -> StoreResult<Option<Principal>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Principal>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_email(email).await
    }

    async fn create(&self, new: NewPrincipal) -> StoreResult<Principal> {
        self.inner.create(new).await
    }
}
