// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Session Authentication Integration Tests
//!
//! End-to-end coverage of credential issuance, verification and the
//! sign-in/sign-up/sign-out flows:
//!
//! - `test_signin_*`: sign-in flow, format gating, enumeration resistance
//! - `test_signup_*`: sign-up flow
//! - `test_session_*`: authenticated requests, staleness, round-trips

use std::sync::Arc;

use axum::http::{header, StatusCode};
use chrono::{Duration, Utc};
use tower::ServiceExt;

use wicket_api::{AppState, Claims, SessionAuthenticator};
use wicket_core::{MemoryStore, PrincipalId, Role};
use wicket_tests::common::*;

// =============================================================================
// Sign-in
// =============================================================================

#[tokio::test]
async fn test_signin_success_sets_cookie_and_returns_token() {
    let router = test_router(seeded_store());

    let req = post_json(
        "/api/v1/auth/signin",
        serde_json::json!({ "email": "u1@example.com", "password": TEST_PASSWORD }),
    );
    let res = router.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie set")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("jwt="));
    assert!(set_cookie.contains("HttpOnly"));
    // Development deployment: no Secure flag.
    assert!(!set_cookie.contains("Secure"));

    let body = body_json(res.into_body()).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["id"], "u1");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_signin_malformed_input_is_rejected_without_store_lookup() {
    let store = seeded_store();
    let counting = Arc::new(CountingPrincipalStore::new(store.clone()));

    let state = AppState::builder()
        .config(
            wicket_api::ApiConfig::default()
                .with_token(wicket_api::TokenConfig::new(TEST_SECRET)),
        )
        .principals(counting.clone())
        .tickets(store.clone())
        .answers(store)
        .build()
        .unwrap();
    let router = wicket_api::ApiServer::new(state).router();

    for payload in [
        serde_json::json!({ "email": "bad-email", "password": TEST_PASSWORD }),
        serde_json::json!({ "email": "u1@example.com", "password": "short" }),
        serde_json::json!({ "email": "u1@example.com", "password": "nouppercase1!" }),
    ] {
        let res = router
            .clone()
            .oneshot(post_json("/api/v1/auth/signin", payload))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body = body_json(res.into_body()).await;
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
    }

    assert_eq!(counting.lookups(), 0, "format failures must not reach the store");
}

#[tokio::test]
async fn test_signin_wrong_password_and_unknown_email_are_indistinguishable() {
    let router = test_router(seeded_store());

    let wrong_password = router
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/signin",
            serde_json::json!({ "email": "u1@example.com", "password": "Wrong123!" }),
        ))
        .await
        .unwrap();

    let unknown_email = router
        .oneshot(post_json(
            "/api/v1/auth/signin",
            serde_json::json!({ "email": "nouser@example.com", "password": "Wrong123!" }),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let body_a = body_json(wrong_password.into_body()).await;
    let body_b = body_json(unknown_email.into_body()).await;
    assert_eq!(body_a, body_b, "responses must not reveal which part failed");
    assert_eq!(body_a["error"]["code"], "INVALID_CREDENTIALS");
}

// =============================================================================
// Sign-up
// =============================================================================

#[tokio::test]
async fn test_signup_creates_principal_and_signs_in() {
    let store = seeded_store();
    let router = test_router(store.clone());

    let res = router
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/signup",
            serde_json::json!({ "email": "new@example.com", "password": TEST_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert!(res.headers().get(header::SET_COOKIE).is_some());

    let body = body_json(res.into_body()).await;
    assert_eq!(body["user"]["email"], "new@example.com");
    assert_eq!(body["user"]["role"], "customer");

    // The returned token works immediately.
    let token = body["token"].as_str().unwrap();
    let res = router
        .oneshot(authed_get("/api/v1/auth/me", token))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let router = test_router(seeded_store());

    let res = router
        .oneshot(post_json(
            "/api/v1/auth/signup",
            serde_json::json!({ "email": "u1@example.com", "password": TEST_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

// =============================================================================
// Sign-out
// =============================================================================

#[tokio::test]
async fn test_signout_clears_cookie() {
    let router = test_router(seeded_store());

    let res = router
        .oneshot(post_json("/api/v1/auth/signout", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .expect("removal cookie")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("jwt="));
    assert!(set_cookie.contains("Max-Age=0"));
}

// =============================================================================
// Authenticated sessions
// =============================================================================

#[tokio::test]
async fn test_session_round_trip_issue_then_authenticate() {
    let store = seeded_store();
    let tokens = token_service();
    let authenticator = SessionAuthenticator::new(tokens.clone(), store);

    let issued = tokens.issue(PrincipalId::new("u1")).unwrap();

    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        format!("Bearer {}", issued.token).parse().unwrap(),
    );

    let principal = authenticator.authenticate(&headers).await.unwrap();
    assert_eq!(principal.id, PrincipalId::new("u1"));
}

#[tokio::test]
async fn test_session_cookie_from_signin_authenticates_next_request() {
    let router = test_router(seeded_store());

    let res = router
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/signin",
            serde_json::json!({ "email": "u1@example.com", "password": TEST_PASSWORD }),
        ))
        .await
        .unwrap();
    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    let cookie_pair = set_cookie.split(';').next().unwrap().to_string();

    // No Authorization header; only the cookie.
    let req = axum::http::Request::builder()
        .uri("/api/v1/auth/me")
        .header(header::COOKIE, cookie_pair)
        .body(axum::body::Body::empty())
        .unwrap();
    let res = router.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res.into_body()).await;
    assert_eq!(body["id"], "u1");
}

#[tokio::test]
async fn test_session_password_change_invalidates_earlier_token() {
    let store = seeded_store();
    let router = test_router(store.clone());
    let tokens = token_service();

    // Credential issued an hour ago.
    let claims = Claims {
        sub: PrincipalId::new("u1"),
        iat: (Utc::now() - Duration::hours(1)).timestamp(),
        exp: (Utc::now() + Duration::hours(1)).timestamp(),
    };
    let old_token = tokens.sign(&claims).unwrap();

    // Valid before the change.
    let res = router
        .clone()
        .oneshot(authed_get("/api/v1/auth/me", &old_token))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Password changes now.
    store
        .seed_principal(
            "u1",
            "u1@example.com",
            "NewSecret1!",
            Role::Customer,
            Some(Utc::now()),
        )
        .unwrap();

    // The old credential is now stale, with the same generic 401 as any
    // other credential failure.
    let res = router
        .clone()
        .oneshot(authed_get("/api/v1/auth/me", &old_token))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(res.into_body()).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    // A fresh sign-in with the new password works again.
    let res = router
        .oneshot(post_json(
            "/api/v1/auth/signin",
            serde_json::json!({ "email": "u1@example.com", "password": "NewSecret1!" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_session_missing_and_garbage_credentials_are_generic_401() {
    let router = test_router(seeded_store());

    // Missing credential.
    let req = axum::http::Request::builder()
        .uri("/api/v1/auth/me")
        .body(axum::body::Body::empty())
        .unwrap();
    let missing = router.clone().oneshot(req).await.unwrap();

    // Garbage credential.
    let garbage = router
        .clone()
        .oneshot(authed_get("/api/v1/auth/me", "not.a.token"))
        .await
        .unwrap();

    // Token for a principal that no longer exists.
    let ghost = router
        .oneshot(authed_get("/api/v1/auth/me", &token_for("ghost")))
        .await
        .unwrap();

    for res in [missing, garbage, ghost] {
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res.into_body()).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_public_endpoints_do_not_require_credentials() {
    let router = test_router(Arc::new(MemoryStore::new()));

    for uri in ["/health", "/ready"] {
        let req = axum::http::Request::builder()
            .uri(uri)
            .body(axum::body::Body::empty())
            .unwrap();
        let res = router.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
