// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Route Guarding Integration Tests
//!
//! End-to-end coverage of the access rule chains declared in the router:
//!
//! - `test_users_*`: `[RoleIs(Admin), SelfUser]`
//! - `test_tickets_*`: `[RoleIs(Agent, Admin), SelfUserTickets / SelfUserTicket]`
//! - `test_answers_*`: the body- and path-addressed answer rules

use axum::http::StatusCode;
use tower::ServiceExt;

use wicket_tests::common::*;

// =============================================================================
// Users: [RoleIs(Admin), SelfUser]
// =============================================================================

#[tokio::test]
async fn test_users_admin_reads_anyone() {
    let router = test_router(seeded_store());

    let res = router
        .oneshot(authed_get("/api/v1/users/u2", &token_for("admin")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res.into_body()).await;
    assert_eq!(body["id"], "u2");
}

#[tokio::test]
async fn test_users_customer_reads_only_self() {
    let router = test_router(seeded_store());

    let res = router
        .clone()
        .oneshot(authed_get("/api/v1/users/u1", &token_for("u1")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = router
        .oneshot(authed_get("/api/v1/users/u2", &token_for("u1")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body = body_json(res.into_body()).await;
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

// =============================================================================
// Ticket listing: [RoleIs(Agent, Admin), SelfUserTickets]
// =============================================================================

#[tokio::test]
async fn test_tickets_agent_lists_everything() {
    let router = test_router(seeded_store());

    let res = router
        .oneshot(authed_get("/api/v1/tickets", &token_for("agent")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_tickets_customer_list_is_scoped_to_own_records() {
    let router = test_router(seeded_store());

    let res = router
        .oneshot(authed_get("/api/v1/tickets", &token_for("u1")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res.into_body()).await;
    let tickets = body.as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["id"], "t1");
    assert_eq!(tickets[0]["owner"], "u1");
}

// =============================================================================
// Single ticket: [RoleIs(Agent, Admin), SelfUserTicket]
// =============================================================================

#[tokio::test]
async fn test_tickets_owner_reads_own_ticket() {
    let router = test_router(seeded_store());

    let res = router
        .oneshot(authed_get("/api/v1/tickets/t1", &token_for("u1")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_tickets_non_owner_is_denied() {
    let router = test_router(seeded_store());

    let res = router
        .oneshot(authed_get("/api/v1/tickets/t1", &token_for("u2")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_tickets_agent_reads_any_ticket() {
    let router = test_router(seeded_store());

    let res = router
        .oneshot(authed_get("/api/v1/tickets/t2", &token_for("agent")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_tickets_missing_ticket_denies_customers() {
    let router = test_router(seeded_store());

    // The lookup misses; the rule falls through and the chain ends in a
    // plain denial, not a 404.
    let res = router
        .oneshot(authed_get("/api/v1/tickets/no-such", &token_for("u1")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

// =============================================================================
// Answers query: [RoleIs(Agent, Admin), SelfTicketTicketAnswers]
// =============================================================================

#[tokio::test]
async fn test_answers_query_by_ticket_owner() {
    let router = test_router(seeded_store());

    let res = router
        .oneshot(authed_post_json(
            "/api/v1/answers/query",
            &token_for("u1"),
            serde_json::json!({ "ticket": "t1" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res.into_body()).await;
    let answers = body.as_array().unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["id"], "a1");
}

#[tokio::test]
async fn test_answers_query_denied_for_foreign_ticket() {
    let router = test_router(seeded_store());

    let res = router
        .oneshot(authed_post_json(
            "/api/v1/answers/query",
            &token_for("u2"),
            serde_json::json!({ "ticket": "t1" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

// =============================================================================
// Answer creation: [RoleIs(Agent, Admin), SelfTicketAnswer]
// =============================================================================

#[tokio::test]
async fn test_answers_create_stamps_author_server_side() {
    let router = test_router(seeded_store());

    let res = router
        .oneshot(authed_post_json(
            "/api/v1/answers",
            &token_for("u1"),
            // A forged author field is ignored; the payload carries none.
            serde_json::json!({ "ticket": "t1", "body": "it started working again" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = body_json(res.into_body()).await;
    assert_eq!(body["author"], "u1");
    assert_eq!(body["ticket"], "t1");
}

#[tokio::test]
async fn test_answers_create_denied_on_foreign_ticket() {
    let router = test_router(seeded_store());

    let res = router
        .oneshot(authed_post_json(
            "/api/v1/answers",
            &token_for("u2"),
            serde_json::json!({ "ticket": "t1", "body": "drive-by comment" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_answers_create_allowed_for_agents() {
    let router = test_router(seeded_store());

    let res = router
        .oneshot(authed_post_json(
            "/api/v1/answers",
            &token_for("agent"),
            serde_json::json!({ "ticket": "t2", "body": "have you tried rebooting?" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = body_json(res.into_body()).await;
    assert_eq!(body["author"], "agent");
}

// =============================================================================
// Single answer: [RoleIs(Agent, Admin), SelfTicketTicketAnswer]
// =============================================================================

#[tokio::test]
async fn test_answers_read_through_parent_ticket_ownership() {
    let router = test_router(seeded_store());

    // a1 sits on t1, owned by u1.
    let res = router
        .clone()
        .oneshot(authed_get("/api/v1/answers/a1", &token_for("u1")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = router
        .oneshot(authed_get("/api/v1/answers/a1", &token_for("u2")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_guarded_routes_require_authentication() {
    let router = test_router(seeded_store());

    for uri in ["/api/v1/tickets", "/api/v1/users/u1", "/api/v1/answers/a1"] {
        let req = axum::http::Request::builder()
            .uri(uri)
            .body(axum::body::Body::empty())
            .unwrap();
        let res = router.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
