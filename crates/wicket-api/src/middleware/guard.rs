// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Route guarding middleware.
//!
//! Each guarded route is wrapped in a [`GuardLayer`] carrying the route's
//! rule chain, fixed at registration time. The layer runs after the
//! authentication middleware: it reads the [`CurrentUser`] from request
//! extensions, extracts the ids the rules need, asks the [`Gatekeeper`] for
//! a verdict, and either forwards the request (attaching the owner scope
//! when one was granted) or answers 403.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::{to_bytes, Body},
    extract::{FromRequestParts, Path, Query},
    http::Request,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use crate::auth::{AccessRule, CurrentUser, Gatekeeper, RequestContext, Verdict};
use crate::error::ApiError;

/// Fallback body-buffering limit when none is configured.
const DEFAULT_MAX_BODY_SIZE: usize = 256 * 1024;

// =============================================================================
// GuardLayer
// =============================================================================

/// Layer enforcing a route's access rule chain.
#[derive(Clone)]
pub struct GuardLayer {
    gatekeeper: Gatekeeper,
    rules: Arc<Vec<AccessRule>>,
    max_body_size: usize,
}

impl GuardLayer {
    /// Creates a guard for the given rule chain.
    pub fn new(gatekeeper: Gatekeeper, rules: Vec<AccessRule>) -> Self {
        Self {
            gatekeeper,
            rules: Arc::new(rules),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Sets the body-buffering limit used by body-reading rules.
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }
}

impl<S> Layer<S> for GuardLayer {
    type Service = GuardMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GuardMiddleware {
            inner,
            gatekeeper: self.gatekeeper.clone(),
            rules: self.rules.clone(),
            max_body_size: self.max_body_size,
        }
    }
}

// =============================================================================
// GuardMiddleware
// =============================================================================

/// Middleware enforcing a route's access rule chain.
#[derive(Clone)]
pub struct GuardMiddleware<S> {
    inner: S,
    gatekeeper: Gatekeeper,
    rules: Arc<Vec<AccessRule>>,
    max_body_size: usize,
}

impl<S> Service<Request<Body>> for GuardMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let gatekeeper = self.gatekeeper.clone();
        let rules = self.rules.clone();
        let max_body_size = self.max_body_size;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let Some(user) = req.extensions().get::<CurrentUser>().cloned() else {
                tracing::warn!("Guard reached without an authenticated principal");
                return Ok(ApiError::unauthorized("authentication required").into_response());
            };

            let (mut req, ctx) = match extract_context(req, &rules, max_body_size).await {
                Ok(pair) => pair,
                Err(e) => return Ok(e.into_response()),
            };

            match gatekeeper.authorize(&user, &rules, &ctx).await {
                Ok(Verdict::Granted { scope }) => {
                    if let Some(scope) = scope {
                        req.extensions_mut().insert(scope);
                    }
                    inner.call(req).await
                }
                Ok(Verdict::Denied) => {
                    tracing::warn!(user = %user.id, path = %req.uri().path(), "Access denied");
                    Ok(ApiError::forbidden("insufficient access").into_response())
                }
                Err(e) => Ok(ApiError::from(e).into_response()),
            }
        })
    }
}

// =============================================================================
// Context Extraction
// =============================================================================

/// Pulls the ids the rule chain needs out of the request.
///
/// The body is buffered (and reinstated) only when a rule actually reads a
/// body-carried ticket id; routes without such rules keep streaming bodies.
async fn extract_context(
    req: Request<Body>,
    rules: &[AccessRule],
    max_body_size: usize,
) -> Result<(Request<Body>, RequestContext), ApiError> {
    let needs_body = rules.iter().any(AccessRule::needs_body_ticket);
    let (mut parts, body) = req.into_parts();

    let path_id = Path::<HashMap<String, String>>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .and_then(|Path(params)| params.get("id").cloned());

    let query_id = Query::<HashMap<String, String>>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .and_then(|Query(params)| params.get("id").cloned());

    let mut ctx = RequestContext::new();
    if let Some(id) = &path_id {
        ctx = ctx.with_subject_id(id.clone());
    }
    if let Some(id) = query_id.or_else(|| path_id.clone()) {
        ctx = ctx.with_ticket_ref(id);
    }

    let body = if needs_body {
        let bytes = to_bytes(body, max_body_size)
            .await
            .map_err(|e| ApiError::invalid_input(format!("Unreadable request body: {}", e)))?;

        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&bytes) {
            if let Some(ticket) = value.get("ticket").and_then(|v| v.as_str()) {
                ctx = ctx.with_body_ticket(ticket);
            }
        }

        Body::from(bytes)
    } else {
        body
    };

    Ok((Request::from_parts(parts, body), ctx))
}

// =============================================================================
// Tests
// =============================================================================
