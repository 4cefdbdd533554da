// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Health check handlers.

use axum::Json;

use crate::response::{HealthResponse, ReadinessResponse};

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// GET /ready
pub async fn ready() -> Json<ReadinessResponse> {
    Json(ReadinessResponse { ready: true })
}
