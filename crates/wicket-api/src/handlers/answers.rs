// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Guarded ticket answer handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use wicket_core::{AnswerId, NewTicketAnswer, TicketAnswer, TicketId};

use crate::error::{ApiError, ApiResult};
use crate::extractors::Auth;
use crate::state::AppState;

// =============================================================================
// Query Answers
// =============================================================================

/// Body for the answers query: the guard reads the same `ticket` field.
#[derive(Debug, Deserialize)]
pub struct AnswersQuery {
    /// The ticket whose answers to list.
    pub ticket: String,
}

/// POST /api/v1/answers/query
///
/// Guarded by `[RoleIs(Agent, Admin), SelfTicketTicketAnswers]`.
pub async fn query_answers(
    State(state): State<AppState>,
    Json(query): Json<AnswersQuery>,
) -> ApiResult<Json<Vec<TicketAnswer>>> {
    let answers = state
        .answers
        .list_for_ticket(&TicketId::new(query.ticket))
        .await?;

    Ok(Json(answers))
}

// =============================================================================
// Create Answer
// =============================================================================

/// Body for answer creation. The author is never part of the payload.
#[derive(Debug, Deserialize)]
pub struct CreateAnswerRequest {
    /// The ticket to answer.
    pub ticket: String,
    /// Answer body.
    pub body: String,
}

/// POST /api/v1/answers
///
/// Guarded by `[RoleIs(Agent, Admin), SelfTicketAnswer]`. The authenticated
/// principal is stamped as the author server-side.
pub async fn create_answer(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<CreateAnswerRequest>,
) -> ApiResult<impl IntoResponse> {
    let ticket_id = TicketId::new(request.ticket);

    state
        .tickets
        .find_by_id(&ticket_id)
        .await?
        .ok_or_else(|| ApiError::not_found("ticket"))?;

    let answer = state
        .answers
        .create(NewTicketAnswer {
            ticket: ticket_id,
            author: user.id,
            body: request.body,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(answer)))
}

// =============================================================================
// Get Answer
// =============================================================================

/// GET /api/v1/answers/{id}
///
/// Guarded by `[RoleIs(Agent, Admin), SelfTicketTicketAnswer]`.
pub async fn get_answer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TicketAnswer>> {
    let answer = state
        .answers
        .find_by_id(&AnswerId::new(id))
        .await?
        .ok_or_else(|| ApiError::not_found("answer"))?;

    Ok(Json(answer))
}
