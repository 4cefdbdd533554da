// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Guarded ticket read handlers.
//!
//! Ticket lifecycle management lives elsewhere; these reads exist to serve
//! the guarded routes and honour the owner scope the guard may attach.

use axum::{
    extract::{Path, State},
    Json,
};
use wicket_core::{Ticket, TicketId};

use crate::error::{ApiError, ApiResult};
use crate::extractors::Scope;
use crate::state::AppState;

/// GET /api/v1/tickets
///
/// Guarded by `[RoleIs(Agent, Admin), SelfUserTickets]`. Agents and admins
/// list everything; customers are granted through the scoping rule and see
/// only their own tickets.
pub async fn list_tickets(
    State(state): State<AppState>,
    Scope(scope): Scope,
) -> ApiResult<Json<Vec<Ticket>>> {
    let owner = scope.map(|s| s.0);
    let tickets = state.tickets.list(owner.as_ref()).await?;
    Ok(Json(tickets))
}

/// GET /api/v1/tickets/{id}
///
/// Guarded by `[RoleIs(Agent, Admin), SelfUserTicket]`.
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Ticket>> {
    let ticket = state
        .tickets
        .find_by_id(&TicketId::new(id))
        .await?
        .ok_or_else(|| ApiError::not_found("ticket"))?;

    Ok(Json(ticket))
}
