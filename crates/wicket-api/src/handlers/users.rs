// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Principal lookup handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use wicket_core::PrincipalId;

use crate::error::{ApiError, ApiResult};
use crate::response::PrincipalView;
use crate::state::AppState;

/// GET /api/v1/users/{id}
///
/// Guarded by `[RoleIs(Admin), SelfUser]`: admins may read anyone,
/// everyone else only themselves.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PrincipalView>> {
    let principal = state
        .principals
        .find_by_id(&PrincipalId::new(id))
        .await?
        .ok_or_else(|| ApiError::not_found("user"))?;

    Ok(Json(PrincipalView::from(&principal)))
}
