// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::{CurrentUser, Principal},
    error::ApiError,
    models::DemoTokenResponse,
    state::AppState,
};

const DEMO_SUBJECT: &str = "demo-user-id";
const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_ROLE: &str = "user";

/// Issue a demo token for testing.
///
/// Public. Intended for development setups only.
#[utoipa::path(
    post,
    path = "/api/auth/demo-token",
    tag = "auth",
    responses(
        (status = 201, description = "Demo token generated", body = DemoTokenResponse)
    )
)]
pub async fn demo_token(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<DemoTokenResponse>), ApiError> {
    let access_token = state
        .auth
        .tokens()
        .issue(DEMO_SUBJECT, DEMO_EMAIL, vec![DEMO_ROLE.to_string()])
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to sign demo token");
            ApiError::internal("Failed to issue token")
        })?;

    Ok((
        StatusCode::CREATED,
        Json(DemoTokenResponse {
            access_token,
            expires_in: state.token_ttl_label.clone(),
        }),
    ))
}

/// Get the current authenticated user from the bearer token.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    security(("JWT-auth" = [])),
    responses(
        (status = 200, description = "Current user info", body = Principal),
        (status = 401, description = "Missing, invalid or expired bearer token"),
    )
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<Principal> {
    Json(user)
}
