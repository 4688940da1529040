// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::extractors::ValidatedJson;
use crate::{
    auth::CurrentUser,
    error::{ApiError, ErrorBody},
    models::{CreateUserRequest, UpdateUserRequest, User},
    state::AppState,
};

/// Get all users.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    security(("JWT-auth" = []), ("api-key" = [])),
    responses(
        (status = 200, description = "List of users", body = [User]),
        (status = 401, description = "Missing or invalid authentication", body = ErrorBody),
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let store = state.store.read().await;
    Json(store.list_users())
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "Unique user identifier", example = "1702800000000")),
    tag = "users",
    security(("JWT-auth" = []), ("api-key" = [])),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 401, description = "Missing or invalid authentication", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    )
)]
pub async fn get_user(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<User>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_user(&id)?))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    tag = "users",
    security(("JWT-auth" = []), ("api-key" = [])),
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Missing or invalid authentication", body = ErrorBody),
    )
)]
pub async fn create_user(
    CurrentUser(actor): CurrentUser,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let mut store = state.store.write().await;
    let user = store.create_user(request);
    tracing::info!(actor = %actor.subject, user_id = %user.id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user. Absent fields are left unchanged.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "Unique user identifier")),
    request_body = UpdateUserRequest,
    tag = "users",
    security(("JWT-auth" = []), ("api-key" = [])),
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Missing or invalid authentication", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    )
)]
pub async fn update_user(
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let mut store = state.store.write().await;
    let user = store.update_user(&id, request)?;
    tracing::info!(actor = %actor.subject, user_id = %user.id, "User updated");
    Ok(Json(user))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "Unique user identifier")),
    tag = "users",
    security(("JWT-auth" = []), ("api-key" = [])),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Missing or invalid authentication", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    )
)]
pub async fn delete_user(
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete_user(&id)?;
    tracing::info!(actor = %actor.subject, user_id = %id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
