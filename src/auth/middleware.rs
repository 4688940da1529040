// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Installed with `route_layer`, so it only runs for matched routes and can
//! read [`MatchedPath`] to find the route's policy.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/api/users", get(list_users))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         state.clone(),
//!         require_auth,
//!     ))
//!     .with_state(state);
//! ```

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use super::error::AuthError;
use super::guard::Decision;
use crate::state::AppState;

/// Run the authentication decision and attach the principal.
///
/// The principal is inserted into the request extensions before the handler
/// is called; rejected requests never reach the handler.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let path = match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_string(),
        None => request.uri().path().to_string(),
    };
    let policy = state.routes.policy(request.method(), &path);

    let decision = state
        .auth
        .decide(&policy, request.headers(), request.uri().query())
        .inspect_err(|e| {
            tracing::info!(
                method = %request.method(),
                route = %path,
                reason = ?e,
                "Request rejected by auth guard"
            );
        })?;

    if let Decision::Authenticated(principal) = decision {
        tracing::debug!(
            subject = %principal.subject,
            service_account = principal.is_service_account,
            route = %path,
            "Request authenticated"
        );
        request.extensions_mut().insert(principal);
    }

    Ok(next.run(request).await)
}
