// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::error::ApiError;

/// Message returned whenever the combined strategy rejects a request.
pub const AUTH_REQUIRED_MESSAGE: &str =
    "Authentication required. Provide either a valid JWT token (Bearer) or API key (X-API-Key header)";

/// Credential scheme, used to say which credential was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    ApiKey,
    Bearer,
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scheme::ApiKey => write!(f, "API key"),
            Scheme::Bearer => write!(f, "Bearer token"),
        }
    }
}

/// Authentication error type.
///
/// Every variant is scoped to a single request. The combined strategy only
/// ever returns [`AuthError::Unauthorized`]; single-scheme strategies return
/// the specific cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential of the expected scheme was presented
    #[error("{0} is missing")]
    MissingCredential(Scheme),
    /// API key is not in the allow-list
    #[error("Invalid API key")]
    InvalidApiKey,
    /// Token is malformed, badly signed or expired
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,
    /// Token verified but `sub` or `email` is empty
    #[error("Invalid token payload")]
    MalformedTokenPayload,
    /// Collapsed rejection of the combined strategy
    #[error("{}", AUTH_REQUIRED_MESSAGE)]
    Unauthorized,
    /// Authenticated, but none of the required roles is held
    #[error("Forbidden resource")]
    InsufficientRoles,
}

impl AuthError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InsufficientRoles => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::new(err.status_code(), err.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
