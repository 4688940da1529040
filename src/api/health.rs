// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;
use chrono::{SecondsFormat, Utc};

use crate::models::HealthResponse;

/// Health check endpoint handler.
///
/// Public. Returns 200 while the process is serving requests.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy and running", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        runtime: "rust".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
