// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the REST API. All types derive `ToSchema`
//! for the OpenAPI document; wire names are camelCase.
//!
//! ## Model Categories
//!
//! - **Users**: the managed resource
//! - **Auth**: demo token issuing
//! - **Health**: service status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// =============================================================================
// User Models
// =============================================================================

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    #[schema(example = "1702800000000")]
    pub id: String,
    /// User full name.
    #[schema(example = "John Doe", min_length = 2)]
    pub name: String,
    /// User email address.
    #[schema(example = "john@example.com", format = "email")]
    pub email: String,
    /// Timestamp when the user was created.
    pub created_at: DateTime<Utc>,
}

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    /// User full name (at least 2 characters).
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    #[schema(example = "John Doe", min_length = 2)]
    pub name: String,
    /// User email address.
    #[validate(email(message = "Please provide a valid email address"))]
    #[schema(example = "john@example.com", format = "email")]
    pub email: String,
}

/// Partial update of a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    #[schema(example = "John Updated", min_length = 2)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Please provide a valid email address"))]
    #[schema(example = "john.updated@example.com", format = "email")]
    pub email: Option<String>,
}

// =============================================================================
// Auth Models
// =============================================================================

/// A signed demo token.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DemoTokenResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Configured token lifetime, as written in `JWT_EXPIRES_IN`.
    #[schema(example = "1d")]
    pub expires_in: String,
}

// =============================================================================
// Health Models
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    #[schema(example = "ok")]
    pub status: String,
    /// Current server time (RFC 3339).
    pub timestamp: String,
    #[schema(example = "rust")]
    pub runtime: String,
    /// Service version.
    #[schema(example = "0.1.0")]
    pub version: String,
}
