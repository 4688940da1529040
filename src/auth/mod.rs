// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Combined bearer-token / API key authentication for the API.
//!
//! ## Auth Flow
//!
//! 1. Routes are registered with a visibility (public / private), an optional
//!    strategy and optional required roles ([`routes`])
//! 2. The [`middleware::require_auth`] layer looks up the matched route
//! 3. [`Authenticator::decide`] extracts credentials and:
//!    - accepts public routes as-is
//!    - accepts an allow-listed API key as the service principal
//!    - otherwise verifies the bearer token (header, cookie or `?token=`)
//! 4. The resolved [`Principal`] is attached to the request extensions and
//!    read by handlers through [`CurrentUser`]
//!
//! ## Security
//!
//! - Tokens are HS256, signed with the configured secret
//! - API keys are compared in constant time
//! - The combined strategy never says which credential almost worked

pub mod api_key;
pub mod claims;
pub mod credential;
pub mod error;
pub mod extractor;
pub mod guard;
pub mod middleware;
pub mod routes;
pub mod token;

pub use api_key::ApiKeyValidator;
pub use claims::Principal;
pub use error::AuthError;
pub use extractor::CurrentUser;
pub use guard::{Authenticator, Decision, Strategy};
pub use routes::{Controller, RouteTable};
pub use token::TokenVerifier;
