// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The authentication decision.
//!
//! One call to [`Authenticator::decide`] per request:
//!
//! 1. Public route: accept without a principal.
//! 2. API key in the allow-list: accept as the service principal.
//! 3. Bearer token that verifies: accept as the token's principal.
//! 4. Otherwise reject.
//!
//! Which of steps 2 and 3 run is chosen by the route's [`Strategy`].

use axum::http::HeaderMap;

use super::api_key::ApiKeyValidator;
use super::claims::Principal;
use super::credential::{Credential, Credentials, Sources};
use super::error::{AuthError, Scheme};
use super::routes::RoutePolicy;
use super::token::TokenVerifier;

/// Which credential schemes a route accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// API key or bearer token; failures collapse into one error
    #[default]
    Combined,
    /// API key only, `?api_key=` accepted; missing and invalid are distinct
    ApiKeyOnly,
    /// Bearer token only; missing, invalid and malformed are distinct
    BearerOnly,
}

impl Strategy {
    fn sources<'a>(&self, cookie_name: &'a str) -> Sources<'a> {
        Sources {
            api_key_query: matches!(self, Strategy::ApiKeyOnly),
            bearer: !matches!(self, Strategy::ApiKeyOnly),
            cookie_name,
        }
    }
}

/// Outcome of an accepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Public route, nothing attached
    Public,
    /// Credential accepted; attach this principal
    Authenticated(Principal),
}

/// Authentication decision unit.
///
/// Holds only read-only configuration, so one instance is shared by every
/// request behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Authenticator {
    api_keys: ApiKeyValidator,
    tokens: TokenVerifier,
    cookie_name: String,
}

impl Authenticator {
    pub fn new(api_keys: ApiKeyValidator, tokens: TokenVerifier, cookie_name: impl Into<String>) -> Self {
        Self {
            api_keys,
            tokens,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn tokens(&self) -> &TokenVerifier {
        &self.tokens
    }

    /// Number of configured API keys.
    pub fn api_key_count(&self) -> usize {
        self.api_keys.len()
    }

    /// Decide whether a request may proceed.
    pub fn decide(
        &self,
        policy: &RoutePolicy,
        headers: &HeaderMap,
        query: Option<&str>,
    ) -> Result<Decision, AuthError> {
        if policy.public {
            return Ok(Decision::Public);
        }

        let strategy = policy.strategy.unwrap_or_default();
        let credentials = Credentials::extract(headers, query, strategy.sources(&self.cookie_name));

        let principal = match strategy {
            Strategy::Combined => self.combined(&credentials)?,
            Strategy::ApiKeyOnly => self.api_key_only(&credentials)?,
            Strategy::BearerOnly => self.bearer_only(&credentials)?,
        };

        if !policy.roles.is_empty() && !policy.roles.iter().any(|role| principal.has_role(role)) {
            tracing::debug!(
                subject = %principal.subject,
                required = ?policy.roles,
                "Principal lacks required role"
            );
            return Err(AuthError::InsufficientRoles);
        }

        Ok(Decision::Authenticated(principal))
    }

    fn combined(&self, credentials: &Credentials) -> Result<Principal, AuthError> {
        for credential in credentials.attempts() {
            match self.check(&credential) {
                Ok(principal) => return Ok(principal),
                Err(reason) => tracing::debug!(%reason, "Credential rejected, trying next"),
            }
        }

        Err(AuthError::Unauthorized)
    }

    fn api_key_only(&self, credentials: &Credentials) -> Result<Principal, AuthError> {
        let key = credentials
            .api_key
            .clone()
            .ok_or(AuthError::MissingCredential(Scheme::ApiKey))?;
        self.check(&Credential::ApiKey(key))
    }

    fn bearer_only(&self, credentials: &Credentials) -> Result<Principal, AuthError> {
        let token = credentials
            .bearer
            .clone()
            .ok_or(AuthError::MissingCredential(Scheme::Bearer))?;
        self.check(&Credential::Bearer(token))
    }

    fn check(&self, credential: &Credential) -> Result<Principal, AuthError> {
        match credential {
            Credential::ApiKey(key) if self.api_keys.is_valid(key) => Ok(Principal::service_account()),
            Credential::ApiKey(_) => Err(AuthError::InvalidApiKey),
            Credential::Bearer(token) => self.tokens.verify(token),
        }
    }
}
