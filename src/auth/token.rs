// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token issuing and verification with a shared secret.
//!
//! ## Security
//!
//! - Tokens are issued as HS256; HS256, HS384 and HS512 are accepted
//! - `exp` and `nbf` are checked when present, with a 60 second clock skew
//!   tolerance
//! - `sub` and `email` must be non-empty strings after signature verification

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::{Principal, TokenClaims};
use super::error::AuthError;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Signs and verifies bearer tokens with the configured shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenVerifier {
    /// Create a verifier for `secret`, issuing tokens valid for `ttl`.
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.required_spec_claims.clear();
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign an HS256 token for the given identity, expiring after the
    /// configured lifetime.
    pub fn issue(
        &self,
        subject: &str,
        email: &str,
        roles: Vec<String>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let expires_at = now.saturating_add(ttl);
        let claims = TokenClaims {
            sub: subject.to_string(),
            email: email.to_string(),
            roles: Some(roles),
            iat: now,
            exp: Some(expires_at),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Verify a token and build the principal it describes.
    ///
    /// Library errors (bad encoding, signature mismatch, expiry, wrong
    /// algorithm) all map to [`AuthError::InvalidOrExpiredToken`]. A token
    /// that verifies but whose payload does not describe a user (missing,
    /// empty or mistyped `sub` / `email`) is [`AuthError::MalformedTokenPayload`].
    pub fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        let token_data = decode::<serde_json::Value>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(reason = ?e.kind(), "Bearer token rejected");
                AuthError::InvalidOrExpiredToken
            })?;

        let claims: TokenClaims = serde_json::from_value(token_data.claims).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token payload rejected");
            AuthError::MalformedTokenPayload
        })?;

        Principal::from_claims(claims).ok_or(AuthError::MalformedTokenPayload)
    }
}
