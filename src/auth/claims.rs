// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and the authenticated principal.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Subject assigned to every request authenticated with an API key.
pub const API_KEY_SUBJECT: &str = "api-key-user";

/// Email assigned to every request authenticated with an API key.
pub const API_KEY_EMAIL: &str = "service@api.local";

/// Role carried by the API key principal.
pub const SERVICE_ROLE: &str = "service";

/// Claims carried by a bearer token.
///
/// `sub` and `email` default to empty strings when absent; the verifier
/// rejects empty values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    #[serde(default)]
    pub sub: String,

    /// User email
    #[serde(default)]
    pub email: String,

    /// Role names, in the order they were issued
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,

    /// Issued at timestamp
    #[serde(default)]
    pub iat: i64,

    /// Expiration timestamp; checked only when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Identity attached to an authenticated request.
///
/// This is the primary type handlers use to learn who is calling. It is
/// inserted into the request extensions by the auth middleware and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Canonical subject (`sub` claim, or `api-key-user`)
    #[serde(rename = "sub")]
    #[schema(example = "user-123")]
    pub subject: String,

    #[schema(example = "user@example.com")]
    pub email: String,

    /// Role names, order preserved from the token
    pub roles: Vec<String>,

    /// True when the request was authenticated with an API key
    pub is_service_account: bool,
}

impl Principal {
    /// The fixed principal for API key authentication.
    pub fn service_account() -> Self {
        Self {
            subject: API_KEY_SUBJECT.to_string(),
            email: API_KEY_EMAIL.to_string(),
            roles: vec![SERVICE_ROLE.to_string()],
            is_service_account: true,
        }
    }

    /// Build from verified token claims.
    ///
    /// Returns `None` when `sub` or `email` is empty.
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        if claims.sub.is_empty() || claims.email.is_empty() {
            return None;
        }

        Some(Self {
            subject: claims.sub,
            email: claims.email,
            roles: claims.roles.unwrap_or_default(),
            is_service_account: false,
        })
    }

    /// Check whether the principal holds the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> TokenClaims {
        TokenClaims {
            sub: "user-123".to_string(),
            email: "user@example.com".to_string(),
            roles: Some(vec!["user".to_string(), "admin".to_string()]),
            iat: 1700000000,
            exp: Some(1700003600),
        }
    }

    #[test]
    fn from_claims_copies_identity() {
        let principal = Principal::from_claims(sample_claims()).unwrap();
        assert_eq!(principal.subject, "user-123");
        assert_eq!(principal.email, "user@example.com");
        assert_eq!(principal.roles, vec!["user", "admin"]);
        assert!(!principal.is_service_account);
    }

    #[test]
    fn from_claims_defaults_roles_to_empty() {
        let mut claims = sample_claims();
        claims.roles = None;
        let principal = Principal::from_claims(claims).unwrap();
        assert!(principal.roles.is_empty());
    }

    #[test]
    fn from_claims_rejects_empty_subject_or_email() {
        let mut claims = sample_claims();
        claims.sub.clear();
        assert!(Principal::from_claims(claims).is_none());

        let mut claims = sample_claims();
        claims.email.clear();
        assert!(Principal::from_claims(claims).is_none());
    }

    #[test]
    fn service_account_is_fixed() {
        let principal = Principal::service_account();
        assert_eq!(principal.subject, "api-key-user");
        assert_eq!(principal.roles, vec!["service"]);
        assert!(principal.is_service_account);
        assert!(principal.has_role("service"));
        assert!(!principal.has_role("admin"));
    }

    #[test]
    fn serializes_with_wire_names() {
        let json = serde_json::to_value(Principal::service_account()).unwrap();
        assert_eq!(json["sub"], "api-key-user");
        assert_eq!(json["email"], "service@api.local");
        assert_eq!(json["isServiceAccount"], true);
    }
}
