// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential extraction from request headers, cookies and query string.
//!
//! Each scheme is extracted independently, first match wins:
//!
//! | Scheme  | 1st                        | 2nd                        | 3rd                    |
//! |---------|----------------------------|----------------------------|------------------------|
//! | API key | `X-API-Key` header         | `Authorization: ApiKey <k>`| `?api_key=` (optional) |
//! | Bearer  | `Authorization: Bearer <t>`| cookie (configurable name) | `?token=`              |
//!
//! Values are taken verbatim after prefix stripping. Empty values and header
//! values that are not visible ASCII count as absent.

use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderName};
use axum_extra::extract::cookie::CookieJar;

pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");
pub const API_KEY_QUERY_PARAM: &str = "api_key";
pub const TOKEN_QUERY_PARAM: &str = "token";

const API_KEY_PREFIX: &str = "ApiKey ";
const BEARER_PREFIX: &str = "Bearer ";

/// A single presented credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    ApiKey(String),
    Bearer(String),
}

/// Candidates found on one request, at most one per scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub bearer: Option<String>,
}

/// Where to look for credentials.
#[derive(Debug, Clone, Copy)]
pub struct Sources<'a> {
    /// Accept `?api_key=` as the last API key fallback
    pub api_key_query: bool,
    /// Look for a bearer token at all
    pub bearer: bool,
    /// Cookie carrying the bearer token
    pub cookie_name: &'a str,
}

impl Credentials {
    /// Extract both candidates from a request.
    pub fn extract(headers: &HeaderMap, query: Option<&str>, sources: Sources<'_>) -> Self {
        let bearer = if sources.bearer {
            bearer_candidate(headers, query, sources.cookie_name)
        } else {
            None
        };

        Self {
            api_key: api_key_candidate(headers, query, sources.api_key_query),
            bearer,
        }
    }

    /// Credentials in the order they are attempted: API key, then bearer.
    pub fn attempts(&self) -> impl Iterator<Item = Credential> + '_ {
        self.api_key
            .iter()
            .cloned()
            .map(Credential::ApiKey)
            .chain(self.bearer.iter().cloned().map(Credential::Bearer))
    }
}

/// Find the API key candidate.
pub fn api_key_candidate(headers: &HeaderMap, query: Option<&str>, use_query: bool) -> Option<String> {
    header_value(headers, &API_KEY_HEADER)
        .map(str::to_string)
        .or_else(|| authorization_with_prefix(headers, API_KEY_PREFIX))
        .or_else(|| {
            if use_query {
                query_param(query, API_KEY_QUERY_PARAM)
            } else {
                None
            }
        })
}

/// Find the bearer token candidate.
pub fn bearer_candidate(headers: &HeaderMap, query: Option<&str>, cookie_name: &str) -> Option<String> {
    authorization_with_prefix(headers, BEARER_PREFIX)
        .or_else(|| cookie_value(headers, cookie_name))
        .or_else(|| query_param(query, TOKEN_QUERY_PARAM))
}

fn header_value<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

fn authorization_with_prefix(headers: &HeaderMap, prefix: &str) -> Option<String> {
    header_value(headers, &AUTHORIZATION)
        .and_then(|value| value.strip_prefix(prefix))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
