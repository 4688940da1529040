// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read once at startup into an [`AppConfig`] and passed to
//! the components that need it. Nothing reads the environment afterwards.
//! `.env.development` and then `.env` are loaded first when present; values
//! already set in the environment win.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8000` |
//! | `CORS_ORIGIN` | Browser origin allowed to call the API | `http://localhost:3000` |
//! | `JWT_SECRET` | HS256 signing secret | insecure placeholder (warns) |
//! | `JWT_EXPIRES_IN` | Token lifetime (`3600`, `30s`, `15m`, `12h`, `1d`) | `1d` |
//! | `JWT_COOKIE_NAME` | Cookie carrying the bearer token | `access_token` |
//! | `API_KEYS` | Comma-separated API key allow-list | empty (no key valid) |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::time::Duration;

use thiserror::Error;

use crate::logging::LogFormat;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const CORS_ORIGIN_ENV: &str = "CORS_ORIGIN";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const JWT_EXPIRES_IN_ENV: &str = "JWT_EXPIRES_IN";
pub const JWT_COOKIE_NAME_ENV: &str = "JWT_COOKIE_NAME";
pub const API_KEYS_ENV: &str = "API_KEYS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Placeholder secret used when `JWT_SECRET` is unset. Never use in production.
pub const DEFAULT_JWT_SECRET: &str = "your-super-secret-key-change-in-production";
pub const DEFAULT_JWT_EXPIRES_IN: &str = "1d";
pub const DEFAULT_COOKIE_NAME: &str = "access_token";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a port number, got '{value}'")]
    InvalidPort { name: &'static str, value: String },
    #[error("{name} must be a duration like 3600, 30s, 15m, 12h or 1d, got '{value}'")]
    InvalidDuration { name: &'static str, value: String },
    #[error("{name} must be 'json' or 'pretty', got '{value}'")]
    InvalidLogFormat { name: &'static str, value: String },
    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}

/// Authentication settings.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    /// `JWT_EXPIRES_IN` as written, echoed back by the demo token endpoint
    pub token_ttl_label: String,
    pub cookie_name: String,
    /// Raw comma-separated allow-list
    pub api_keys: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("cookie_name", &self.cookie_name)
            .field("api_keys", &"[REDACTED]")
            .finish()
    }
}

impl AuthConfig {
    /// True when the insecure placeholder secret is in use.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

/// Process-wide configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub log_format: LogFormat,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load env files, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::from_filename(".env.development");
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let port = match get(PORT_ENV) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidPort {
                name: PORT_ENV,
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let log_format = match get(LOG_FORMAT_ENV) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidLogFormat {
                name: LOG_FORMAT_ENV,
                value,
            })?,
            None => LogFormat::default(),
        };

        let token_ttl_label = get(JWT_EXPIRES_IN_ENV).unwrap_or_else(|| DEFAULT_JWT_EXPIRES_IN.to_string());
        let token_ttl = parse_duration(&token_ttl_label).ok_or_else(|| ConfigError::InvalidDuration {
            name: JWT_EXPIRES_IN_ENV,
            value: token_ttl_label.clone(),
        })?;

        let cookie_name = get(JWT_COOKIE_NAME_ENV).unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());
        if cookie_name.trim().is_empty() {
            return Err(ConfigError::Empty {
                name: JWT_COOKIE_NAME_ENV,
            });
        }

        Ok(Self {
            host: get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            cors_origin: get(CORS_ORIGIN_ENV).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            log_format,
            auth: AuthConfig {
                jwt_secret: get(JWT_SECRET_ENV).unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
                token_ttl,
                token_ttl_label,
                cookie_name,
                api_keys: lookup(API_KEYS_ENV).unwrap_or_default(),
            },
        })
    }

    /// Socket address string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse `<n>` (seconds) or `<n>` followed by `s`, `m`, `h` or `d`.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(split);
    let amount: u64 = digits.parse().ok()?;

    let multiplier = match unit {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return None,
    };

    amount.checked_mul(multiplier).map(Duration::from_secs)
}
