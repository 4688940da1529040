// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Scaffold API - users REST service with combined JWT / API key auth
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers, router and OpenAPI document (Axum)
//! - `auth` - Authentication decision unit (HS256 bearer tokens, API keys)
//! - `config` - Environment configuration
//! - `logging` - Tracing subscriber setup
//! - `store` - In-memory user store

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod store;
