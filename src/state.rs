// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{ApiKeyValidator, Authenticator, RouteTable, TokenVerifier};
use crate::config::AuthConfig;
use crate::store::InMemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    /// Authentication decision unit (read-only after startup)
    pub auth: Arc<Authenticator>,
    /// Route policies, keyed by matched path
    pub routes: Arc<RouteTable>,
    /// `JWT_EXPIRES_IN` as configured
    pub token_ttl_label: String,
}

impl AppState {
    pub fn new(store: InMemoryStore, config: &AuthConfig, routes: RouteTable) -> Self {
        let authenticator = Authenticator::new(
            ApiKeyValidator::from_list(&config.api_keys),
            TokenVerifier::new(&config.jwt_secret, config.token_ttl),
            config.cookie_name.clone(),
        );

        Self {
            store: Arc::new(RwLock::new(store)),
            auth: Arc::new(authenticator),
            routes: Arc::new(routes),
            token_ttl_label: config.token_ttl_label.clone(),
        }
    }
}
