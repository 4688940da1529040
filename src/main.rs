// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::error::Error;

use scaffold_api::{
    api,
    config::{AppConfig, JWT_SECRET_ENV},
    logging,
    state::AppState,
    store::InMemoryStore,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    logging::init(config.log_format);

    if config.auth.uses_default_secret() {
        tracing::warn!(
            "{JWT_SECRET_ENV} is not set; using the built-in development secret. Do not run this in production"
        );
    }

    let state = AppState::new(InMemoryStore::seeded(), &config.auth, api::route_table());
    tracing::info!(
        api_keys = state.auth.api_key_count(),
        token_ttl = %config.auth.token_ttl_label,
        "Authentication configured"
    );

    let cors = api::cors_layer(&config.cors_origin)?;
    let app = api::router(state, cors);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Scaffold API listening (docs at /api/docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
