/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Token service entry point.
//!
//! A standalone Axum service that issues room access tokens for the media
//! server and checks tokens presented to it.

use anyhow::Context;
use roomgrant_api::config::Config;
use roomgrant_api::routes;
use roomgrant_api::state::AppState;
use tower_http::cors::{Any, CorsLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::from_env()
        .map_err(anyhow::Error::msg)
        .context("failed to load configuration")?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState::new(&config);
    let app = routes::router().layer(cors).with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tracing::info!(
        api_key = config.signing_key.api_key(),
        ttl_secs = config.token_ttl_secs,
        "Token service listening on {}",
        config.listen_addr
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
