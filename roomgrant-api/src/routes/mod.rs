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

//! Axum router configuration for the token service.

pub mod health;
pub mod token;

use axum::{
    routing::{get, post},
    Router,
};

use crate::error::AppError;
use crate::state::AppState;

/// Build the full application router.
///
/// Unknown paths and wrong methods answer with the same error envelope as
/// the handlers.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health).fallback(method_not_allowed))
        .route("/token", post(token::issue).fallback(method_not_allowed))
        .route("/verify", post(token::verify).fallback(method_not_allowed))
        .fallback(not_found)
}

async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}

async fn not_found() -> AppError {
    AppError::not_found()
}
