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

//! Shared application state passed to every Axum handler via `State`.

use std::sync::Arc;

use roomgrant::{KeySet, SigningKeyPair};

use crate::config::Config;

/// Application state shared across all request handlers.
///
/// Key material is read-only after start-up, so handlers share it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    /// Key pair used to sign new tokens.
    pub signing_key: Arc<SigningKeyPair>,
    /// Keys accepted by `/verify`.
    pub verification_keys: Arc<KeySet>,
    /// Token time-to-live in seconds.
    pub token_ttl_secs: i64,
    /// Media server URL returned with each token.
    pub server_url: String,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            signing_key: Arc::new(config.signing_key.clone()),
            verification_keys: Arc::new(config.verification_keys()),
            token_ttl_secs: config.token_ttl_secs,
            server_url: config.server_url.clone(),
        }
    }
}
