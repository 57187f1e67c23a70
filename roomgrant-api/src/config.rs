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

//! Application configuration loaded from environment variables.

use std::env;

use roomgrant::{KeySet, SigningKeyPair};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_TTL_SECS: i64 = 6 * 60 * 60;
const DEFAULT_SERVER_URL: &str = "ws://localhost:7880";

/// Configuration for the token service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server (e.g. "0.0.0.0:8080").
    pub listen_addr: String,
    /// Key pair used to sign room access tokens (HMAC-SHA256).
    pub signing_key: SigningKeyPair,
    /// A rotated-out key pair that `/verify` still accepts, if any.
    pub previous_key: Option<SigningKeyPair>,
    /// Token time-to-live in seconds (default: 21600 = 6 hours).
    pub token_ttl_secs: i64,
    /// Media server URL handed back to clients alongside the token.
    pub server_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Required
    /// - `API_KEY`
    /// - `API_SECRET`
    ///
    /// # Optional
    /// - `LISTEN_ADDR` (default: `"0.0.0.0:8080"`)
    /// - `TOKEN_TTL_SECS` (default: `"21600"`)
    /// - `SERVER_URL` (default: `"ws://localhost:7880"`)
    /// - `PREVIOUS_API_KEY` + `PREVIOUS_API_SECRET`
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let api_key = var("API_KEY").ok_or("API_KEY environment variable is required")?;
        let api_secret =
            var("API_SECRET").ok_or("API_SECRET environment variable is required")?;

        let listen_addr = var("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let token_ttl_secs = match var("TOKEN_TTL_SECS") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|ttl| *ttl > 0 && chrono::Duration::try_seconds(*ttl).is_some())
                .ok_or("TOKEN_TTL_SECS must be a positive integer")?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };
        let server_url = var("SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let previous_key = match (var("PREVIOUS_API_KEY"), var("PREVIOUS_API_SECRET")) {
            (Some(key), Some(secret)) => Some(SigningKeyPair::new(key, secret)),
            (None, None) => None,
            _ => {
                return Err(
                    "PREVIOUS_API_KEY and PREVIOUS_API_SECRET must be set together".to_string(),
                )
            }
        };

        Ok(Self {
            listen_addr,
            signing_key: SigningKeyPair::new(api_key, api_secret),
            previous_key,
            token_ttl_secs,
            server_url,
        })
    }

    /// Keys accepted when verifying: the current one plus the previous one.
    pub fn verification_keys(&self) -> KeySet {
        self.previous_key
            .iter()
            .cloned()
            .chain(std::iter::once(self.signing_key.clone()))
            .collect()
    }
}
