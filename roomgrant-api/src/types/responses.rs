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

//! Response types for the token service.
//!
//! Token endpoints return an [`APIResponse<T>`] envelope:
//! - On success: `{ "success": true,  "result": <T> }`
//! - On failure: `{ "success": false, "result": <APIError> }`

use roomgrant::Claims;
use serde::{Deserialize, Serialize};

/// Top-level API response envelope.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct APIResponse<A: Serialize> {
    pub success: bool,
    pub result: A,
}

impl<A: Serialize> APIResponse<A> {
    /// Wrap a successful result.
    pub fn ok(result: A) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

impl APIResponse<crate::types::error::APIError> {
    /// Wrap an error result.
    pub fn error(err: crate::types::error::APIError) -> Self {
        Self {
            success: false,
            result: err,
        }
    }
}

/// Response payload for `POST /token`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenResponse {
    /// Signed room access token.
    pub token: String,
    /// Media server the client should connect to with the token.
    pub server_url: String,
    pub identity: String,
    pub room: String,
    /// Unix timestamp in seconds after which the token is rejected.
    pub expires_at: i64,
}

/// Response payload for `POST /verify`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VerifyResponse {
    pub claims: Claims,
    /// Seconds of validity left.
    pub expires_in: i64,
}

/// Response payload for `GET /health`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}
