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

//! API error body.
//!
//! Every failed API response is returned as `APIResponse<APIError>` with `success: false`.

use serde::{Deserialize, Serialize};

/// Structured error returned in the `result` field of a failed [`super::APIResponse`].
///
/// The `code` field is a machine-readable identifier (e.g. `"TOKEN_EXPIRED"`).
/// The `message` field is a human-readable description suitable for display.
/// The `engineering_error` field carries debug-level detail and is only set
/// where it cannot leak key material.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct APIError {
    /// Machine-readable error code (e.g. `"MISSING_FIELDS"`, `"INVALID_SIGNATURE"`).
    pub code: String,

    /// Human-readable error message.
    pub message: String,

    /// Optional engineering-level detail for debugging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engineering_error: Option<String>,
}

impl APIError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            engineering_error: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.engineering_error = Some(detail.into());
        self
    }

    pub fn missing_fields() -> Self {
        Self::new("MISSING_FIELDS", "room and identity are required")
    }

    pub fn missing_token() -> Self {
        Self::new("MISSING_TOKEN", "token is required")
    }

    pub fn method_not_allowed() -> Self {
        Self::new("METHOD_NOT_ALLOWED", "Method not allowed")
    }

    pub fn not_found() -> Self {
        Self::new("NOT_FOUND", "Not found")
    }

    pub fn internal_error() -> Self {
        Self::new("INTERNAL_ERROR", "Failed to generate token")
    }
}

impl std::fmt::Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for APIError {}
