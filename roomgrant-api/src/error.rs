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

//! Application error type that implements Axum's `IntoResponse`.
//!
//! Every error is returned as `APIResponse<APIError>` with `success: false`,
//! paired with the appropriate HTTP status code.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roomgrant::{AdmissionError, TokenError};

use crate::types::{APIError, APIResponse};

/// Application-level error that pairs an HTTP status code with an [`APIError`].
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: APIError,
}

impl AppError {
    pub fn new(status: StatusCode, body: APIError) -> Self {
        Self { status, body }
    }

    pub fn missing_fields() -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::missing_fields())
    }

    pub fn missing_token() -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::missing_token())
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, APIError::internal_error())
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, APIError::method_not_allowed())
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, APIError::not_found())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = APIResponse::error(self.body);
        (self.status, Json(body)).into_response()
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        let message = err.to_string();
        let (status, body) = match err {
            TokenError::InvalidIdentity => (
                StatusCode::BAD_REQUEST,
                APIError::new("INVALID_IDENTITY", message),
            ),
            TokenError::InvalidGrant(_) => (
                StatusCode::BAD_REQUEST,
                APIError::new("INVALID_GRANT", message),
            ),
            TokenError::InvalidTTL => (StatusCode::BAD_REQUEST, APIError::new("INVALID_TTL", message)),
            TokenError::MalformedToken(detail) => (
                StatusCode::UNAUTHORIZED,
                APIError::new("MALFORMED_TOKEN", "malformed token").with_detail(detail),
            ),
            TokenError::SignatureMismatch => (
                StatusCode::UNAUTHORIZED,
                APIError::new("INVALID_SIGNATURE", message),
            ),
            TokenError::UnknownApiKey(_) => (
                StatusCode::UNAUTHORIZED,
                APIError::new("UNKNOWN_API_KEY", message),
            ),
            TokenError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                APIError::new("TOKEN_EXPIRED", message),
            ),
            TokenError::TokenNotYetValid => (
                StatusCode::UNAUTHORIZED,
                APIError::new("TOKEN_NOT_YET_VALID", message),
            ),
            TokenError::SigningFailure(_) => {
                tracing::error!("Token generation error: {message}");
                return Self::internal();
            }
        };
        Self::new(status, body)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let detail = rejection.body_text();
        match rejection {
            JsonRejection::MissingJsonContentType(_) => Self::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                APIError::new("UNSUPPORTED_MEDIA_TYPE", "expected an application/json body")
                    .with_detail(detail),
            ),
            _ => Self::new(
                StatusCode::BAD_REQUEST,
                APIError::new(
                    "INVALID_REQUEST",
                    "request body is not valid JSON for this endpoint",
                )
                .with_detail(detail),
            ),
        }
    }
}

impl From<AdmissionError> for AppError {
    fn from(err: AdmissionError) -> Self {
        let code = match &err {
            AdmissionError::RoomJoinDenied => "ROOM_JOIN_DENIED",
            AdmissionError::RoomMismatch { .. } => "ROOM_MISMATCH",
            AdmissionError::IdentityMismatch { .. } => "IDENTITY_MISMATCH",
        };
        Self::new(StatusCode::FORBIDDEN, APIError::new(code, err.to_string()))
    }
}
