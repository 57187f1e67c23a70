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

//! Handlers that issue and check room access tokens.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{Duration, Utc};
use roomgrant::{
    authorize_join, build_claims, new_grant, sign_claims, GrantPermissions, TokenOptions,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::types::{
    requests::{TokenRequest, VerifyRequest},
    responses::{APIResponse, TokenResponse, VerifyResponse},
};

/// POST /token
///
/// Issues a token for `identity` to join `room`. Every capability defaults
/// to allowed; `name` defaults to the identity.
pub async fn issue(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<APIResponse<TokenResponse>>, AppError> {
    let Json(req) = payload?;
    let (room, identity) = req.required_fields().ok_or_else(AppError::missing_fields)?;

    let defaults = GrantPermissions::default();
    let grant = new_grant(
        room,
        GrantPermissions {
            can_publish: req.can_publish.unwrap_or(defaults.can_publish),
            can_subscribe: req.can_subscribe.unwrap_or(defaults.can_subscribe),
            can_publish_data: req.can_publish_data.unwrap_or(defaults.can_publish_data),
        },
    )?;

    let display_name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(identity);
    let options = TokenOptions::default()
        .with_display_name(display_name)
        .with_ttl(Duration::seconds(state.token_ttl_secs));

    let claims = build_claims(&state.signing_key, identity, &grant, &options, Utc::now())?;
    let token = sign_claims(&state.signing_key, &claims)?;

    tracing::info!(identity, room, "issued room token");

    Ok(Json(APIResponse::ok(TokenResponse {
        token,
        server_url: state.server_url.clone(),
        identity: identity.to_string(),
        room: room.to_string(),
        expires_at: claims.expires_at,
    })))
}

/// POST /verify
///
/// Checks a presented token against the configured keys at the current time.
/// With `room` (and optionally `identity`) it also runs the admission check
/// a media gateway would apply before letting the client in.
pub async fn verify(
    State(state): State<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<APIResponse<VerifyResponse>>, AppError> {
    let Json(req) = payload?;
    let token = req
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(AppError::missing_token)?;

    let now = Utc::now();
    let claims = roomgrant::verify_token(&*state.verification_keys, token, now)
        .inspect_err(|e| tracing::debug!("token rejected: {e}"))?;

    if let Some(room) = req.room.as_deref() {
        authorize_join(&claims, room, req.identity.as_deref())?;
    }

    let expires_in = claims.expires_in(now);
    Ok(Json(APIResponse::ok(VerifyResponse { claims, expires_in })))
}
