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

//! Room access token validation.
//!
//! What a media gateway runs before letting a client in: parse the JWT,
//! pick the secret named by its `kid`, verify the HMAC, check the validity
//! window against the supplied clock, and finally (see [`authorize_join`])
//! make sure the grant covers the room and identity being requested.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

use crate::claims::Claims;
use crate::error::{AdmissionError, TokenError};
use crate::key::KeyProvider;

/// Decode and validate a room access token at time `now`.
///
/// Checks, in order:
/// 1. Three segments, decodable header declaring `HS256`
/// 2. The api key (`kid`, or the provider's only key) is known
/// 3. Signature is valid (HMAC-SHA256, constant-time comparison)
/// 4. `iss` equals the api key used
/// 5. Claims have the expected shape and a consistent grant
/// 6. `nbf <= now <= exp`
///
/// On success the claims are returned exactly as they were signed.
pub fn verify_token<K: KeyProvider + ?Sized>(
    keys: &K,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Claims, TokenError> {
    if token.split('.').count() != 3 {
        return Err(TokenError::MalformedToken(
            "expected three dot-separated segments".to_string(),
        ));
    }

    let header = decode_header(token).map_err(|e| TokenError::MalformedToken(e.to_string()))?;
    if header.alg != Algorithm::HS256 {
        return Err(TokenError::MalformedToken(format!(
            "unsupported algorithm {:?}",
            header.alg
        )));
    }

    let api_key = match header.kid.as_deref() {
        Some(kid) => kid,
        None => keys
            .sole_key()
            .ok_or_else(|| TokenError::MalformedToken("token does not name an api key".into()))?,
    };
    let secret = keys
        .secret_for(api_key)
        .ok_or_else(|| TokenError::UnknownApiKey(api_key.to_string()))?;

    // Time checks are done below against `now`, not the system clock.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.set_required_spec_claims(&["sub", "iss", "exp", "nbf"]);
    validation.set_issuer(&[api_key]);

    let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidIssuer => TokenError::SignatureMismatch,
            _ => TokenError::MalformedToken(e.to_string()),
        })?
        .claims;

    claims
        .grants
        .validate()
        .map_err(|e| TokenError::MalformedToken(e.to_string()))?;
    if claims.subject.trim().is_empty() {
        return Err(TokenError::MalformedToken("empty subject".to_string()));
    }

    let now = now.timestamp();
    if now < claims.not_before {
        return Err(TokenError::TokenNotYetValid);
    }
    if now > claims.expires_at {
        return Err(TokenError::TokenExpired);
    }

    Ok(claims)
}

/// Check that verified claims admit their holder to `room`.
///
/// When `identity` is given (e.g. from the connection URL) it must match the
/// token subject as well.
pub fn authorize_join(
    claims: &Claims,
    room: &str,
    identity: Option<&str>,
) -> Result<(), AdmissionError> {
    if !claims.grants.room_join {
        return Err(AdmissionError::RoomJoinDenied);
    }

    if claims.grants.room != room {
        return Err(AdmissionError::RoomMismatch {
            token_room: claims.grants.room.clone(),
            requested_room: room.to_string(),
        });
    }

    if let Some(identity) = identity {
        if claims.subject != identity {
            return Err(AdmissionError::IdentityMismatch {
                token_identity: claims.subject.clone(),
                requested_identity: identity.to_string(),
            });
        }
    }

    Ok(())
}
