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

//! Error types for token issuance, verification and room admission.

use thiserror::Error;

/// Errors produced while issuing or verifying a room access token.
///
/// Transport adapters map these to their own responses. Issuance input
/// errors are the caller's fault, verification failures mean the presented
/// credential must be refused, and [`TokenError::SigningFailure`] is a
/// server-side problem.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The participant identity (`sub`) is empty.
    #[error("identity must not be empty")]
    InvalidIdentity,

    /// The grant violates the grant invariants (e.g. `room_join` without a room).
    #[error("invalid grant: {0}")]
    InvalidGrant(String),

    /// The token lifetime is zero or negative.
    #[error("token ttl must be positive")]
    InvalidTTL,

    /// The key pair is unusable or the signing primitive failed.
    #[error("failed to sign token: {0}")]
    SigningFailure(String),

    /// The token is not a well-formed three-part JWT with the expected claims.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The signature does not match the claims under the declared key.
    #[error("token signature mismatch")]
    SignatureMismatch,

    /// The token names an api key that this verifier does not hold.
    #[error("unknown api key '{0}'")]
    UnknownApiKey(String),

    /// `now` is past the `exp` claim.
    #[error("token has expired")]
    TokenExpired,

    /// `now` is before the `nbf` claim.
    #[error("token is not valid yet")]
    TokenNotYetValid,
}

impl TokenError {
    /// `true` for errors caused by bad issuance input (bad request).
    pub fn is_issuance_input(&self) -> bool {
        matches!(
            self,
            TokenError::InvalidIdentity | TokenError::InvalidGrant(_) | TokenError::InvalidTTL
        )
    }

    /// `true` for errors that mean a presented token must be refused.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            TokenError::MalformedToken(_)
                | TokenError::SignatureMismatch
                | TokenError::UnknownApiKey(_)
                | TokenError::TokenExpired
                | TokenError::TokenNotYetValid
        )
    }
}

/// Reasons a verified token still does not admit its holder to a room.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    /// The `roomJoin` grant is `false`.
    #[error("token does not grant room join permission")]
    RoomJoinDenied,

    /// The granted room is not the room being entered.
    #[error("token room '{token_room}' does not match requested room '{requested_room}'")]
    RoomMismatch {
        token_room: String,
        requested_room: String,
    },

    /// The token subject is not the identity the connection claims.
    #[error("token identity '{token_identity}' does not match '{requested_identity}'")]
    IdentityMismatch {
        token_identity: String,
        requested_identity: String,
    },
}
