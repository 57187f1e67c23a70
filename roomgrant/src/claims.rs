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

//! Room access token (JWT) claims.
//!
//! The issuing service signs these claims with a shared secret (HMAC-SHA256);
//! the media gateway validates the signature and reads the grant back out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grant::VideoGrant;

/// JWT payload for a room access token.
///
/// Field order is the serialization order, so the encoded payload is
/// deterministic for identical inputs.
///
/// # Example payload
///
/// ```json
/// {
///   "sub": "alice",
///   "name": "Alice",
///   "iss": "APIdemo",
///   "iat": 1707004800,
///   "nbf": 1707004800,
///   "exp": 1707026400,
///   "video": {
///     "roomJoin": true,
///     "room": "demo-room",
///     "canPublish": true,
///     "canSubscribe": true,
///     "canPublishData": true
///   }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Participant identity, unique within the caller's system.
    #[serde(rename = "sub")]
    pub subject: String,

    /// Display name shown to other participants.
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// The api key whose secret signed this token.
    #[serde(rename = "iss")]
    pub issuer: String,

    /// Issue time (Unix seconds).
    #[serde(rename = "iat")]
    pub issued_at: i64,

    /// Not valid before this time (Unix seconds). Equal to `iat` for tokens
    /// issued here.
    #[serde(rename = "nbf")]
    pub not_before: i64,

    /// Expiration time (Unix seconds). Rejected strictly after this instant.
    #[serde(rename = "exp")]
    pub expires_at: i64,

    /// Room permissions.
    #[serde(rename = "video")]
    pub grants: VideoGrant,
}

impl Claims {
    pub fn room(&self) -> &str {
        &self.grants.room
    }

    pub fn can_publish(&self) -> bool {
        self.grants.room_join && self.grants.can_publish
    }

    pub fn can_subscribe(&self) -> bool {
        self.grants.room_join && self.grants.can_subscribe
    }

    pub fn can_publish_data(&self) -> bool {
        self.grants.room_join && self.grants.can_publish_data
    }

    /// Display name, falling back to the identity.
    pub fn display_name_or_subject(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.subject)
    }

    /// Seconds left before expiry at `now`; zero once expired.
    pub fn expires_in(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now.timestamp()).max(0)
    }
}
