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

//! Room-scoped permissions carried inside a token.

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// The `video` claim: what the holder may do inside one room.
///
/// Serialized in the camelCase shape media gateways expect:
///
/// ```json
/// {
///   "roomJoin": true,
///   "room": "demo-room",
///   "canPublish": true,
///   "canSubscribe": true,
///   "canPublishData": true
/// }
/// ```
///
/// Missing fields decode as `false` / empty so that grants from other
/// issuers still parse; [`VideoGrant::validate`] enforces the invariant.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoGrant {
    /// Must be `true` for the gateway to accept the connection.
    pub room_join: bool,

    /// The room the holder may join. Non-empty whenever `room_join` is set.
    pub room: String,

    /// May publish audio/video tracks.
    pub can_publish: bool,

    /// May subscribe to other participants' tracks.
    pub can_subscribe: bool,

    /// May send data messages (text chat and the like).
    pub can_publish_data: bool,
}

/// Capabilities requested for a new grant. Everything is allowed by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantPermissions {
    pub can_publish: bool,
    pub can_subscribe: bool,
    pub can_publish_data: bool,
}

impl Default for GrantPermissions {
    fn default() -> Self {
        Self {
            can_publish: true,
            can_subscribe: true,
            can_publish_data: true,
        }
    }
}

impl GrantPermissions {
    /// Subscribe-only: may watch and listen but not publish media or data.
    pub fn viewer() -> Self {
        Self {
            can_publish: false,
            can_subscribe: true,
            can_publish_data: false,
        }
    }
}

/// Build a join grant for `room` with the given capabilities.
pub fn new_grant(room: &str, permissions: GrantPermissions) -> Result<VideoGrant, TokenError> {
    let grant = VideoGrant {
        room_join: true,
        room: room.to_string(),
        can_publish: permissions.can_publish,
        can_subscribe: permissions.can_subscribe,
        can_publish_data: permissions.can_publish_data,
    };
    grant.validate()?;
    Ok(grant)
}

impl VideoGrant {
    /// Check the grant invariants.
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.room_join && self.room.trim().is_empty() {
            return Err(TokenError::InvalidGrant(
                "room must not be empty when room_join is granted".to_string(),
            ));
        }
        Ok(())
    }

    pub fn permissions(&self) -> GrantPermissions {
        GrantPermissions {
            can_publish: self.can_publish,
            can_subscribe: self.can_subscribe,
            can_publish_data: self.can_publish_data,
        }
    }
}
