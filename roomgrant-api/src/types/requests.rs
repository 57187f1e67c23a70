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

//! Request bodies for the token service.
//!
//! Every field is optional at the serde level so that a missing `room` or
//! `identity` is reported as `MISSING_FIELDS` rather than a generic JSON
//! rejection.

use serde::{Deserialize, Serialize};

/// Request body for `POST /token`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TokenRequest {
    /// Room to join. Also accepted as `roomName`.
    #[serde(default, alias = "roomName")]
    pub room: Option<String>,

    /// Participant identity. Also accepted as `participantName`.
    #[serde(default, alias = "participantName")]
    pub identity: Option<String>,

    /// Display name. Defaults to the identity.
    #[serde(default)]
    pub name: Option<String>,

    /// Defaults to `true`.
    #[serde(default)]
    pub can_publish: Option<bool>,

    /// Defaults to `true`.
    #[serde(default)]
    pub can_subscribe: Option<bool>,

    /// Defaults to `true`.
    #[serde(default)]
    pub can_publish_data: Option<bool>,
}

impl TokenRequest {
    /// `(room, identity)` when both are present and non-blank.
    pub fn required_fields(&self) -> Option<(&str, &str)> {
        let room = self.room.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let identity = self
            .identity
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;
        Some((room, identity))
    }
}

/// Request body for `POST /verify`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct VerifyRequest {
    pub token: Option<String>,

    /// When set, the token must admit its holder to this room.
    #[serde(default)]
    pub room: Option<String>,

    /// When set together with `room`, the token subject must match.
    #[serde(default)]
    pub identity: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_field_names() {
        let req: TokenRequest =
            serde_json::from_str(r#"{"roomName":"r","participantName":"p"}"#).unwrap();
        assert_eq!(req.required_fields(), Some(("r", "p")));
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let req: TokenRequest = serde_json::from_str(r#"{"room":" ","identity":"p"}"#).unwrap();
        assert_eq!(req.required_fields(), None);

        let req: TokenRequest = serde_json::from_str(r#"{"room":"r"}"#).unwrap();
        assert_eq!(req.required_fields(), None);
    }
}
