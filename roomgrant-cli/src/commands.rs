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

use anyhow::Context;
use chrono::{DateTime, Utc};
use roomgrant::{
    authorize_join, issue_token_at, new_grant, verify_token, GrantPermissions, SigningKeyPair,
    TokenOptions,
};
use tracing::debug;

use crate::cli_args::{Issue, Keys, Verify};

impl Keys {
    pub fn key_pair(&self) -> SigningKeyPair {
        SigningKeyPair::new(self.api_key.as_str(), self.api_secret.as_bytes())
    }
}

/// Sign a token for the participant described by `args`.
pub fn issue(args: &Issue, now: DateTime<Utc>) -> anyhow::Result<String> {
    let grant = new_grant(
        &args.room,
        GrantPermissions {
            can_publish: !args.no_publish,
            can_subscribe: !args.no_subscribe,
            can_publish_data: !args.no_publish_data,
        },
    )?;

    let options = TokenOptions::default()
        .with_display_name(args.name.as_deref().unwrap_or(&args.identity))
        .with_ttl(args.ttl.0);

    let token = issue_token_at(&args.keys.key_pair(), &args.identity, &grant, &options, now)
        .context("failed to issue token")?;
    debug!(identity = %args.identity, room = %args.room, "issued token");
    Ok(token)
}

/// Verify the token in `args` and render its claims as pretty JSON.
pub fn verify(args: &Verify, now: DateTime<Utc>) -> anyhow::Result<String> {
    let key_pair = args.keys.key_pair();
    let claims = verify_token(&key_pair, &args.token, now).context("token rejected")?;

    if let Some(room) = args.room.as_deref() {
        authorize_join(&claims, room, args.identity.as_deref())
            .context("token does not admit this participant")?;
    }

    Ok(serde_json::to_string_pretty(&claims)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli_args::Ttl;
    use chrono::{Duration, TimeZone};
    use roomgrant::TokenError;

    fn keys() -> Keys {
        Keys {
            api_key: "APIdemo".to_string(),
            api_secret: "cli-test-secret".to_string(),
        }
    }

    fn issue_args() -> Issue {
        Issue {
            keys: keys(),
            room: "demo-room".to_string(),
            identity: "alice".to_string(),
            name: None,
            no_publish: false,
            no_subscribe: false,
            no_publish_data: true,
            ttl: Ttl(Duration::minutes(10)),
        }
    }

    fn verify_args(token: String) -> Verify {
        Verify {
            keys: keys(),
            token,
            room: None,
            identity: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn issued_token_verifies_and_prints_claims() {
        let token = issue(&issue_args(), now()).unwrap();
        let printed = verify(&verify_args(token), now() + Duration::minutes(5)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&printed).unwrap();

        assert_eq!(json["sub"], "alice");
        assert_eq!(json["name"], "alice");
        assert_eq!(json["iss"], "APIdemo");
        assert_eq!(json["video"]["room"], "demo-room");
        assert_eq!(json["video"]["canPublishData"], false);
        assert_eq!(json["exp"], now().timestamp() + 600);
    }

    #[test]
    fn expired_token_is_reported() {
        let token = issue(&issue_args(), now()).unwrap();
        let err = verify(&verify_args(token), now() + Duration::minutes(11)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TokenError>(),
            Some(&TokenError::TokenExpired)
        );
    }

    #[test]
    fn wrong_room_is_rejected() {
        let token = issue(&issue_args(), now()).unwrap();
        let mut args = verify_args(token);
        args.room = Some("other-room".to_string());
        assert!(verify(&args, now()).is_err());
    }

    #[test]
    fn matching_room_and_identity_pass() {
        let token = issue(&issue_args(), now()).unwrap();
        let mut args = verify_args(token);
        args.room = Some("demo-room".to_string());
        args.identity = Some("alice".to_string());
        assert!(verify(&args, now()).is_ok());
    }

    #[test]
    fn empty_identity_fails_to_issue() {
        let mut args = issue_args();
        args.identity = "  ".to_string();
        let err = issue(&args, now()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TokenError>(),
            Some(&TokenError::InvalidIdentity)
        );
    }
}
