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

//! Room access token generation.
//!
//! The issuing service signs tokens with the api secret; the media gateway
//! validates the signature and extracts the claims (see [`crate::verify`]).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::claims::Claims;
use crate::error::TokenError;
use crate::grant::VideoGrant;
use crate::key::SigningKeyPair;

/// Default token lifetime: six hours.
pub const DEFAULT_TTL: Duration = Duration::hours(6);

/// Optional issuance parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOptions {
    /// Display name written to the `name` claim.
    pub display_name: Option<String>,
    /// How long the token stays valid. Must be positive.
    pub ttl: Duration,
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            display_name: None,
            ttl: DEFAULT_TTL,
        }
    }
}

impl TokenOptions {
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Sign a room access token for `subject`, valid from now for `options.ttl`.
pub fn issue_token(
    key_pair: &SigningKeyPair,
    subject: &str,
    grant: &VideoGrant,
    options: &TokenOptions,
) -> Result<String, TokenError> {
    issue_token_at(key_pair, subject, grant, options, Utc::now())
}

/// Same as [`issue_token`] with the issue instant supplied by the caller.
///
/// Identical inputs produce byte-identical tokens.
pub fn issue_token_at(
    key_pair: &SigningKeyPair,
    subject: &str,
    grant: &VideoGrant,
    options: &TokenOptions,
    issued_at: DateTime<Utc>,
) -> Result<String, TokenError> {
    let claims = build_claims(key_pair, subject, grant, options, issued_at)?;
    sign_claims(key_pair, &claims)
}

/// Validate the inputs and assemble the claims that [`issue_token_at`] signs.
pub fn build_claims(
    key_pair: &SigningKeyPair,
    subject: &str,
    grant: &VideoGrant,
    options: &TokenOptions,
    issued_at: DateTime<Utc>,
) -> Result<Claims, TokenError> {
    if subject.trim().is_empty() {
        return Err(TokenError::InvalidIdentity);
    }
    grant.validate()?;

    let ttl_secs = ttl_seconds(options.ttl)?;
    let iat = issued_at.timestamp();
    let exp = iat
        .checked_add(ttl_secs)
        .ok_or(TokenError::InvalidTTL)?;

    Ok(Claims {
        subject: subject.to_string(),
        display_name: options.display_name.clone(),
        issuer: key_pair.api_key().to_string(),
        issued_at: iat,
        not_before: iat,
        expires_at: exp,
        grants: grant.clone(),
    })
}

// Whole seconds, rounding a fractional remainder up so a positive ttl never
// collapses to zero.
fn ttl_seconds(ttl: Duration) -> Result<i64, TokenError> {
    if ttl <= Duration::zero() {
        return Err(TokenError::InvalidTTL);
    }
    let secs = ttl.num_seconds();
    Ok(if ttl.subsec_nanos() > 0 { secs + 1 } else { secs })
}

/// Sign claims produced by [`build_claims`].
///
/// Lets a caller report fields such as `exp` from the exact claims it signed.
pub fn sign_claims(key_pair: &SigningKeyPair, claims: &Claims) -> Result<String, TokenError> {
    if key_pair.api_key().is_empty() {
        return Err(TokenError::SigningFailure("api key is empty".to_string()));
    }
    if key_pair.api_secret().is_empty() {
        return Err(TokenError::SigningFailure("api secret is empty".to_string()));
    }

    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(key_pair.api_key().to_string());

    let token = encode(
        &header,
        claims,
        &EncodingKey::from_secret(key_pair.api_secret()),
    )
    .map_err(|e| {
        tracing::error!("Failed to sign room token: {e}");
        TokenError::SigningFailure(e.to_string())
    })?;

    tracing::debug!(
        subject = %claims.subject,
        room = %claims.grants.room,
        expires_at = claims.expires_at,
        "issued room access token"
    );

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grant::{new_grant, GrantPermissions};
    use chrono::TimeZone;
    use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};

    const TEST_SECRET: &str = "super-secret-test-key";

    fn key() -> SigningKeyPair {
        SigningKeyPair::new("APItest", TEST_SECRET)
    }

    fn grant() -> VideoGrant {
        new_grant("room-42", GrantPermissions::default()).unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn decode_unchecked(token: &str) -> Claims {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims::<&str>(&[]);
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
            &validation,
        )
        .expect("should decode")
        .claims
    }

    #[test]
    fn token_carries_claims() {
        let options = TokenOptions::default().with_display_name("Alice");
        let token = issue_token_at(&key(), "user@test.com", &grant(), &options, at(1_000))
            .expect("should sign");

        let claims = decode_unchecked(&token);
        assert_eq!(claims.subject, "user@test.com");
        assert_eq!(claims.display_name.as_deref(), Some("Alice"));
        assert_eq!(claims.issuer, "APItest");
        assert_eq!(claims.grants, grant());
        assert_eq!(claims.issued_at, 1_000);
        assert_eq!(claims.not_before, 1_000);
        assert_eq!(claims.expires_at, 1_000 + 6 * 3600);
    }

    #[test]
    fn header_names_api_key() {
        let token =
            issue_token(&key(), "a", &grant(), &TokenOptions::default()).expect("should sign");
        let header = decode_header(&token).expect("header");
        assert_eq!(header.alg, Algorithm::HS256);
        assert_eq!(header.kid.as_deref(), Some("APItest"));
    }

    #[test]
    fn exp_is_now_plus_ttl() {
        let ttl = Duration::seconds(900);
        let before = Utc::now().timestamp();
        let token = issue_token(&key(), "a", &grant(), &TokenOptions::default().with_ttl(ttl))
            .expect("should sign");
        let after = Utc::now().timestamp();

        let claims = decode_unchecked(&token);
        assert!(claims.expires_at >= before + 900);
        assert!(claims.expires_at <= after + 900);
        assert_eq!(claims.expires_at - claims.issued_at, 900);
    }

    #[test]
    fn fractional_ttl_rounds_up() {
        let options = TokenOptions::default().with_ttl(Duration::milliseconds(1500));
        let claims = build_claims(&key(), "a", &grant(), &options, at(10)).unwrap();
        assert_eq!(claims.expires_at, 12);

        let options = TokenOptions::default().with_ttl(Duration::milliseconds(1));
        let claims = build_claims(&key(), "a", &grant(), &options, at(10)).unwrap();
        assert_eq!(claims.expires_at, 11);
    }

    #[test]
    fn rejects_bad_inputs() {
        let opts = TokenOptions::default();
        assert_eq!(
            issue_token(&key(), "", &grant(), &opts),
            Err(TokenError::InvalidIdentity)
        );
        assert_eq!(
            issue_token(&key(), "  ", &grant(), &opts),
            Err(TokenError::InvalidIdentity)
        );

        let bad_grant = VideoGrant {
            room_join: true,
            ..Default::default()
        };
        assert!(matches!(
            issue_token(&key(), "a", &bad_grant, &opts),
            Err(TokenError::InvalidGrant(_))
        ));

        for ttl in [Duration::zero(), Duration::seconds(-5)] {
            assert_eq!(
                issue_token(&key(), "a", &grant(), &opts.clone().with_ttl(ttl)),
                Err(TokenError::InvalidTTL)
            );
        }
    }

    #[test]
    fn empty_secret_is_signing_failure() {
        let blank = SigningKeyPair::new("APItest", "");
        let err = issue_token(&blank, "a", &grant(), &TokenOptions::default()).unwrap_err();
        assert!(matches!(err, TokenError::SigningFailure(_)));

        let nameless = SigningKeyPair::new("", TEST_SECRET);
        let err = issue_token(&nameless, "a", &grant(), &TokenOptions::default()).unwrap_err();
        assert!(matches!(err, TokenError::SigningFailure(_)));
    }

    #[test]
    fn signing_built_claims_matches_issue() {
        let opts = TokenOptions::default().with_ttl(Duration::milliseconds(2500));
        let claims = build_claims(&key(), "alice", &grant(), &opts, at(7_000)).unwrap();
        assert_eq!(claims.expires_at, 7_003);

        let token = sign_claims(&key(), &claims).unwrap();
        assert_eq!(
            token,
            issue_token_at(&key(), "alice", &grant(), &opts, at(7_000)).unwrap()
        );
        assert_eq!(decode_unchecked(&token), claims);
    }

    #[test]
    fn same_instant_same_token() {
        let opts = TokenOptions::default().with_display_name("Alice");
        let a = issue_token_at(&key(), "alice", &grant(), &opts, at(5_000)).unwrap();
        let b = issue_token_at(&key(), "alice", &grant(), &opts, at(5_000)).unwrap();
        assert_eq!(a, b);

        let c = issue_token_at(&key(), "alice", &grant(), &opts, at(5_001)).unwrap();
        assert_ne!(a, c);
    }
}
