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

//! Signed room access tokens for real-time media servers.
//!
//! A token authorizes one participant to join one room with a set of
//! capabilities (publish, subscribe, send data) until it expires. It is a
//! self-contained HS256 JWT: the gateway needs only the shared secret and a
//! clock to check it, and nothing is stored when one is issued.
//!
//! ```no_run
//! use roomgrant::{issue_token, new_grant, verify_token, GrantPermissions, SigningKeyPair, TokenOptions};
//!
//! let key = SigningKeyPair::new("APIdemo", "secret");
//! let grant = new_grant("demo-room", GrantPermissions::default())?;
//! let token = issue_token(&key, "alice", &grant, &TokenOptions::default())?;
//!
//! let claims = verify_token(&key, &token, chrono::Utc::now())?;
//! assert_eq!(claims.subject, "alice");
//! # Ok::<(), roomgrant::TokenError>(())
//! ```
//!
//! This crate has no transport: HTTP and CLI front ends live in their own
//! crates and call [`issue_token`] / [`verify_token`] directly.

pub mod claims;
pub mod error;
pub mod grant;
pub mod issue;
pub mod key;
pub mod verify;

pub use claims::Claims;
pub use error::{AdmissionError, TokenError};
pub use grant::{new_grant, GrantPermissions, VideoGrant};
pub use issue::{
    build_claims, issue_token, issue_token_at, sign_claims, TokenOptions, DEFAULT_TTL,
};
pub use key::{KeyProvider, KeySet, SigningKeyPair};
pub use verify::{authorize_join, verify_token};
