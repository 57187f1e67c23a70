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

use std::str::FromStr;

use chrono::Duration;
use clap::{Args, Parser, Subcommand};
use thiserror::Error;

/// Room token CLI
///
/// Issues signed room access tokens and decodes/validates tokens with the
/// same api key and secret the media server uses.
#[derive(Parser, Debug)]
#[clap(name = "roomgrant")]
pub struct Opt {
    #[clap(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Issue a token that lets a participant join a room.
    Issue(Issue),

    /// Verify a token and print its claims.
    Verify(Verify),
}

#[derive(Args, Debug, Clone)]
pub struct Keys {
    /// Api key written into the token header and `iss` claim.
    #[clap(long = "api-key", env = "API_KEY")]
    pub api_key: String,

    /// Shared HMAC secret.
    #[clap(long = "api-secret", env = "API_SECRET", hide_env_values = true)]
    pub api_secret: String,
}

#[derive(Args, Debug, Clone)]
pub struct Issue {
    #[clap(flatten)]
    pub keys: Keys,

    /// Room to join.
    #[clap(long = "room")]
    pub room: String,

    /// Unique participant identity.
    #[clap(long = "identity")]
    pub identity: String,

    /// Display name. Defaults to the identity.
    #[clap(long = "name")]
    pub name: Option<String>,

    /// Do not allow publishing audio/video.
    #[clap(long = "no-publish")]
    pub no_publish: bool,

    /// Do not allow subscribing to other participants.
    #[clap(long = "no-subscribe")]
    pub no_subscribe: bool,

    /// Do not allow sending data messages.
    #[clap(long = "no-publish-data")]
    pub no_publish_data: bool,

    /// Token lifetime, e.g. `6h`, `90m`, `3600s` or plain seconds.
    #[arg(long = "ttl", default_value = "6h")]
    pub ttl: Ttl,
}

#[derive(Args, Debug, Clone)]
pub struct Verify {
    #[clap(flatten)]
    pub keys: Keys,

    /// The token to check.
    #[clap(long = "token")]
    pub token: String,

    /// Also require the token to admit its holder to this room.
    #[clap(long = "room")]
    pub room: Option<String>,

    /// Also require the token subject to be this identity (needs `--room`).
    #[clap(long = "identity", requires = "room")]
    pub identity: Option<String>,
}

/// A positive token lifetime parsed from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ttl(pub Duration);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseTtlError {
    #[error("Invalid ttl value: {0} (use e.g. 6h, 90m, 3600s)")]
    InvalidTtl(String),
}

impl FromStr for Ttl {
    type Err = ParseTtlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseTtlError::InvalidTtl(s.to_string());
        let s = s.trim();
        let (digits, unit_secs) = match s.char_indices().last() {
            Some((i, 's')) => (&s[..i], 1),
            Some((i, 'm')) => (&s[..i], 60),
            Some((i, 'h')) => (&s[..i], 3600),
            Some((i, 'd')) => (&s[..i], 86_400),
            Some(_) => (s, 1),
            None => return Err(invalid()),
        };
        let value: i64 = digits.parse().map_err(|_| invalid())?;
        let secs = value.checked_mul(unit_secs).ok_or_else(invalid)?;
        if secs <= 0 {
            return Err(invalid());
        }
        Duration::try_seconds(secs).map(Ttl).ok_or_else(invalid)
    }
}
