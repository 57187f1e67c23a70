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

//! Signing keys.
//!
//! A [`SigningKeyPair`] is an api key (public identifier, written into every
//! token) plus the HMAC secret it names. A verifier may hold several pairs at
//! once while secrets rotate; see [`KeySet`].

use std::collections::HashMap;
use std::fmt;

/// Looks up the HMAC secret for the api key a token declares.
pub trait KeyProvider {
    /// Secret for `api_key`, or `None` if the key is unknown or unusable.
    fn secret_for(&self, api_key: &str) -> Option<&[u8]>;

    /// The only api key held, if there is exactly one. Used for tokens that
    /// do not declare a key id.
    fn sole_key(&self) -> Option<&str>;
}

/// The issuing service's api key and HMAC secret.
///
/// Loaded once at start-up and shared read-only. `Debug` never prints the
/// secret.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKeyPair {
    api_key: String,
    api_secret: Vec<u8>,
}

impl SigningKeyPair {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn api_secret(&self) -> &[u8] {
        &self.api_secret
    }
}

impl fmt::Debug for SigningKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeyPair")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

impl KeyProvider for SigningKeyPair {
    fn secret_for(&self, api_key: &str) -> Option<&[u8]> {
        (api_key == self.api_key && !self.api_secret.is_empty()).then_some(&self.api_secret[..])
    }

    fn sole_key(&self) -> Option<&str> {
        Some(&self.api_key)
    }
}

/// Immutable set of verification keys, indexed by api key.
#[derive(Clone, Default)]
pub struct KeySet {
    keys: HashMap<String, Vec<u8>>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key pair. Pairs with an empty secret are skipped, and a later
    /// pair with the same api key replaces the earlier one.
    pub fn with(mut self, pair: SigningKeyPair) -> Self {
        if !pair.api_secret.is_empty() {
            self.keys.insert(pair.api_key, pair.api_secret);
        }
        self
    }

    pub fn contains(&self, api_key: &str) -> bool {
        self.keys.contains_key(api_key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<SigningKeyPair> for KeySet {
    fn from_iter<T: IntoIterator<Item = SigningKeyPair>>(iter: T) -> Self {
        iter.into_iter().fold(KeySet::new(), KeySet::with)
    }
}

impl fmt::Debug for KeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.keys.keys().collect();
        ids.sort();
        f.debug_struct("KeySet").field("api_keys", &ids).finish()
    }
}

impl KeyProvider for KeySet {
    fn secret_for(&self, api_key: &str) -> Option<&[u8]> {
        self.keys.get(api_key).map(Vec::as_slice)
    }

    fn sole_key(&self) -> Option<&str> {
        if self.keys.len() == 1 {
            self.keys.keys().next().map(String::as_str)
        } else {
            None
        }
    }
}

impl<K: KeyProvider + ?Sized> KeyProvider for &K {
    fn secret_for(&self, api_key: &str) -> Option<&[u8]> {
        (**self).secret_for(api_key)
    }

    fn sole_key(&self) -> Option<&str> {
        (**self).sole_key()
    }
}
