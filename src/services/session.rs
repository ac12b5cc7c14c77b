//! Admin session tokens.
//!
//! TRADE-OFFS
//! ==========
//! Tokens live in process memory only. A restart logs every operator out,
//! which is acceptable for a single-operator admin surface.
//!
//! Each token carries its own expiry. Expired tokens are rejected on
//! validate and pruned whenever a new token is issued.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use rand::Rng;

/// Lifetime of an admin session, server side and cookie `Max-Age` alike.
pub const SESSION_HOURS: i64 = 12;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[derive(Clone)]
pub struct AdminSessions {
    tokens: Arc<Mutex<HashMap<String, Instant>>>,
    ttl: Duration,
}

impl Default for AdminSessions {
    fn default() -> Self {
        Self::with_ttl(Duration::from_secs(SESSION_HOURS.unsigned_abs() * 3600))
    }
}

impl AdminSessions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { tokens: Arc::new(Mutex::new(HashMap::new())), ttl }
    }

    /// Issue a new session token, dropping any that have expired.
    #[must_use]
    pub fn create(&self) -> String {
        let token = generate_token();
        let now = Instant::now();
        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        tokens.retain(|_, expires_at| *expires_at > now);
        tokens.insert(token.clone(), now + self.ttl);
        token
    }

    #[must_use]
    pub fn validate(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .is_some_and(|expires_at| *expires_at > Instant::now())
    }

    /// Forget a token. Returns whether it was known.
    pub fn revoke(&self, token: &str) -> bool {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
            .is_some()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
