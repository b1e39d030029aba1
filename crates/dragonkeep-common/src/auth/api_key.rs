//! Static shared secret for the dashboard API
//!
//! The dashboard sends the secret verbatim in the `x-api-key` header. There is
//! no user model behind it: a request either carries the secret or it does not.

use std::fmt;

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared secret compared against the `x-api-key` header
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSecret(String);

impl ApiSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Compare a presented key without short-circuiting on the first differing byte
    pub fn matches(&self, presented: &str) -> bool {
        let expected = self.0.as_bytes();
        let presented = presented.as_bytes();
        if expected.is_empty() || expected.len() != presented.len() {
            return false;
        }
        expected
            .iter()
            .zip(presented)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecret(<redacted>)")
    }
}
