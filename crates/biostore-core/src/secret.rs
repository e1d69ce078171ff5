//! Secret payloads in transit between the channel and a backend.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Credential contents, wiped when dropped and redacted in `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the plaintext.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretString").field(&"[REDACTED]").finish()
    }
}

/// Compares without short-circuiting on the first differing byte.
impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.0.as_bytes(), other.0.as_bytes());
        a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
    }
}

impl Eq for SecretString {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let secret = SecretString::new("secret-xyz");
        let shown = format!("{:?}", secret);
        assert_eq!(shown, "SecretString(\"[REDACTED]\")");
        assert!(!shown.contains("xyz"));
    }

    #[test]
    fn test_expose() {
        assert_eq!(SecretString::new("secret-xyz").expose_secret(), "secret-xyz");
    }

    #[test]
    fn test_equality() {
        assert_eq!(SecretString::new("a"), SecretString::new("a"));
        assert_ne!(SecretString::new("a"), SecretString::new("b"));
        assert_ne!(SecretString::new("ab"), SecretString::new("a"));
    }

    #[test]
    fn test_zeroize_clears_value() {
        let mut secret = SecretString::new("secret-xyz");
        secret.zeroize();
        assert_eq!(secret.expose_secret(), "");
    }
}
