//! Cache key generation

use std::fmt;

use sha2::{Digest, Sha256};

/// Deterministic cache key over (normalized request text, strategy tag).
///
/// Text is trimmed and lowercased before hashing. Both parts are
/// length-prefixed so no choice of text can collide with another split of
/// the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(text: &str, strategy: &str) -> Self {
        let normalized = normalize(text);

        let mut hasher = Sha256::new();
        hasher.update((normalized.len() as u64).to_be_bytes());
        hasher.update(normalized.as_bytes());
        hasher.update((strategy.len() as u64).to_be_bytes());
        hasher.update(strategy.as_bytes());

        Self(hex::encode(hasher.finalize()))
    }

    /// Hex-encoded digest
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalization applied to request text before fingerprinting
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let key = Fingerprint::new("hello", "heuristic");

        assert_eq!(key.as_str().len(), 64);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_whitespace_and_case_are_normalized() {
        let a = Fingerprint::new("  What is Rust?\n", "heuristic");
        let b = Fingerprint::new("what is rust?", "heuristic");

        assert_eq!(a, b);
    }

    #[test]
    fn test_strategy_changes_key() {
        let a = Fingerprint::new("what is rust?", "heuristic");
        let b = Fingerprint::new("what is rust?", "delegated");

        assert_ne!(a, b);
    }

    #[test]
    fn test_separator_cannot_be_forged() {
        let a = Fingerprint::new("a::b", "c");
        let b = Fingerprint::new("a", "b::c");

        assert_ne!(a, b);
    }

    #[test]
    fn test_inner_whitespace_is_significant() {
        let a = Fingerprint::new("what is rust", "heuristic");
        let b = Fingerprint::new("what  is rust", "heuristic");

        assert_ne!(a, b);
    }
}
