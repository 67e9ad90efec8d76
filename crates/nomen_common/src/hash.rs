//! Content hashing for detecting edits computed against outdated file text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit XXH3 hash of a source file's text.
///
/// Every file touched by an edit set is stamped with the hash of the text the
/// edits were computed against. Applying the edit set to a file whose hash no
/// longer matches is refused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }

    /// Computes a content hash of UTF-8 text.
    pub fn of_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = ContentHash::of_text("class Bad : IStrategy { }");
        let b = ContentHash::of_text("class Bad : IStrategy { }");
        assert_eq!(a, b);
    }

    #[test]
    fn single_edit_changes_hash() {
        let a = ContentHash::of_text("class Bad : IStrategy { }");
        let b = ContentHash::of_text("class BadStrategy : IStrategy { }");
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_hex() {
        let h = ContentHash::of_text("test");
        let s = format!("{h}");
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn debug_abbreviated() {
        let s = format!("{:?}", ContentHash::of_text("test"));
        assert!(s.starts_with("ContentHash("));
    }
}
