//! Content digest of a collection.
//!
//! A SHA-256 hash over every key and scalar value in slot order. Two
//! collections with equal digests hold the same entries in the same order.
//! Name, version and ordering mode are not part of the content.
//!
//! ## Layout
//!
//! ```text
//! count (u64 LE)
//! per entry: key bytes | value tag (u8) | value bytes
//! ```
//!
//! | Value    | Bytes |
//! |----------|-------|
//! | `None`   | none |
//! | `Data`   | none (opaque) |
//! | `Str`    | length (u64 LE) + UTF-8 |
//! | `Num`    | i64 LE |
//! | `Double` | IEEE-754 bits, u64 LE |
//! | `List`   | key kind byte (0 str, 1 num), then the nested collection's digest |

use sha2::{Digest, Sha256};

use crate::collection::Collection;
use crate::types::{CollectionKey, KeyKind, Value};

impl<K: CollectionKey, D> Collection<K, D> {
    /// Compute the 32-byte content digest
    pub fn content_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((self.len() as u64).to_le_bytes());

        for (key, value) in self.iter() {
            key.digest_into(&mut hasher);
            hasher.update([value.kind().to_u8()]);
            match value {
                Value::None | Value::Data(_) => {}
                Value::Str(s) => {
                    hasher.update((s.len() as u64).to_le_bytes());
                    hasher.update(s.as_bytes());
                }
                Value::Num(n) => hasher.update(n.to_le_bytes()),
                Value::Double(d) => hasher.update(d.to_bits().to_le_bytes()),
                Value::List(list) => {
                    hasher.update([match list.key_kind() {
                        KeyKind::Str => 0u8,
                        KeyKind::Num => 1u8,
                    }]);
                    hasher.update(list.content_digest());
                }
            }
        }

        let mut digest = [0u8; 32];
        digest.copy_from_slice(&hasher.finalize());
        digest
    }

    /// Get the content digest as a hex string
    pub fn content_digest_hex(&self) -> String {
        hex::encode(self.content_digest())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
