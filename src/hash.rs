//! Deterministic hash functions to hand to [`OpenAddressingMap`](crate::OpenAddressingMap).
//!
//! The map only ever asks for a signed integer per key. Anything deterministic works,
//! these are the ones the driver, benches and tests use.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Returns the key itself. Makes probe layouts easy to reason about in tests.
pub fn identity(key: &i64) -> i64 {
    *key
}

/// FNV-1a over the key's bytes.
pub fn fnv1a<K: AsRef<[u8]> + ?Sized>(key: &K) -> i64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in key.as_ref() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash as i64
}

/// SipHash via [`DefaultHasher::new`], which always starts from the same keys.
/// Stable within one build, not across Rust releases.
pub fn std_hash<K: Hash + ?Sized>(key: &K) -> i64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_known_vectors() {
        assert_eq!(fnv1a(""), FNV_OFFSET_BASIS as i64);
        assert_eq!(fnv1a("a"), 0xaf63dc4c8601ec8cu64 as i64);
        assert_eq!(fnv1a("foobar"), 0x85944171f73967e8u64 as i64);
    }

    #[test]
    fn fnv1a_string_and_str_agree() {
        let owned = String::from("genshin");
        assert_eq!(fnv1a(&owned), fnv1a("genshin"));
    }

    #[test]
    fn std_hash_is_deterministic() {
        assert_eq!(std_hash(&42u64), std_hash(&42u64));
        assert_eq!(std_hash("key"), std_hash("key"));
        assert_ne!(std_hash("key"), std_hash("kez"));
    }

    #[test]
    fn identity_passes_through() {
        assert_eq!(identity(&-7), -7);
        assert_eq!(identity(&i64::MIN), i64::MIN);
    }
}
