//! Hash map construction shared by the lookup tables
//!
//! The mail vocabulary and the scheduler's track map are keyed by small
//! strings and enums; both use ahash for fast lookups.

use ahash::RandomState;
use std::collections::HashMap;

/// Map type used throughout the crate
pub type FastMap<K, V> = HashMap<K, V, RandomState>;

/// Create a new `HashMap` with the crate's hasher
///
/// # Example
///
/// ```rust
/// use danmaku_core::utils::hashers::create_hash_map;
///
/// let mut map = create_hash_map::<&str, u32>();
/// map.insert("ue", 1);
/// assert_eq!(map.get("ue"), Some(&1));
/// ```
#[must_use]
pub fn create_hash_map<K, V>() -> FastMap<K, V> {
    HashMap::with_hasher(RandomState::new())
}

/// Create a new `HashMap` with specific capacity and the crate's hasher
///
/// Pre-allocates the specified capacity to avoid rehashing while a table
/// of known size is being filled.
#[must_use]
pub fn create_hash_map_with_capacity<K, V>(capacity: usize) -> FastMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, RandomState::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_map_with_capacity_preallocates() {
        let map = create_hash_map_with_capacity::<u8, u8>(64);
        assert!(map.capacity() >= 64);
        assert!(map.is_empty());
    }
}
