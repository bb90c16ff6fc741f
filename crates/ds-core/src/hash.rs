//! Fast hash map and hash set type aliases.
//!
//! The style registry and the walker key everything by host node or style id,
//! which are short strings. The Fx hash from `rustc-hash` is a good fit for
//! those keys and no denial-of-service resistance is needed for data that
//! comes from the user's own document.
//!
//! # Examples
//!
//! ```
//! use ds_core::{FxHashMap, FxHashSet, fx_hash_map, fx_hash_set};
//!
//! let mut names: FxHashMap<String, String> = fx_hash_map();
//! names.insert("S:abc,".to_owned(), "Primary/500".to_owned());
//!
//! let seen: FxHashSet<&str> = fx_hash_set();
//! assert!(seen.is_empty());
//! ```

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// Creates a new empty [`FxHashMap`].
#[inline]
#[must_use]
pub fn fx_hash_map<K, V>() -> FxHashMap<K, V> {
    FxHashMap::default()
}

/// Creates a new empty [`FxHashSet`].
#[inline]
#[must_use]
pub fn fx_hash_set<V>() -> FxHashSet<V> {
    FxHashSet::default()
}
