//! Canonical state keys.
//!
//! Visited and closed sets never hash a state directly. They hash its
//! canonical key, which depends only on the state's content: a sequence
//! maps to itself, a mapping maps to its entries sorted by key. Two
//! mappings with equal content therefore share a key regardless of the
//! container or its insertion order.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

/// A state that can be reduced to a structural key.
pub trait Canonicalize {
    /// The hashable key type.
    type Key: Hash + Eq + Clone + Debug;

    /// Returns the canonical key of this state.
    fn canonical_key(&self) -> Self::Key;
}

/// Canonical key of `state`. Used by every algorithm for visited-set and
/// best-distance bookkeeping.
pub fn state_key<S: Canonicalize + ?Sized>(state: &S) -> S::Key {
    state.canonical_key()
}

impl<T> Canonicalize for Vec<T>
where
    T: Hash + Eq + Clone + Debug,
{
    type Key = Vec<T>;

    fn canonical_key(&self) -> Vec<T> {
        self.clone()
    }
}

impl<K, V> Canonicalize for BTreeMap<K, V>
where
    K: Ord + Hash + Clone + Debug,
    V: Hash + Eq + Clone + Debug,
{
    type Key = Vec<(K, V)>;

    fn canonical_key(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K, V, H> Canonicalize for HashMap<K, V, H>
where
    K: Ord + Hash + Clone + Debug,
    V: Hash + Eq + Clone + Debug,
{
    type Key = Vec<(K, V)>;

    fn canonical_key(&self) -> Vec<(K, V)> {
        let mut entries: Vec<(K, V)> = self.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
