use std::fmt;

/// Associative lookup shared by both memoization stores.
///
/// The wrapper only ever talks to a store through `has`, `get` and `set`.
/// A hit is `has` followed by `get` and never mutates the store.
///
/// # Examples
///
/// ```
/// use memento_core::{BoundedStore, CacheKey, MemoStore};
///
/// let mut store = BoundedStore::new(2);
/// assert!(!store.has(&CacheKey::Int(1)));
///
/// store.set(CacheKey::Int(1), "one");
/// assert!(store.has(&CacheKey::Int(1)));
/// assert_eq!(store.get(&CacheKey::Int(1)), Some(&"one"));
/// ```
pub trait MemoStore<V> {
    type Key;

    /// Returns `true` if a live entry exists for `key`.
    fn has(&self, key: &Self::Key) -> bool;

    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &Self::Key) -> Option<&V>;

    /// Stores `value` under `key`.
    ///
    /// Returns the entry evicted to make room for it, if the store had to
    /// evict one.
    fn set(&mut self, key: Self::Key, value: V) -> Option<(Self::Key, V)>;

    /// Number of entries currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which of the two stores a call was routed to.
///
/// * `Identity` - single object-like argument, no resolver; keyed by reference
/// * `Bounded` - everything else; keyed by value, insertion ordered, capped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Identity,
    Bounded,
}

impl StoreKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Identity => "identity",
            StoreKind::Bounded => "bounded",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
