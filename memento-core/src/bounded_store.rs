use std::collections::{HashMap, VecDeque};

use crate::store::MemoStore;
use crate::CacheKey;

/// Default maximum number of entries held by a [`BoundedStore`].
pub const MAX_MAP_ENTRIES: usize = 50;

/// Capacity-bounded store with insertion-ordered eviction.
///
/// Entries live in a `HashMap` while a `VecDeque` records the order in which
/// keys were first inserted. When an insertion pushes the store past its
/// capacity, exactly one entry is evicted: the one inserted earliest.
///
/// Lookups never reorder entries. Setting a key that is already present
/// replaces its value and keeps its original position in the queue.
///
/// # Examples
///
/// ```
/// use memento_core::{BoundedStore, CacheKey, MemoStore};
///
/// let mut store = BoundedStore::new(2);
/// store.set(CacheKey::Int(1), 10);
/// store.set(CacheKey::Int(2), 20);
///
/// // Third insertion evicts the oldest key
/// let evicted = store.set(CacheKey::Int(3), 30);
/// assert_eq!(evicted, Some((CacheKey::Int(1), 10)));
/// assert!(!store.has(&CacheKey::Int(1)));
/// assert_eq!(store.len(), 2);
/// ```
#[derive(Debug)]
pub struct BoundedStore<V> {
    entries: HashMap<CacheKey, V>,
    order: VecDeque<CacheKey>,
    capacity: usize,
}

impl<V> BoundedStore<V> {
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// A capacity of zero is clamped to one; the builder rejects zero before
    /// it gets here.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys in insertion order, oldest first.
    pub fn keys(&self) -> impl Iterator<Item = &CacheKey> {
        self.order.iter()
    }

    fn evict_oldest(&mut self) -> Option<(CacheKey, V)> {
        while let Some(key) = self.order.pop_front() {
            if let Some(value) = self.entries.remove(&key) {
                return Some((key, value));
            }
        }
        None
    }
}

impl<V> Default for BoundedStore<V> {
    fn default() -> Self {
        Self::new(MAX_MAP_ENTRIES)
    }
}

impl<V> MemoStore<V> for BoundedStore<V> {
    type Key = CacheKey;

    fn has(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    fn get(&self, key: &CacheKey) -> Option<&V> {
        self.entries.get(key)
    }

    fn set(&mut self, key: CacheKey, value: V) -> Option<(CacheKey, V)> {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            return None;
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, value);

        if self.entries.len() > self.capacity {
            self.evict_oldest()
        } else {
            None
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
