use std::any::Any;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::store::MemoStore;
use crate::ObjectKey;

const MIN_SWEEP_THRESHOLD: usize = 64;

struct IdentityEntry<V> {
    object: Weak<dyn Any>,
    value: V,
}

impl<V> IdentityEntry<V> {
    #[inline]
    fn is_live(&self) -> bool {
        self.object.strong_count() > 0
    }
}

/// Store keyed by object identity whose entries die with their keys.
///
/// Each entry holds only a `Weak` reference to its key object, so the store
/// never keeps a key alive. Once every strong reference to the key is gone
/// the entry can no longer be observed through `has` or `get`, and its slot
/// is reclaimed by a sweep that runs on insertion when the map has grown past
/// an adaptive threshold.
///
/// While an entry's `Weak` exists the key's allocation cannot be reused, so
/// a live object never collides with a dead entry.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use memento_core::{IdentityStore, MemoStore, ObjectKey};
///
/// let mut store = IdentityStore::new();
/// let config = Rc::new(String::from("config"));
///
/// store.set(ObjectKey::new(config.clone()), 42);
/// assert_eq!(store.get(&ObjectKey::new(config.clone())), Some(&42));
///
/// // An equal value in another allocation is a different key
/// let other = Rc::new(String::from("config"));
/// assert!(!store.has(&ObjectKey::new(other)));
///
/// drop(config);
/// assert_eq!(store.len(), 0);
/// ```
pub struct IdentityStore<V> {
    entries: HashMap<usize, IdentityEntry<V>>,
    sweep_at: usize,
}

impl<V> IdentityStore<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            sweep_at: MIN_SWEEP_THRESHOLD,
        }
    }

    /// Drops entries whose key object has been released.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live());
        let reclaimed = before - self.entries.len();
        if reclaimed > 0 {
            debug!(reclaimed, remaining = self.entries.len(), "swept identity store");
        }
        reclaimed
    }

    /// Slots currently allocated, including dead entries not yet swept.
    pub fn slots(&self) -> usize {
        self.entries.len()
    }

    fn live_entry(&self, key: &ObjectKey) -> Option<&IdentityEntry<V>> {
        self.entries.get(&key.addr()).filter(|entry| entry.is_live())
    }
}

impl<V> Default for IdentityStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MemoStore<V> for IdentityStore<V> {
    type Key = ObjectKey;

    fn has(&self, key: &ObjectKey) -> bool {
        self.live_entry(key).is_some()
    }

    fn get(&self, key: &ObjectKey) -> Option<&V> {
        self.live_entry(key).map(|entry| &entry.value)
    }

    fn set(&mut self, key: ObjectKey, value: V) -> Option<(ObjectKey, V)> {
        let entry = IdentityEntry {
            object: Rc::downgrade(key.object()),
            value,
        };
        self.entries.insert(key.addr(), entry);

        if self.entries.len() >= self.sweep_at {
            self.sweep();
            self.sweep_at = (self.entries.len() * 2).max(MIN_SWEEP_THRESHOLD);
        }

        None
    }

    fn len(&self) -> usize {
        self.entries.values().filter(|entry| entry.is_live()).count()
    }
}
