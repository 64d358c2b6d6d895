//! Tests for the bounded store's insertion-ordered eviction
//!
//! These tests drive eviction through the public wrapper and verify that the
//! store never holds more than its capacity and always drops the oldest key.

use std::cell::Cell;

use memento::{HostEnvironment, Memoized, MAX_MAP_ENTRIES};

struct Tracker {
    runs: Cell<usize>,
}

impl Tracker {
    fn new() -> Self {
        Self { runs: Cell::new(0) }
    }

    fn runs(&self) -> usize {
        self.runs.get()
    }
}

fn square() -> Memoized<Tracker, (u32,), u32, impl Fn(&Tracker, (u32,)) -> u32> {
    Memoized::builder(|t: &Tracker, (x,): (u32,)| {
        t.runs.set(t.runs.get() + 1);
        x * x
    })
    .host(HostEnvironment::Browser)
    .build()
    .unwrap()
}

/// The 51st distinct key evicts the first; repeating the first key recomputes
#[test]
fn test_fifty_first_key_evicts_first() {
    let tracker = Tracker::new();
    let wrapped = square();

    for x in 0..=(MAX_MAP_ENTRIES as u32) {
        wrapped.call(&tracker, (x,));
    }
    assert_eq!(tracker.runs(), MAX_MAP_ENTRIES + 1);
    assert_eq!(wrapped.len(), MAX_MAP_ENTRIES);

    // 52nd call repeats the first key
    assert_eq!(wrapped.call(&tracker, (0,)), 0);
    assert_eq!(tracker.runs(), MAX_MAP_ENTRIES + 2);
}

/// Keys that survived eviction are still served from the store
#[test]
fn test_surviving_keys_still_hit() {
    let tracker = Tracker::new();
    let wrapped = square();

    for x in 0..=(MAX_MAP_ENTRIES as u32) {
        wrapped.call(&tracker, (x,));
    }
    let runs = tracker.runs();

    assert_eq!(wrapped.call(&tracker, (1,)), 1);
    assert_eq!(wrapped.call(&tracker, (MAX_MAP_ENTRIES as u32,)), 2500);
    assert_eq!(tracker.runs(), runs);
}

/// Hits do not refresh an entry's position
#[test]
fn test_hits_do_not_reorder() {
    let tracker = Tracker::new();
    let wrapped = Memoized::builder(|t: &Tracker, (x,): (u32,)| {
        t.runs.set(t.runs.get() + 1);
        x
    })
    .capacity(2)
    .host(HostEnvironment::Browser)
    .build()
    .unwrap();

    wrapped.call(&tracker, (1,));
    wrapped.call(&tracker, (2,));
    wrapped.call(&tracker, (1,)); // hit, 1 stays oldest
    wrapped.call(&tracker, (3,)); // evicts 1
    assert_eq!(tracker.runs(), 3);

    wrapped.call(&tracker, (2,)); // still cached
    assert_eq!(tracker.runs(), 3);

    wrapped.call(&tracker, (1,)); // recomputed
    assert_eq!(tracker.runs(), 4);
}

/// Only one entry is evicted per insertion
#[test]
fn test_single_eviction_per_insert() {
    let tracker = Tracker::new();
    let wrapped = Memoized::builder(|t: &Tracker, (x,): (u32,)| {
        t.runs.set(t.runs.get() + 1);
        x
    })
    .capacity(3)
    .host(HostEnvironment::Browser)
    .build()
    .unwrap();

    for x in 0..10 {
        wrapped.call(&tracker, (x,));
        assert!(wrapped.len() <= 3);
    }
    assert_eq!(wrapped.len(), 3);

    let before = tracker.runs();
    for x in 7..10 {
        wrapped.call(&tracker, (x,));
    }
    assert_eq!(tracker.runs(), before);
}

#[test]
#[cfg(feature = "stats")]
fn test_eviction_counter() {
    let tracker = Tracker::new();
    let wrapped = square();

    for x in 0..(MAX_MAP_ENTRIES as u32 + 5) {
        wrapped.call(&tracker, (x,));
    }
    assert_eq!(wrapped.stats().evictions(), 5);
    assert_eq!(wrapped.stats().misses(), MAX_MAP_ENTRIES as u64 + 5);
}
