use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::store::MemoStore;
use crate::{
    BoundedStore, CacheKey, CallArgs, ConfigError, HostEnvironment, HostGate, IdentityStore,
    ObjectKey, StoreKind, MAX_MAP_ENTRIES,
};

#[cfg(feature = "stats")]
use crate::CacheStats;

type Resolver<Args> = Box<dyn Fn(&Args) -> CacheKey>;

const DEFAULT_NAME: &str = "memoized";

// `new` and `with_resolver` assemble without going through `build`
const _: () = assert!(MAX_MAP_ENTRIES > 0, "default capacity must be non-zero");

/// Key of a single call, already routed to its store.
enum SlotKey {
    Identity(ObjectKey),
    Bounded(CacheKey),
}

impl SlotKey {
    fn kind(&self) -> StoreKind {
        match self {
            SlotKey::Identity(_) => StoreKind::Identity,
            SlotKey::Bounded(_) => StoreKind::Bounded,
        }
    }
}

/// A method wrapped with call-result memoization.
///
/// `Memoized` owns the original method, an optional key resolver, and two
/// stores allocated up front:
///
/// - an [`IdentityStore`] for calls with exactly one object-like argument
///   (an `Rc`) and no resolver; entries die with the argument object
/// - a [`BoundedStore`] for everything else; insertion ordered and capped
///   at [`MAX_MAP_ENTRIES`] unless configured otherwise
///
/// Every call first asks the [`HostGate`]. Outside a browser host the method
/// runs directly and nothing is cached. Otherwise the call is routed to a
/// store, its key is computed, and the stored value is returned on a hit.
/// On a miss the method runs with the original receiver and arguments and
/// its result is stored.
///
/// # Key selection
///
/// | Call shape                              | Store    | Key                    |
/// |-----------------------------------------|----------|------------------------|
/// | one `Rc` argument, no resolver          | identity | the `Rc` allocation    |
/// | resolver configured                     | bounded  | `resolver(&args)`      |
/// | anything else                           | bounded  | key of argument 0      |
///
/// Without a resolver, arguments after the first never contribute to the
/// key: `(1, "a")` and `(1, "b")` share an entry.
///
/// # Failures
///
/// A panic in the method propagates to the caller and nothing is stored.
/// For methods returning `Result`, [`Memoized::try_call`] stores only `Ok`
/// values, while [`Memoized::call`] stores the whole `Result`.
///
/// # Threading
///
/// Stores live in `RefCell`s and object keys are `Rc`s, so a `Memoized` is
/// neither `Send` nor `Sync`. No store borrow is held while the method runs,
/// so recursive methods can call back into the same wrapper.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use memento_core::{HostEnvironment, Memoized};
///
/// struct Pricing {
///     computed: Cell<u32>,
/// }
///
/// let price = Memoized::builder(|p: &Pricing, (qty,): (u32,)| {
///     p.computed.set(p.computed.get() + 1);
///     qty * 3
/// })
/// .host(HostEnvironment::Browser)
/// .build()
/// .unwrap();
///
/// let pricing = Pricing { computed: Cell::new(0) };
/// assert_eq!(price.call(&pricing, (2,)), 6);
/// assert_eq!(price.call(&pricing, (2,)), 6);
/// assert_eq!(pricing.computed.get(), 1);
/// ```
pub struct Memoized<Recv: ?Sized, Args, R, F> {
    method: F,
    resolver: Option<Resolver<Args>>,
    gate: HostGate,
    name: String,
    identity: RefCell<IdentityStore<R>>,
    bounded: RefCell<BoundedStore<R>>,
    #[cfg(feature = "stats")]
    stats: CacheStats,
    _marker: PhantomData<fn(&Recv, Args) -> R>,
}

impl<Recv, Args, R, F> Memoized<Recv, Args, R, F>
where
    Recv: ?Sized,
    Args: CallArgs,
    F: Fn(&Recv, Args) -> R,
{
    /// Wraps `method` with the default configuration.
    pub fn new(method: F) -> Self {
        MemoizeBuilder::new(method).assemble()
    }

    /// Wraps `method`, keying every call by `resolver(&args)`.
    pub fn with_resolver<K, Res>(method: F, resolver: Res) -> Self
    where
        K: Into<CacheKey>,
        Res: Fn(&Args) -> K + 'static,
    {
        MemoizeBuilder::new(method).resolver(resolver).assemble()
    }

    /// Replaces the host gate.
    ///
    /// Useful for wrappers produced by the free `memoize*` functions, which
    /// start out on the ambient gate.
    pub fn with_gate(mut self, gate: impl Into<HostGate>) -> Self {
        self.gate = gate.into();
        self
    }

    /// Starts configuring a memoized wrapper around `method`.
    pub fn builder(method: F) -> MemoizeBuilder<Recv, Args, R, F> {
        MemoizeBuilder::new(method)
    }

    /// Which store a call with these arguments would consult.
    ///
    /// Does not evaluate the host gate or the resolver.
    pub fn store_kind(&self, args: &Args) -> StoreKind {
        if self.uses_identity(args) {
            StoreKind::Identity
        } else {
            StoreKind::Bounded
        }
    }

    fn uses_identity(&self, args: &Args) -> bool {
        self.resolver.is_none() && args.arity() == 1 && args.first_key().is_object()
    }

    fn slot_key(&self, args: &Args) -> SlotKey {
        if let Some(resolver) = &self.resolver {
            return SlotKey::Bounded(resolver(args));
        }

        let first = args.first_key();
        match first {
            CacheKey::Object(object) if args.arity() == 1 => SlotKey::Identity(object),
            other => SlotKey::Bounded(other),
        }
    }

    /// Returns `true` when the gate lets this call use the stores.
    fn gate_open(&self) -> bool {
        let host = self.gate.current();
        if host.caches() {
            return true;
        }

        #[cfg(feature = "stats")]
        self.stats.record_bypass();
        trace!(cache = %self.name, host = %host, "memoization bypassed");
        false
    }

    /// Reads the stored value for `key` through `read`.
    ///
    /// A stored value that `read` rejects counts as a miss.
    fn lookup<O>(&self, key: &SlotKey, read: impl FnOnce(&R) -> Option<O>) -> Option<O> {
        let found = match key {
            SlotKey::Identity(object) => {
                let store = self.identity.borrow();
                store.get(object).and_then(read)
            }
            SlotKey::Bounded(key) => {
                let store = self.bounded.borrow();
                store.get(key).and_then(read)
            }
        };

        #[cfg(feature = "stats")]
        {
            if found.is_some() {
                self.stats.record_hit();
            } else {
                self.stats.record_miss();
            }
        }

        trace!(
            cache = %self.name,
            store = %key.kind(),
            hit = found.is_some(),
            "memo lookup"
        );
        found
    }

    fn store(&self, key: SlotKey, value: R) {
        match key {
            SlotKey::Identity(object) => {
                self.identity.borrow_mut().set(object, value);
            }
            SlotKey::Bounded(key) => {
                let evicted = self.bounded.borrow_mut().set(key, value);
                if let Some((evicted_key, _)) = evicted {
                    #[cfg(feature = "stats")]
                    self.stats.record_eviction();
                    trace!(cache = %self.name, evicted = ?evicted_key, "evicted oldest entry");
                }
            }
        }
    }

    /// Invokes the wrapped method through the cache.
    ///
    /// The whole return value is cached, including `Err` variants. Use
    /// [`Memoized::try_call`] to keep errors out of the cache.
    pub fn call(&self, receiver: &Recv, args: Args) -> R
    where
        R: Clone,
    {
        if !self.gate_open() {
            return (self.method)(receiver, args);
        }

        let key = self.slot_key(&args);
        if let Some(hit) = self.lookup(&key, |stored| Some(stored.clone())) {
            return hit;
        }

        let value = (self.method)(receiver, args);
        self.store(key, value.clone());
        value
    }

    /// Number of live entries across both stores.
    pub fn len(&self) -> usize {
        self.identity.borrow().len() + self.bounded.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries in the bounded store.
    pub fn capacity(&self) -> usize {
        self.bounded.borrow().capacity()
    }

    pub fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host_gate(&self) -> &HostGate {
        &self.gate
    }

    /// Returns the call statistics for this wrapper.
    ///
    /// This method is only available when the `stats` feature is enabled.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl<Args, R, F> Memoized<(), Args, R, F>
where
    Args: CallArgs,
    F: Fn(&(), Args) -> R,
{
    /// Calls a receiver-less wrapper.
    pub fn invoke(&self, args: Args) -> R
    where
        R: Clone,
    {
        self.call(&(), args)
    }
}

/// Specialized entry point for methods returning `Result<T, E>`.
///
/// Only `Ok` values are stored. An `Err` is returned to the caller as is and
/// the next call with the same key runs the method again.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use memento_core::{HostEnvironment, Memoized};
///
/// let attempts = Cell::new(0);
/// let fetch = Memoized::builder(|attempts: &Cell<u32>, (id,): (u32,)| {
///     attempts.set(attempts.get() + 1);
///     if attempts.get() == 1 {
///         Err("timeout".to_string())
///     } else {
///         Ok(id * 10)
///     }
/// })
/// .host(HostEnvironment::Browser)
/// .build()
/// .unwrap();
///
/// assert!(fetch.try_call(&attempts, (1,)).is_err());
/// assert_eq!(fetch.try_call(&attempts, (1,)), Ok(10));
/// assert_eq!(fetch.try_call(&attempts, (1,)), Ok(10));
/// assert_eq!(attempts.get(), 2);
/// ```
impl<Recv, Args, T, E, F> Memoized<Recv, Args, Result<T, E>, F>
where
    Recv: ?Sized,
    Args: CallArgs,
    T: Clone,
    F: Fn(&Recv, Args) -> Result<T, E>,
{
    pub fn try_call(&self, receiver: &Recv, args: Args) -> Result<T, E> {
        if !self.gate_open() {
            return (self.method)(receiver, args);
        }

        let key = self.slot_key(&args);
        // An Err stored through `call` is not served here
        if let Some(hit) = self.lookup(&key, |stored| stored.as_ref().ok().cloned()) {
            return Ok(hit);
        }

        let result = (self.method)(receiver, args);
        if let Ok(value) = &result {
            self.store(key, Ok(value.clone()));
        }
        result
    }
}

impl<Recv: ?Sized, Args, R, F> fmt::Debug for Memoized<Recv, Args, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("name", &self.name)
            .field("resolver", &self.resolver.is_some())
            .field("gate", &self.gate)
            .field("identity_slots", &self.identity.borrow().slots())
            .field("bounded_entries", &self.bounded.borrow().len())
            .finish()
    }
}

/// Builder for [`Memoized`].
///
/// # Options
///
/// * `resolver` - maps the full argument list to a key; routes every call to
///   the bounded store
/// * `capacity` - bounded store size, defaults to [`MAX_MAP_ENTRIES`]
/// * `host` / `host_probe` / `host_gate` - caching gate; defaults to the
///   host read from `MEMENTO_HOST`
/// * `name` - label used in log events
///
/// # Examples
///
/// ```
/// use memento_core::{ConfigError, HostEnvironment, Memoized};
///
/// let area = Memoized::builder(|_: &(), (w, h): (u32, u32)| w * h)
///     .resolver(|&(w, h): &(u32, u32)| (w, h))
///     .capacity(10)
///     .host(HostEnvironment::Browser)
///     .name("area")
///     .build()
///     .unwrap();
///
/// assert_eq!(area.invoke((2, 3)), 6);
/// assert_eq!(area.invoke((2, 4)), 8);
/// assert_eq!(area.len(), 2);
///
/// let err = Memoized::builder(|_: &(), (x,): (u32,)| x).capacity(0).build();
/// assert_eq!(err.unwrap_err(), ConfigError::ZeroCapacity);
/// ```
pub struct MemoizeBuilder<Recv: ?Sized, Args, R, F> {
    method: F,
    resolver: Option<Resolver<Args>>,
    capacity: usize,
    gate: Option<HostGate>,
    name: Option<String>,
    _marker: PhantomData<fn(&Recv, Args) -> R>,
}

impl<Recv, Args, R, F> MemoizeBuilder<Recv, Args, R, F>
where
    Recv: ?Sized,
    Args: CallArgs,
    F: Fn(&Recv, Args) -> R,
{
    pub fn new(method: F) -> Self {
        Self {
            method,
            resolver: None,
            capacity: MAX_MAP_ENTRIES,
            gate: None,
            name: None,
            _marker: PhantomData,
        }
    }

    /// Sets the key resolver.
    ///
    /// The resolver sees the full argument list on every gated call, hit or
    /// miss. It should be pure; its result is never cached.
    pub fn resolver<K, Res>(mut self, resolver: Res) -> Self
    where
        K: Into<CacheKey>,
        Res: Fn(&Args) -> K + 'static,
    {
        self.resolver = Some(Box::new(move |args: &Args| resolver(args).into()));
        self
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn host(mut self, host: HostEnvironment) -> Self {
        self.gate = Some(HostGate::Fixed(host));
        self
    }

    /// Asks `probe` for the host on every call.
    pub fn host_probe<P>(mut self, probe: P) -> Self
    where
        P: Fn() -> HostEnvironment + 'static,
    {
        self.gate = Some(HostGate::probe(probe));
        self
    }

    pub fn host_gate(mut self, gate: HostGate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Memoized<Recv, Args, R, F>, ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(self.assemble())
    }

    fn assemble(self) -> Memoized<Recv, Args, R, F> {
        debug_assert!(self.capacity > 0, "zero capacity must be rejected by build");
        Memoized {
            method: self.method,
            resolver: self.resolver,
            gate: self.gate.unwrap_or_default(),
            name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            identity: RefCell::new(IdentityStore::new()),
            bounded: RefCell::new(BoundedStore::new(self.capacity)),
            #[cfg(feature = "stats")]
            stats: CacheStats::new(),
            _marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter {
        calls: Cell<usize>,
    }

    impl Counter {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
            }
        }

        fn bump(&self) {
            self.calls.set(self.calls.get() + 1);
        }

        fn calls(&self) -> usize {
            self.calls.get()
        }
    }

    fn doubler() -> Memoized<Counter, (i32,), i32, impl Fn(&Counter, (i32,)) -> i32> {
        Memoized::builder(|c: &Counter, (x,): (i32,)| {
            c.bump();
            x * 2
        })
        .host(HostEnvironment::Browser)
        .build()
        .unwrap()
    }

    #[test]
    fn test_repeat_call_hits() {
        let counter = Counter::new();
        let wrapped = doubler();

        assert_eq!(wrapped.call(&counter, (3,)), 6);
        assert_eq!(wrapped.call(&counter, (3,)), 6);
        assert_eq!(counter.calls(), 1);

        assert_eq!(wrapped.call(&counter, (4,)), 8);
        assert_eq!(counter.calls(), 2);
        assert_eq!(wrapped.len(), 2);
    }

    #[test]
    fn test_server_host_bypasses() {
        let counter = Counter::new();
        let wrapped = Memoized::builder(|c: &Counter, (x,): (i32,)| {
            c.bump();
            x
        })
        .host(HostEnvironment::Server)
        .build()
        .unwrap();

        wrapped.call(&counter, (1,));
        wrapped.call(&counter, (1,));
        assert_eq!(counter.calls(), 2);
        assert!(wrapped.is_empty());
    }

    #[test]
    fn test_store_kind_selection() {
        let plain = Memoized::builder(|_: &(), (v,): (Rc<u8>,)| *v)
            .host(HostEnvironment::Browser)
            .build()
            .unwrap();
        assert_eq!(plain.store_kind(&(Rc::new(1),)), StoreKind::Identity);

        let two_args = Memoized::builder(|_: &(), (v, _n): (Rc<u8>, i32)| *v)
            .host(HostEnvironment::Browser)
            .build()
            .unwrap();
        assert_eq!(two_args.store_kind(&(Rc::new(1), 2)), StoreKind::Bounded);

        let primitive = Memoized::builder(|_: &(), (v,): (u8,)| v)
            .host(HostEnvironment::Browser)
            .build()
            .unwrap();
        assert_eq!(primitive.store_kind(&(1,)), StoreKind::Bounded);

        let resolved = Memoized::builder(|_: &(), (v,): (Rc<u8>,)| *v)
            .resolver(|(v,): &(Rc<u8>,)| **v)
            .host(HostEnvironment::Browser)
            .build()
            .unwrap();
        assert_eq!(resolved.store_kind(&(Rc::new(1),)), StoreKind::Bounded);
    }

    #[test]
    fn test_panic_is_not_cached() {
        use std::panic::{catch_unwind, AssertUnwindSafe};

        let counter = Counter::new();
        let wrapped = Memoized::builder(|c: &Counter, (x,): (i32,)| {
            c.bump();
            if c.calls() == 1 {
                panic!("first call fails");
            }
            x
        })
        .host(HostEnvironment::Browser)
        .build()
        .unwrap();

        let first = catch_unwind(AssertUnwindSafe(|| wrapped.call(&counter, (5,))));
        assert!(first.is_err());
        assert!(wrapped.is_empty());

        assert_eq!(wrapped.call(&counter, (5,)), 5);
        assert_eq!(wrapped.call(&counter, (5,)), 5);
        assert_eq!(counter.calls(), 2);
    }

    #[test]
    fn test_recursive_method_reenters() {
        struct Fib {
            memo: RefCell<Option<Box<dyn Fn(&Fib, u64) -> u64>>>,
            calls: Cell<usize>,
        }

        let fib = Fib {
            memo: RefCell::new(None),
            calls: Cell::new(0),
        };

        let wrapped = Rc::new(
            Memoized::builder(|f: &Fib, (n,): (u64,)| {
                f.calls.set(f.calls.get() + 1);
                if n < 2 {
                    return n;
                }
                let memo = f.memo.borrow();
                let step = memo.as_ref().unwrap();
                step(f, n - 1) + step(f, n - 2)
            })
            .host(HostEnvironment::Browser)
            .build()
            .unwrap(),
        );

        let inner = Rc::clone(&wrapped);
        *fib.memo.borrow_mut() = Some(Box::new(move |f: &Fib, n: u64| inner.call(f, (n,))));

        assert_eq!(wrapped.call(&fib, (30,)), 832_040);
        // Each n in 0..=30 computed once
        assert_eq!(fib.calls.get(), 31);
    }

    #[test]
    fn test_try_call_skips_errors() {
        let counter = Counter::new();
        let wrapped = Memoized::builder(|c: &Counter, (x,): (i32,)| {
            c.bump();
            if x < 0 {
                Err(format!("negative: {x}"))
            } else {
                Ok(x)
            }
        })
        .host(HostEnvironment::Browser)
        .build()
        .unwrap();

        assert!(wrapped.try_call(&counter, (-1,)).is_err());
        assert!(wrapped.try_call(&counter, (-1,)).is_err());
        assert_eq!(counter.calls(), 2);

        assert_eq!(wrapped.try_call(&counter, (1,)), Ok(1));
        assert_eq!(wrapped.try_call(&counter, (1,)), Ok(1));
        assert_eq!(counter.calls(), 3);
        assert_eq!(wrapped.len(), 1);
    }

    #[test]
    fn test_call_caches_whole_result() {
        let counter = Counter::new();
        let wrapped = Memoized::builder(|c: &Counter, (x,): (i32,)| -> Result<i32, String> {
            c.bump();
            Err(format!("bad {x}"))
        })
        .host(HostEnvironment::Browser)
        .build()
        .unwrap();

        assert!(wrapped.call(&counter, (1,)).is_err());
        assert!(wrapped.call(&counter, (1,)).is_err());
        assert_eq!(counter.calls(), 1);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = Memoized::builder(|_: &(), (x,): (i32,)| x)
            .capacity(0)
            .build();
        assert_eq!(result.unwrap_err(), ConfigError::ZeroCapacity);
    }

    #[test]
    fn test_name_and_defaults() {
        let wrapped = Memoized::builder(|_: &(), (x,): (i32,)| x)
            .host(HostEnvironment::Browser)
            .build()
            .unwrap();
        assert_eq!(wrapped.name(), "memoized");
        assert_eq!(wrapped.capacity(), MAX_MAP_ENTRIES);
        assert!(!wrapped.has_resolver());

        let named = Memoized::builder(|_: &(), (x,): (i32,)| x)
            .name("identity_fn")
            .host(HostEnvironment::Browser)
            .build()
            .unwrap();
        assert_eq!(named.name(), "identity_fn");
    }

    #[test]
    #[cfg(feature = "stats")]
    fn test_stats_track_calls() {
        let counter = Counter::new();
        let wrapped = Memoized::builder(|c: &Counter, (x,): (i32,)| {
            c.bump();
            x
        })
        .capacity(2)
        .host(HostEnvironment::Browser)
        .build()
        .unwrap();

        wrapped.call(&counter, (1,)); // miss
        wrapped.call(&counter, (1,)); // hit
        wrapped.call(&counter, (2,)); // miss
        wrapped.call(&counter, (3,)); // miss, evicts 1

        let stats = wrapped.stats();
        assert_eq!(stats.hits(), 1);
        assert_eq!(stats.misses(), 3);
        assert_eq!(stats.evictions(), 1);
        assert_eq!(stats.bypasses(), 0);
    }

    #[test]
    #[cfg(feature = "stats")]
    fn test_stats_count_bypasses() {
        let server = Rc::new(Cell::new(true));
        let flag = Rc::clone(&server);
        let wrapped = Memoized::builder(|_: &(), (x,): (i32,)| x)
            .host_probe(move || {
                if flag.get() {
                    HostEnvironment::Server
                } else {
                    HostEnvironment::Browser
                }
            })
            .build()
            .unwrap();

        wrapped.invoke((1,));
        wrapped.invoke((1,));
        server.set(false);
        wrapped.invoke((1,));
        wrapped.invoke((1,));

        let stats = wrapped.stats();
        assert_eq!(stats.bypasses(), 2);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.hits(), 1);
    }

    #[test]
    #[cfg(feature = "stats")]
    fn test_stored_err_counts_as_try_call_miss() {
        let counter = Counter::new();
        let wrapped = Memoized::builder(|c: &Counter, (x,): (i32,)| {
            c.bump();
            if x < 0 {
                Err(format!("negative: {x}"))
            } else {
                Ok(x)
            }
        })
        .host(HostEnvironment::Browser)
        .build()
        .unwrap();

        // `call` stores the Err; `try_call` must not serve it
        assert!(wrapped.call(&counter, (-1,)).is_err());
        assert!(wrapped.try_call(&counter, (-1,)).is_err());
        assert_eq!(counter.calls(), 2);

        let stats = wrapped.stats();
        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.misses(), 2);
    }

    #[test]
    fn test_default_constructors() {
        let plain = Memoized::new(|_: &(), (x,): (i32,)| x);
        assert_eq!(plain.capacity(), MAX_MAP_ENTRIES);
        assert!(!plain.has_resolver());

        let keyed = Memoized::with_resolver(|_: &(), (x,): (i32,)| x, |&(x,): &(i32,)| x);
        assert_eq!(keyed.capacity(), MAX_MAP_ENTRIES);
        assert!(keyed.has_resolver());
    }

    #[test]
    fn test_with_gate_replaces_default_gate() {
        let counter = Counter::new();
        let wrapped = Memoized::new(|c: &Counter, (x,): (i32,)| {
            c.bump();
            x
        })
        .with_gate(HostEnvironment::Browser);

        assert_eq!(wrapped.host_gate().current(), HostEnvironment::Browser);
        wrapped.call(&counter, (7,));
        wrapped.call(&counter, (7,));
        assert_eq!(counter.calls(), 1);
    }
}
