//! # Memento
//!
//! Call-result memoization for methods and free functions.
//!
//! Wrapping a method with [`memoize`] produces a [`Memoized`] with the same
//! call shape: it takes the receiver and the argument tuple, and returns what
//! the method returns. Repeated calls with the same effective key return the
//! stored result instead of running the method again.
//!
//! ## Features
//!
//! - **Identity keys**: a call whose only argument is an `Rc` is keyed by
//!   reference; the entry goes away once the object is dropped
//! - **Bounded store**: all other calls are keyed by value and kept in an
//!   insertion-ordered store holding at most [`MAX_MAP_ENTRIES`] entries
//! - **Custom resolvers**: compute the key from the full argument list
//! - **Host gate**: caching only runs in browser-like hosts; on a server
//!   every call goes straight to the method
//! - **Result-aware**: [`Memoized::try_call`] never caches an `Err`
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::Cell;
//! use memento::{HostEnvironment, Memoized};
//!
//! let runs = Cell::new(0);
//! let double = Memoized::builder(|runs: &Cell<u32>, (x,): (i32,)| {
//!     runs.set(runs.get() + 1);
//!     x * 2
//! })
//! .host(HostEnvironment::Browser)
//! .build()
//! .unwrap();
//!
//! assert_eq!(double.call(&runs, (3,)), 6);
//! assert_eq!(double.call(&runs, (3,)), 6);
//! assert_eq!(double.call(&runs, (4,)), 8);
//! assert_eq!(runs.get(), 2);
//! ```
//!
//! ## Key Resolution
//!
//! Without a resolver only the first argument is part of the key, so calls
//! that differ only in later arguments share an entry. Supply a resolver when
//! every argument matters:
//!
//! ```rust
//! use memento::memoize_with;
//!
//! let greet = memoize_with(
//!     |_: &(), (greeting, name): (&str, &str)| format!("{greeting}, {name}!"),
//!     |(greeting, name): &(&str, &str)| format!("{greeting}/{name}"),
//! );
//!
//! assert_eq!(greet.invoke(("Hello", "Ada")), "Hello, Ada!");
//! assert_eq!(greet.invoke(("Hello", "Grace")), "Hello, Grace!");
//! ```
//!
//! ## Identity Keys
//!
//! ```rust
//! use std::rc::Rc;
//! use memento::{memoize, HostEnvironment};
//!
//! let total = memoize(|_: &(), (items,): (Rc<Vec<u32>>,)| items.iter().sum::<u32>())
//!     .with_gate(HostEnvironment::Browser);
//!
//! let items = Rc::new(vec![1, 2, 3]);
//! assert_eq!(total.invoke((items.clone(),)), 6);
//! assert_eq!(total.len(), 1);
//!
//! // Entries do not keep their key objects alive
//! drop(items);
//! assert_eq!(total.len(), 0);
//! ```
//!
//! ## Host Gate
//!
//! The default gate is read once from the `MEMENTO_HOST` environment
//! variable. Caching only runs when it is set to `browser`; unset or any
//! other value means `server`, and every call goes straight to the method.
//! Use the builder or [`Memoized::with_gate`] to pin a host, or supply a
//! probe that is asked on every call.

use tracing::trace;

pub use memento_core::*;

/// Wraps `method` with memoization using the default configuration.
///
/// # Examples
///
/// ```rust
/// use memento::memoize;
///
/// let square = memoize(|_: &(), (x,): (u64,)| x * x);
/// assert_eq!(square.invoke((12,)), 144);
/// ```
pub fn memoize<Recv, Args, R, F>(method: F) -> Memoized<Recv, Args, R, F>
where
    Recv: ?Sized,
    Args: CallArgs,
    F: Fn(&Recv, Args) -> R,
{
    Memoized::new(method)
}

/// Wraps `method` with memoization keyed by `resolver`.
///
/// The resolver receives the full argument list on every call, cache hit or
/// miss, and every call is stored in the bounded store.
///
/// # Examples
///
/// ```rust
/// use memento::{memoize_with, HostEnvironment};
///
/// // Both calls resolve to the same key, so the method runs once
/// let label = memoize_with(
///     |_: &(), (id, _locale): (u32, &str)| format!("item-{id}"),
///     |&(id, _): &(u32, &str)| id,
/// )
/// .with_gate(HostEnvironment::Browser);
///
/// assert_eq!(label.invoke((7, "en")), "item-7");
/// assert_eq!(label.invoke((7, "fr")), "item-7");
/// assert_eq!(label.len(), 1);
/// ```
pub fn memoize_with<Recv, Args, R, F, K, Res>(
    method: F,
    resolver: Res,
) -> Memoized<Recv, Args, R, F>
where
    Recv: ?Sized,
    Args: CallArgs,
    F: Fn(&Recv, Args) -> R,
    K: Into<CacheKey>,
    Res: Fn(&Args) -> K + 'static,
{
    Memoized::with_resolver(method, resolver)
}

/// Memoizes a class member if it is a method.
///
/// This is the entry point for attachment facilities that hand over whatever
/// a member slot holds. A `Value` is returned unchanged with no caching
/// attached.
///
/// # Examples
///
/// ```rust
/// use memento::{memoize_member, MemberDescriptor};
///
/// let method: MemberDescriptor<_, ()> =
///     MemberDescriptor::Method(|_: &(), (x,): (i32,)| x + 1);
/// let wrapped = memoize_member(method);
/// assert_eq!(wrapped.as_method().map(|m| m.invoke((1,))), Some(2));
///
/// let field: MemberDescriptor<fn(&(), (i32,)) -> i32, u8> = MemberDescriptor::Value(9);
/// assert_eq!(memoize_member(field).into_value(), Some(9));
/// ```
pub fn memoize_member<Recv, Args, R, F, V>(
    member: MemberDescriptor<F, V>,
) -> MemberDescriptor<Memoized<Recv, Args, R, F>, V>
where
    Recv: ?Sized,
    Args: CallArgs,
    F: Fn(&Recv, Args) -> R,
{
    if !member.is_method() {
        trace!("member is not a method, left unwrapped");
    }
    member.map_method(Memoized::new)
}

/// Memoizes a class member with a key resolver if it is a method.
///
/// See [`memoize_member`].
pub fn memoize_member_with<Recv, Args, R, F, V, K, Res>(
    member: MemberDescriptor<F, V>,
    resolver: Res,
) -> MemberDescriptor<Memoized<Recv, Args, R, F>, V>
where
    Recv: ?Sized,
    Args: CallArgs,
    F: Fn(&Recv, Args) -> R,
    K: Into<CacheKey>,
    Res: Fn(&Args) -> K + 'static,
{
    if !member.is_method() {
        trace!("member is not a method, left unwrapped");
    }
    member.map_method(|method| Memoized::with_resolver(method, resolver))
}
