//! # Memento Core
//!
//! Core types for the Memento memoization library.
//!
//! This crate provides the building blocks behind a memoized method: how call
//! arguments become cache keys, the two stores results are kept in, the host
//! gate that decides whether caching applies at all, and the wrapper that
//! ties them together.
//!
//! ## Features
//!
//! - **Identity keys**: a single `Rc` argument is keyed by reference, and its
//!   entry disappears once the object is dropped
//! - **Bounded store**: every other call is keyed by value in an insertion
//!   ordered store capped at [`MAX_MAP_ENTRIES`] entries
//! - **Custom resolvers**: map the full argument list to any [`CacheKey`]
//! - **Host gate**: caching runs only in browser-like hosts; server hosts
//!   call straight through
//! - **Result-aware**: [`Memoized::try_call`] caches only `Ok` values
//! - **Statistics**: hit, miss, bypass and eviction counters (`stats` feature)
//!
//! ## Module Organization
//!
//! - [`keys`] - `CacheKey`, `ObjectKey` and the argument traits
//! - [`store`] - the `MemoStore` interface and `StoreKind`
//! - `identity_store` / `bounded_store` - the two store implementations
//! - `host` - `HostEnvironment` and `HostGate`
//! - `memoized` - the `Memoized` wrapper and its builder
mod bounded_store;
mod error;
mod host;
mod identity_store;
mod member;
mod memoized;

pub mod keys;
pub mod store;

#[cfg(feature = "stats")]
mod stats;

pub use bounded_store::{BoundedStore, MAX_MAP_ENTRIES};
pub use error::ConfigError;
pub use host::{HostEnvironment, HostGate, HOST_ENV_VAR};
pub use identity_store::IdentityStore;
pub use keys::{CacheKey, CallArgs, KeyArg, ObjectKey};
pub use member::MemberDescriptor;
pub use memoized::{MemoizeBuilder, Memoized};
pub use store::{MemoStore, StoreKind};

#[cfg(feature = "stats")]
pub use stats::CacheStats;
