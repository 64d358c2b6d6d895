use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::ConfigError;

/// Name of the environment variable read by [`HostEnvironment::from_env`].
pub const HOST_ENV_VAR: &str = "MEMENTO_HOST";

/// The kind of host a memoized call runs in.
///
/// Caching assumes the wrapper's lifetime is tied to a client session, as it
/// is in a browser. On a server the same wrapper can outlive any single
/// request, so every call bypasses the stores.
///
/// * `Browser` - caching enabled
/// * `Server` - caching bypassed; the method runs on every call
///
/// # Examples
///
/// ```
/// use memento_core::HostEnvironment;
///
/// let host: HostEnvironment = "SERVER".parse().unwrap();
/// assert_eq!(host, HostEnvironment::Server);
/// assert!(!host.caches());
///
/// assert!("mainframe".parse::<HostEnvironment>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HostEnvironment {
    Browser,
    #[default]
    Server,
}

impl HostEnvironment {
    /// Returns `true` when memoization is active in this host.
    #[inline]
    pub const fn caches(&self) -> bool {
        matches!(self, HostEnvironment::Browser)
    }

    /// Reads the host from `MEMENTO_HOST`.
    ///
    /// Caching needs a positive browser marker. An unset variable means
    /// `Server`; an unrecognized value also falls back to `Server` and is
    /// logged at `warn` level.
    pub fn from_env() -> Self {
        match std::env::var(HOST_ENV_VAR) {
            Ok(raw) => raw.parse().unwrap_or_else(|err: ConfigError| {
                warn!(error = %err, var = HOST_ENV_VAR, "ignoring host override");
                HostEnvironment::Server
            }),
            Err(_) => HostEnvironment::Server,
        }
    }

    /// Host read once from the environment on first use.
    pub fn ambient() -> Self {
        static AMBIENT: Lazy<HostEnvironment> = Lazy::new(HostEnvironment::from_env);
        *AMBIENT
    }
}

impl FromStr for HostEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "browser" => Ok(HostEnvironment::Browser),
            "server" => Ok(HostEnvironment::Server),
            _ => Err(ConfigError::InvalidHost(s.to_string())),
        }
    }
}

impl fmt::Display for HostEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostEnvironment::Browser => f.write_str("browser"),
            HostEnvironment::Server => f.write_str("server"),
        }
    }
}

/// Capability check consulted at the start of every memoized call.
///
/// * `Fixed` - the host never changes over the wrapper's lifetime
/// * `Probe` - a closure asked on every call
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use memento_core::{HostEnvironment, HostGate};
///
/// let fixed = HostGate::Fixed(HostEnvironment::Server);
/// assert_eq!(fixed.current(), HostEnvironment::Server);
///
/// let on_server = Rc::new(Cell::new(false));
/// let flag = on_server.clone();
/// let probe = HostGate::probe(move || {
///     if flag.get() { HostEnvironment::Server } else { HostEnvironment::Browser }
/// });
/// assert!(probe.current().caches());
/// on_server.set(true);
/// assert!(!probe.current().caches());
/// ```
#[derive(Clone)]
pub enum HostGate {
    Fixed(HostEnvironment),
    Probe(Rc<dyn Fn() -> HostEnvironment>),
}

impl HostGate {
    pub fn probe<P>(probe: P) -> Self
    where
        P: Fn() -> HostEnvironment + 'static,
    {
        HostGate::Probe(Rc::new(probe))
    }

    /// Evaluates the gate.
    #[inline]
    pub fn current(&self) -> HostEnvironment {
        match self {
            HostGate::Fixed(host) => *host,
            HostGate::Probe(probe) => probe(),
        }
    }
}

impl Default for HostGate {
    fn default() -> Self {
        HostGate::Fixed(HostEnvironment::ambient())
    }
}

impl From<HostEnvironment> for HostGate {
    fn from(host: HostEnvironment) -> Self {
        HostGate::Fixed(host)
    }
}

impl fmt::Debug for HostGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostGate::Fixed(host) => f.debug_tuple("Fixed").field(host).finish(),
            HostGate::Probe(_) => f.write_str("Probe(..)"),
        }
    }
}
