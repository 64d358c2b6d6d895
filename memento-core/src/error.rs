use thiserror::Error;

/// Configuration error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid capacity: 0. The bounded store must hold at least one entry")]
    ZeroCapacity,

    #[error("Invalid host environment: {0:?}. Must be one of: browser, server")]
    InvalidHost(String),
}
