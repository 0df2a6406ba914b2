//! Unified error types for the crate.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type StoreResult<T> = Result<T, StoreError>;

/// Top-level error for vector-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Invalid or missing configuration.
    #[error("[Vector Store] config error: {0}")]
    Config(String),

    /// The RPC function answered with a non-2xx status.
    ///
    /// `message` is PostgREST's `message` field when the body had one.
    #[error("[Vector Store] rpc {function} failed with HTTP {status}: {message}")]
    Rpc {
        function: String,
        status: u16,
        message: String,
    },

    /// Network/transport failure (DNS, connect, timeout, body read).
    #[error("[Vector Store] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not a JSON array of rows.
    #[error("[Vector Store] decode error: {0}")]
    Decode(String),
}
