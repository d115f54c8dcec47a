//! Error types for the query listener.
//!
//! Only failures of `start()` cross the boundary to the host. Per-connection
//! problems are contained inside the responder that hit them, and a closed
//! listening socket is normal shutdown, not an error.

use std::io;
use std::net::{AddrParseError, SocketAddr};
use thiserror::Error;

/// Errors surfaced to the host when enabling the query listener.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The configured bind address could not be parsed.
    #[error("invalid bind address `{addr}`: {source}")]
    InvalidAddress {
        addr: String,
        source: AddrParseError,
    },

    /// The listening socket could not be bound (port in use, unreachable
    /// address, insufficient permissions). Fatal to enabling the query
    /// feature; the rest of the host keeps running.
    #[error("failed to bind query listener on {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },

    /// `start()` was called while the listener was already accepting.
    #[error("query listener is already running")]
    AlreadyStarted,

    /// `start()` was called after `stop()`; a stopped listener is not
    /// restartable.
    #[error("query listener has been stopped and cannot be restarted")]
    Stopped,
}
