//! # Minequery - Out-of-Band Status Query Service
//!
//! A lightweight status query endpoint for a running game server: a separate
//! TCP listener that answers "is the server up, how many players, what's the
//! cap" without requiring a game-protocol handshake or join.
//!
//! ## Design Philosophy
//!
//! The core contains **NO game logic** - it only provides the query plumbing:
//!
//! * **Query listener** - Accepts short-lived status-check connections on its
//!   own port, independent of the game protocol
//! * **Per-connection responders** - One spawned task per connection; one
//!   request, one response, then the connection is closed
//! * **Status snapshots** - A fresh read of host state on every query, never
//!   cached
//!
//! Configuration loading and the live player count belong to the host: the
//! host hands over three already-parsed values ([`QueryConfig`]) and a
//! [`PlayerCountProvider`] callback, and drives the lifecycle through
//! [`QueryServer::start`] and [`QueryServer::stop`].
//!
//! ## Wire Contract
//!
//! The response format is a public, stable contract consumed by third-party
//! status checkers. See the [`wire`] module for the exact byte-level layout.
//!
//! ## Thread Safety
//!
//! The accept loop runs on its own task and never blocks the host's control
//! flow. Responders share nothing mutable; the provider is queried
//! concurrently and must be safe under concurrent invocation (the host owns
//! that state and its synchronization).

// Re-export core types and functions for easy access
pub use config::QueryConfig;
pub use error::QueryError;
pub use server::{QueryServer, QueryShutdownHandle};
pub use snapshot::{PlayerCountProvider, StatusSnapshot};

// Public module declarations
pub mod config;
pub mod error;
pub mod server;
pub mod snapshot;
pub mod wire;

// Internal modules (not part of public API)
mod connection;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_server_construction_does_not_bind() {
        let config = QueryConfig::default();
        let server = QueryServer::new(config, Arc::new(|| 0u32));

        // Construction is resource-free; nothing is bound until start().
        assert_eq!(server.server_port(), 25566);
        assert_eq!(server.max_players(), 32);
    }

    #[tokio::test]
    async fn test_new_server_is_not_listening() {
        let server = QueryServer::new(QueryConfig::default(), Arc::new(|| 0u32));
        assert!(!server.is_listening().await);
        assert_eq!(server.local_addr().await, None);
    }
}
