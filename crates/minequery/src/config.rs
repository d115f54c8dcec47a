//! Query listener configuration types and defaults.
//!
//! The host owns configuration loading and validation; this module only
//! defines the already-resolved values the query listener consumes.

use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Configuration for the query listener.
///
/// All three values are supplied by the host, already parsed and validated.
/// The struct is immutable after construction; the listener holds a read-only
/// copy for its whole lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// The address to bind the query listener to. The special value `"any"`
    /// (case-insensitive) binds all interfaces.
    pub bind_address: String,

    /// The port the query listener accepts status checks on.
    pub port: u16,

    /// The maximum amount of players the game server can hold, reported
    /// verbatim in every status response.
    pub max_players: u32,
}

impl QueryConfig {
    /// Resolves the configured `(bind_address, port)` pair into a socket
    /// address, mapping `"any"` to the unspecified IPv4 address.
    pub fn socket_addr(&self) -> Result<SocketAddr, QueryError> {
        let ip = if self.bind_address.eq_ignore_ascii_case("any") {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            self.bind_address
                .parse()
                .map_err(|source| QueryError::InvalidAddress {
                    addr: self.bind_address.clone(),
                    source,
                })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            bind_address: "any".to_string(),
            port: 25566,
            max_players: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_binds_all_interfaces() {
        let config = QueryConfig {
            bind_address: "ANY".to_string(),
            port: 25566,
            max_players: 32,
        };
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr, "0.0.0.0:25566".parse().unwrap());
    }

    #[test]
    fn test_explicit_address_is_used_verbatim() {
        let config = QueryConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 4000,
            max_players: 16,
        };
        assert_eq!(config.socket_addr().unwrap(), "127.0.0.1:4000".parse().unwrap());
    }

    #[test]
    fn test_unparsable_address_is_rejected() {
        let config = QueryConfig {
            bind_address: "not-an-address".to_string(),
            port: 4000,
            max_players: 16,
        };
        assert!(matches!(
            config.socket_addr(),
            Err(QueryError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_defaults_match_original_properties() {
        let config = QueryConfig::default();
        assert_eq!(config.bind_address, "any");
        assert_eq!(config.port, 25566);
        assert_eq!(config.max_players, 32);
    }
}
