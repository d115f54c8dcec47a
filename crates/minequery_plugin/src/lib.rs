//! Host lifecycle adapter for the query listener.
//!
//! The core exposes `start()`/`stop()` with no dependency on any specific
//! plugin-host ABI. This crate is the thin adapter a host's plugin runtime
//! calls at the appropriate points of its own enable/disable lifecycle;
//! whatever shape those hooks take, they reduce to the two methods of
//! [`QueryLifecycle`].

use async_trait::async_trait;
use minequery::{PlayerCountProvider, QueryConfig, QueryError, QueryServer};
use std::sync::Arc;
use tracing::{error, info};

/// The enable/disable surface a plugin host drives.
#[async_trait]
pub trait QueryLifecycle: Send + Sync {
    /// Called when the host enables the plugin. A bind failure is returned
    /// so the host can fail enablement loudly instead of silently appearing
    /// "up"; the rest of the host keeps running either way.
    async fn on_enable(&self) -> Result<(), QueryError>;

    /// Called when the host disables the plugin during shutdown.
    async fn on_disable(&self);
}

/// The query plugin: wires host-supplied configuration and player count into
/// a [`QueryServer`] and maps the host's lifecycle hooks onto it.
pub struct QueryPlugin {
    server: Arc<QueryServer>,
}

impl QueryPlugin {
    /// Creates the plugin from host-validated configuration and the host's
    /// player count source. No resources are acquired until `on_enable`.
    pub fn new(config: QueryConfig, provider: Arc<dyn PlayerCountProvider>) -> Self {
        Self {
            server: Arc::new(QueryServer::new(config, provider)),
        }
    }

    /// The underlying query server, for hosts that want direct access to its
    /// shutdown handle or bound address during their own teardown.
    pub fn server(&self) -> Arc<QueryServer> {
        self.server.clone()
    }

    /// Gets the port the query listener runs on.
    pub fn server_port(&self) -> u16 {
        self.server.server_port()
    }

    /// Gets the maximum amount of players the game server can hold.
    pub fn max_players(&self) -> u32 {
        self.server.max_players()
    }
}

#[async_trait]
impl QueryLifecycle for QueryPlugin {
    async fn on_enable(&self) -> Result<(), QueryError> {
        if let Err(e) = self.server.start().await {
            error!("Error starting the query listener: {}", e);
            return Err(e);
        }
        info!("Minequery is now enabled.");
        Ok(())
    }

    async fn on_disable(&self) {
        self.server.stop().await;
        info!("Minequery is now disabled.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_plugin() -> QueryPlugin {
        let config = QueryConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 0,
            max_players: 64,
        };
        QueryPlugin::new(config, Arc::new(|| 11u32))
    }

    #[test]
    fn test_accessors_mirror_config() {
        let plugin = test_plugin();
        assert_eq!(plugin.server_port(), 0);
        assert_eq!(plugin.max_players(), 64);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_enable_disable_round_trip() {
        let plugin = test_plugin();

        plugin.on_enable().await.expect("enable failed");
        assert!(plugin.server().is_listening().await);

        plugin.on_disable().await;
        assert!(!plugin.server().is_listening().await);

        // The listener is disposable; re-enabling is rejected.
        assert!(matches!(
            plugin.on_enable().await,
            Err(QueryError::Stopped)
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_double_enable_is_rejected() {
        let plugin = test_plugin();
        plugin.on_enable().await.expect("enable failed");

        assert!(matches!(
            plugin.on_enable().await,
            Err(QueryError::AlreadyStarted)
        ));

        plugin.on_disable().await;
    }
}
