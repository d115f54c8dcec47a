//! Core query server implementation.
//!
//! This module contains the `QueryServer` struct: the owner of the listening
//! socket, the accept loop that dispatches per-connection responders, and the
//! `Created -> Listening -> Stopped` lifecycle the host drives.

use crate::{
    config::QueryConfig,
    connection::responder::handle_connection,
    error::QueryError,
    snapshot::{PlayerCountProvider, SnapshotSource},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

/// Listener lifecycle. `Stopped` is terminal; a stopped server is not
/// restartable, mirroring the disposable socket it owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerState {
    Created,
    Listening(SocketAddr),
    Stopped,
}

/// The out-of-band status query server.
///
/// Construction is resource-free: the listening socket is bound by
/// [`start`](Self::start), so the host can construct the server before
/// deciding whether to enable the feature. Once started, a dedicated task
/// accepts connections and spawns one responder per connection; neither ever
/// blocks the host's own control flow.
///
/// # Lifecycle
///
/// ```text
/// Created --start()--> Listening --stop() or handle close--> Stopped
/// Created --start(), bind fails--> Created (start() returns the bind error)
/// ```
pub struct QueryServer {
    /// Host-supplied, already-validated configuration.
    config: QueryConfig,

    /// Live player count source, shared with every responder.
    provider: Arc<dyn PlayerCountProvider>,

    /// Channel for coordinating listener shutdown.
    shutdown_sender: broadcast::Sender<()>,

    /// Current lifecycle state, shared with the accept task so socket
    /// closure is observed as a transition to `Stopped`.
    state: Arc<RwLock<ListenerState>>,
}

impl QueryServer {
    /// Creates a new query server from host-validated configuration and the
    /// host's player count source.
    ///
    /// Performs no validation and acquires no resources; failures surface
    /// from [`start`](Self::start) instead, keeping configuration and
    /// resource acquisition separate steps.
    pub fn new(config: QueryConfig, provider: Arc<dyn PlayerCountProvider>) -> Self {
        let (shutdown_sender, _) = broadcast::channel(1);
        Self {
            config,
            provider,
            shutdown_sender,
            state: Arc::new(RwLock::new(ListenerState::Created)),
        }
    }

    /// Binds the listening socket and starts the accept loop.
    ///
    /// On success the server transitions to `Listening` and a dedicated task
    /// accepts connections until [`stop`](Self::stop) is called or the
    /// shutdown handle is triggered. Each accepted connection is served by
    /// its own spawned responder; a transient accept failure is logged and
    /// the loop continues.
    ///
    /// # Errors
    ///
    /// * [`QueryError::Bind`] / [`QueryError::InvalidAddress`] - the socket
    ///   could not be bound. The server stays in `Created`; nothing leaked.
    /// * [`QueryError::AlreadyStarted`] - the listener is already accepting;
    ///   a second `start()` never double-binds.
    /// * [`QueryError::Stopped`] - the server was stopped and is not
    ///   restartable.
    pub async fn start(&self) -> Result<(), QueryError> {
        let mut state = self.state.write().await;
        match *state {
            ListenerState::Created => {}
            ListenerState::Listening(_) => return Err(QueryError::AlreadyStarted),
            ListenerState::Stopped => return Err(QueryError::Stopped),
        }

        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| QueryError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| QueryError::Bind { addr, source })?;

        let source = Arc::new(SnapshotSource::new(
            self.provider.clone(),
            self.config.max_players,
            local_addr.port(),
        ));
        let mut shutdown_receiver = self.shutdown_sender.subscribe();
        let task_state = self.state.clone();

        tokio::spawn(async move {
            info!("✅ Query listener accepting connections on {}", local_addr);
            loop {
                tokio::select! {
                    accepted = listener.accept() => match accepted {
                        Ok((stream, peer_addr)) => {
                            let source = source.clone();
                            tokio::spawn(async move {
                                handle_connection(stream, peer_addr, source).await;
                            });
                        }
                        Err(e) => {
                            // One bad connection does not invalidate the
                            // listening socket.
                            warn!("Failed to accept query connection: {}", e);
                        }
                    },
                    _ = shutdown_receiver.recv() => {
                        info!("Query listener on {} shut down", local_addr);
                        break;
                    }
                }
            }
            // Dropping the listener here closes the socket; in-flight
            // responders run to completion on their own tasks.
            *task_state.write().await = ListenerState::Stopped;
        });

        *state = ListenerState::Listening(local_addr);
        Ok(())
    }

    /// Stops accepting status queries and closes the listening socket.
    ///
    /// In-flight responders finish naturally; this does not wait for them.
    /// Idempotent, and terminal: the server cannot be started again.
    pub async fn stop(&self) {
        let mut state = self.state.write().await;
        if let ListenerState::Listening(addr) = *state {
            info!("🛑 Stopping query listener on {}", addr);
            let _ = self.shutdown_sender.send(());
        }
        *state = ListenerState::Stopped;
    }

    /// Returns a handle the host can store and trigger from its own teardown
    /// path, as an alternative to calling [`stop`](Self::stop).
    pub fn shutdown_handle(&self) -> QueryShutdownHandle {
        QueryShutdownHandle {
            sender: self.shutdown_sender.clone(),
        }
    }

    /// The port the query listener was configured with.
    pub fn server_port(&self) -> u16 {
        self.config.port
    }

    /// The player cap reported in every status response.
    pub fn max_players(&self) -> u32 {
        self.config.max_players
    }

    /// The address the listening socket is actually bound to, once
    /// `Listening`. Differs from the configured port only when the host
    /// configured port 0.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        match *self.state.read().await {
            ListenerState::Listening(addr) => Some(addr),
            _ => None,
        }
    }

    /// Whether the accept loop is currently running.
    pub async fn is_listening(&self) -> bool {
        matches!(*self.state.read().await, ListenerState::Listening(_))
    }
}

/// A clonable trigger for closing the listening socket.
///
/// Triggering the handle closes the listener exactly like
/// [`QueryServer::stop`]: the accept loop exits as normal shutdown and the
/// server transitions to `Stopped`.
#[derive(Clone)]
pub struct QueryShutdownHandle {
    sender: broadcast::Sender<()>,
}

impl QueryShutdownHandle {
    /// Closes the listening socket. Safe to call more than once, and a no-op
    /// if the listener already stopped.
    pub fn close(&self) {
        let _ = self.sender.send(());
    }
}
