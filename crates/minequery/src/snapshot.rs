//! Point-in-time status snapshots and the host-supplied player count source.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The host-supplied source of the live player count.
///
/// Queried once per status exchange, potentially from many responders at the
/// same time; implementations must be safe under concurrent invocation and
/// are expected to be cheap and non-blocking. The core never caches the
/// returned value.
pub trait PlayerCountProvider: Send + Sync {
    /// Returns the number of players online as of this call.
    fn current_players(&self) -> u32;
}

impl<F> PlayerCountProvider for F
where
    F: Fn() -> u32 + Send + Sync,
{
    fn current_players(&self) -> u32 {
        self()
    }
}

/// An instantaneous read of server status.
///
/// Created fresh on every query and discarded after the response is written;
/// there is no staleness window and nothing is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Players online at the moment of the query.
    pub current_players: u32,

    /// The configured player cap.
    pub max_players: u32,

    /// The port the query listener is bound to.
    pub port: u16,
}

/// Pairs the provider with the immutable response fields and mints snapshots
/// for responders.
pub(crate) struct SnapshotSource {
    provider: Arc<dyn PlayerCountProvider>,
    max_players: u32,
    port: u16,
}

impl SnapshotSource {
    pub(crate) fn new(provider: Arc<dyn PlayerCountProvider>, max_players: u32, port: u16) -> Self {
        Self {
            provider,
            max_players,
            port,
        }
    }

    /// Takes a fresh snapshot, querying the provider now.
    pub(crate) fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            current_players: self.provider.current_players(),
            max_players: self.max_players,
            port: self.port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_closure_provider() {
        let provider = || 7u32;
        assert_eq!(provider.current_players(), 7);
    }

    #[test]
    fn test_snapshot_reflects_provider_at_call_time() {
        let count = Arc::new(AtomicU32::new(3));
        let count_for_provider = count.clone();
        let source = SnapshotSource::new(
            Arc::new(move || count_for_provider.load(Ordering::SeqCst)),
            32,
            25566,
        );

        assert_eq!(
            source.snapshot(),
            StatusSnapshot {
                current_players: 3,
                max_players: 32,
                port: 25566,
            }
        );

        count.store(12, Ordering::SeqCst);
        assert_eq!(source.snapshot().current_players, 12);
    }
}
