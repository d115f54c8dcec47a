//! The per-connection responder.
//!
//! Executes exactly one request/response exchange and closes the connection.
//! A malformed or abandoned request must never crash the listener or affect
//! any other connection, so every failure here is logged at most and dropped.

use crate::snapshot::SnapshotSource;
use crate::wire;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// How long a client has to send its request line before the connection is
/// abandoned without a response.
const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-connection failures. Contained here, never propagated to the accept
/// loop.
#[derive(Debug, Error)]
enum ExchangeError {
    #[error("client disconnected before sending a complete request")]
    NoRequest,

    #[error("timed out waiting for a request line")]
    Timeout,

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Serves one accepted connection, swallowing any per-connection failure.
pub(crate) async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    source: Arc<SnapshotSource>,
) {
    if let Err(e) = run_exchange(stream, &source).await {
        debug!("Query exchange with {} abandoned: {}", peer_addr, e);
    }
}

async fn run_exchange(stream: TcpStream, source: &SnapshotSource) -> Result<(), ExchangeError> {
    let mut reader = BufReader::new(stream);
    let mut request = String::new();

    let read = timeout(REQUEST_READ_TIMEOUT, reader.read_line(&mut request))
        .await
        .map_err(|_| ExchangeError::Timeout)??;

    // A well-formed trigger is any complete line; its content is ignored.
    // EOF before the newline means the client gave up mid-request.
    if read == 0 || !request.ends_with('\n') {
        return Err(ExchangeError::NoRequest);
    }

    // The snapshot is taken at exchange time, after the request arrived.
    let snapshot = source.snapshot();
    let mut stream = reader.into_inner();
    stream
        .write_all(wire::encode_status(&snapshot).as_bytes())
        .await?;
    stream.shutdown().await?;
    Ok(())
}
