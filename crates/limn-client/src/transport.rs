//! Connection seam
//!
//! The session drives any ordered, message-framed channel through this
//! pair of types. Production code wires the two channel halves to a real
//! socket; tests hold the far ends directly.

use std::future::Future;

use thiserror::Error;
use tokio::sync::mpsc;

/// One live connection. Dropping either far end looks like a connection
/// loss to the session: sends start failing and the incoming stream ends.
pub struct Connection {
    /// Request frames from the session to the peer.
    pub outgoing: mpsc::UnboundedSender<String>,
    /// Response frames from the peer to the session.
    pub incoming: mpsc::UnboundedReceiver<String>,
}

#[derive(Debug, Error)]
#[error("connect failed: {0}")]
pub struct ConnectError(pub String);

/// Dials connections for a session. Called once at startup and again after
/// every connection loss, so implementations must be reusable.
pub trait Connector: Send + 'static {
    fn connect(&mut self) -> impl Future<Output = Result<Connection, ConnectError>> + Send;
}
