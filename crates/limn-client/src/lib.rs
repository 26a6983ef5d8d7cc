//! Client side of the limn highlight protocol.
//!
//! A [`HighlightSession`] owns one connection and multiplexes it across
//! any number of independent editor widgets: widgets register a numeric id
//! and a delivery channel, fire requests tagged with that id, and receive
//! whichever responses come back for it. The session reconnects by itself
//! and never errors toward its callers; the intentional data-loss paths
//! (offline drops, orphaned responses) are observable through
//! [`SessionStats`].
//!
//! The transport is abstract — anything that can move text frames in
//! order fits behind [`Connector`] — which keeps the session testable
//! without a network.

pub mod session;
pub mod transport;

pub use limn_protocol::SelectorKind;
pub use session::{HighlightSession, SessionConfig, SessionStats};
pub use transport::{ConnectError, Connection, Connector};
