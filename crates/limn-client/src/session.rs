//! Multiplexed highlight session
//!
//! One shared connection serving any number of editor widgets. Every
//! request carries a widget-chosen correlation id; the response echoes it,
//! and the session routes the markup to whichever widget is registered
//! under that id at delivery time. Requests are fire-and-forget: while the
//! connection is down they are dropped rather than queued, and a request
//! whose connection dies before the response arrives is simply never
//! answered. The session reconnects on its own with capped exponential
//! backoff.
//!
//! Every silent-drop path increments a [`SessionStats`] counter so the
//! behavior stays observable without changing it.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{Instant, MissedTickBehavior, interval, sleep};
use tracing::{debug, info, warn};

use limn_protocol::{HighlightRequest, HighlightResponse, SelectorKind};

use crate::transport::{Connection, Connector};

/// Session tunables.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Delay before the first reconnect attempt after a connection loss.
    pub initial_backoff: Duration,
    /// Ceiling for the doubling reconnect delay.
    pub max_backoff: Duration,
    /// Expire unanswered requests after this long; their late responses are
    /// then discarded instead of delivered. `None` keeps requests pending
    /// forever and delivers however late a response arrives.
    pub request_timeout: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
            request_timeout: None,
        }
    }
}

/// Counters for the paths that intentionally drop data.
#[derive(Debug, Default)]
pub struct SessionStats {
    connects: AtomicU64,
    requests_sent: AtomicU64,
    dropped_offline: AtomicU64,
    discarded_responses: AtomicU64,
    malformed_responses: AtomicU64,
    expired_requests: AtomicU64,
}

impl SessionStats {
    /// Successful connections over the session's lifetime, first included.
    pub fn connects(&self) -> u64 {
        self.connects.load(Ordering::Relaxed)
    }

    pub fn requests_sent(&self) -> u64 {
        self.requests_sent.load(Ordering::Relaxed)
    }

    /// Requests dropped because no connection was up.
    pub fn dropped_offline(&self) -> u64 {
        self.dropped_offline.load(Ordering::Relaxed)
    }

    /// Responses with no registered widget, or for expired requests.
    pub fn discarded_responses(&self) -> u64 {
        self.discarded_responses.load(Ordering::Relaxed)
    }

    pub fn malformed_responses(&self) -> u64 {
        self.malformed_responses.load(Ordering::Relaxed)
    }

    /// Requests reaped by the optional timeout without a response.
    pub fn expired_requests(&self) -> u64 {
        self.expired_requests.load(Ordering::Relaxed)
    }
}

enum Command {
    Register {
        id: u64,
        widget: UnboundedSender<String>,
    },
    Unregister {
        id: u64,
    },
    Request {
        id: u64,
        frame: String,
    },
}

/// Handle to a running session. Cheap to clone; the driver task stops when
/// every handle is gone.
#[derive(Clone)]
pub struct HighlightSession {
    commands: UnboundedSender<Command>,
    stats: Arc<SessionStats>,
}

impl HighlightSession {
    /// Start the session driver on the current runtime.
    pub fn spawn<C: Connector>(connector: C, config: SessionConfig) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let stats = Arc::new(SessionStats::default());
        tokio::spawn(drive(connector, config, command_rx, Arc::clone(&stats)));
        Self { commands, stats }
    }

    /// Route future responses for `id` to `widget`. Re-registering an id
    /// replaces the previous widget.
    pub fn register(&self, id: u64, widget: UnboundedSender<String>) {
        let _ = self.commands.send(Command::Register { id, widget });
    }

    /// Stop routing responses for `id`. A response that arrives afterwards
    /// is discarded without error.
    pub fn unregister(&self, id: u64) {
        let _ = self.commands.send(Command::Unregister { id });
    }

    /// Fire-and-forget highlight request. Never blocks; if the connection
    /// is down the request is dropped and the widget hears nothing.
    pub fn request(&self, id: u64, selector: &str, kind: SelectorKind, source: &str) {
        let frame = HighlightRequest {
            id: id.to_string(),
            selector: selector.to_string(),
            kind,
            source: source.to_string(),
        }
        .encode();
        let _ = self.commands.send(Command::Request { id, frame });
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }
}

/// Outstanding requests for one widget id, oldest first. The transport is
/// ordered and the server answers every sent frame exactly once, so a
/// response always answers the front slot. `None` marks a slot whose
/// request the reaper expired; it stays queued as a tombstone until its
/// response arrives, so a late response can never answer a newer request
/// sent under a reused id.
type Outstanding = VecDeque<Option<Instant>>;

async fn drive<C: Connector>(
    mut connector: C,
    config: SessionConfig,
    mut commands: UnboundedReceiver<Command>,
    stats: Arc<SessionStats>,
) {
    let mut widgets: HashMap<u64, UnboundedSender<String>> = HashMap::new();
    let mut pending: HashMap<u64, Outstanding> = HashMap::new();
    let mut backoff = config.initial_backoff;

    loop {
        let mut connection = loop {
            // The connection counts as down until the dial returns, so
            // requests submitted mid-dial are dropped, not queued.
            let dial = connector.connect();
            tokio::pin!(dial);
            let attempt = loop {
                tokio::select! {
                    attempt = &mut dial => break attempt,
                    command = commands.recv() => match command {
                        None => return,
                        Some(command) => apply_offline(command, &mut widgets, &stats),
                    },
                }
            };
            match attempt {
                Ok(connection) => break connection,
                Err(err) => {
                    warn!("connect failed, retrying in {backoff:?}: {err}");
                    let retry = sleep(backoff);
                    tokio::pin!(retry);
                    loop {
                        tokio::select! {
                            _ = &mut retry => break,
                            command = commands.recv() => match command {
                                None => return,
                                Some(command) => apply_offline(command, &mut widgets, &stats),
                            },
                        }
                    }
                    backoff = (backoff * 2).min(config.max_backoff);
                }
            }
        };
        backoff = config.initial_backoff;
        stats.connects.fetch_add(1, Ordering::Relaxed);
        info!("🔌 highlight session connected");
        // Whatever was in flight died with the old connection.
        pending.clear();

        let reap_period = config.request_timeout.unwrap_or(Duration::from_secs(3600));
        let mut reaper = interval(reap_period);
        reaper.set_missed_tick_behavior(MissedTickBehavior::Delay);
        reaper.tick().await;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    None => return,
                    Some(Command::Register { id, widget }) => {
                        widgets.insert(id, widget);
                    }
                    Some(Command::Unregister { id }) => {
                        widgets.remove(&id);
                    }
                    Some(Command::Request { id, frame }) => {
                        if connection.outgoing.send(frame).is_err() {
                            stats.dropped_offline.fetch_add(1, Ordering::Relaxed);
                            warn!("🔌 connection lost, reconnecting");
                            break;
                        }
                        stats.requests_sent.fetch_add(1, Ordering::Relaxed);
                        if config.request_timeout.is_some() {
                            pending.entry(id).or_default().push_back(Some(Instant::now()));
                        }
                    }
                },
                frame = connection.incoming.recv() => match frame {
                    None => {
                        warn!("🔌 connection closed, reconnecting");
                        break;
                    }
                    Some(frame) => deliver(&frame, &widgets, &mut pending, &config, &stats),
                },
                _ = reaper.tick() => {
                    if let Some(timeout) = config.request_timeout {
                        reap_expired(&mut pending, timeout, &stats);
                    }
                }
            }
        }
    }
}

/// Command handling while no connection is up: registration still works,
/// requests are dropped rather than queued.
fn apply_offline(
    command: Command,
    widgets: &mut HashMap<u64, UnboundedSender<String>>,
    stats: &SessionStats,
) {
    match command {
        Command::Register { id, widget } => {
            widgets.insert(id, widget);
        }
        Command::Unregister { id } => {
            widgets.remove(&id);
        }
        Command::Request { id, .. } => {
            stats.dropped_offline.fetch_add(1, Ordering::Relaxed);
            debug!(id, "request while disconnected, dropping");
        }
    }
}

fn deliver(
    frame: &str,
    widgets: &HashMap<u64, UnboundedSender<String>>,
    pending: &mut HashMap<u64, Outstanding>,
    config: &SessionConfig,
    stats: &SessionStats,
) {
    let response = match HighlightResponse::parse(frame) {
        Ok(response) => response,
        Err(err) => {
            stats.malformed_responses.fetch_add(1, Ordering::Relaxed);
            warn!("dropping malformed response frame: {err}");
            return;
        }
    };
    let Ok(id) = response.id.parse::<u64>() else {
        stats.malformed_responses.fetch_add(1, Ordering::Relaxed);
        warn!(id = %response.id, "dropping response with non-numeric id");
        return;
    };
    if config.request_timeout.is_some() {
        // The response answers the oldest outstanding slot under its id.
        let answered = pending.get_mut(&id).and_then(|queue| queue.pop_front());
        if pending.get(&id).is_some_and(|queue| queue.is_empty()) {
            pending.remove(&id);
        }
        if !matches!(answered, Some(Some(_))) {
            // Expired, or belonged to a previous connection. Late responses
            // must stay ignorable.
            stats.discarded_responses.fetch_add(1, Ordering::Relaxed);
            debug!(id, "dropping response for expired request");
            return;
        }
    }
    match widgets.get(&id) {
        Some(widget) if widget.send(response.markup).is_ok() => {}
        _ => {
            stats.discarded_responses.fetch_add(1, Ordering::Relaxed);
            debug!(id, "no widget registered for response, discarding");
        }
    }
}

fn reap_expired(pending: &mut HashMap<u64, Outstanding>, timeout: Duration, stats: &SessionStats) {
    let now = Instant::now();
    for (id, queue) in pending.iter_mut() {
        // Expired slots become tombstones rather than disappearing, so
        // later responses still line up with their own requests.
        for slot in queue.iter_mut() {
            let Some(sent) = *slot else { continue };
            if now.duration_since(sent) >= timeout {
                stats.expired_requests.fetch_add(1, Ordering::Relaxed);
                debug!(id = *id, "request expired without a response");
                *slot = None;
            }
        }
    }
}
