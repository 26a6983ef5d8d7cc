//! WebSocket server for the highlight session protocol
//!
//! Editor widgets send request frames over a long-lived socket; each frame
//! is parsed, resolved, highlighted, and answered in arrival order. Invalid
//! frames are dropped without a reply and the connection stays open.

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use color_eyre::Result;
use futures_util::{SinkExt, StreamExt};
use limn_protocol::{HighlightRequest, HighlightResponse};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

/// Shared state for the highlight server
pub struct HighlightServer {
    /// Interval between keepalive pings on idle connections
    keepalive: Duration,
    stats: ServeStats,
}

/// Counters shared by every connection. The drop path sends nothing on the
/// wire, so this is the only place it shows up.
#[derive(Debug, Default)]
pub struct ServeStats {
    connections: AtomicU64,
    frames_answered: AtomicU64,
    frames_dropped: AtomicU64,
}

impl ServeStats {
    pub fn connections(&self) -> u64 {
        self.connections.load(Ordering::Relaxed)
    }

    pub fn frames_answered(&self) -> u64 {
        self.frames_answered.load(Ordering::Relaxed)
    }

    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped.load(Ordering::Relaxed)
    }
}

impl HighlightServer {
    pub fn new(keepalive: Duration) -> Self {
        Self {
            keepalive,
            stats: ServeStats::default(),
        }
    }

    pub fn stats(&self) -> &ServeStats {
        &self.stats
    }

    /// Handle one inbound text frame.
    ///
    /// Returns the encoded response frame, or `None` when the frame is
    /// malformed or carries an unrecognized kind — those are dropped with
    /// no reply and the connection stays open.
    pub fn respond_to_frame(&self, frame: &str) -> Option<String> {
        let request = match HighlightRequest::parse(frame) {
            Ok(request) => request,
            Err(error) => {
                self.stats.frames_dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(%error, "dropping invalid highlight frame");
                return None;
            }
        };

        let markup =
            limn_highlight::highlight_to_html(request.kind, &request.selector, &request.source);
        self.stats.frames_answered.fetch_add(1, Ordering::Relaxed);

        let response = HighlightResponse {
            id: request.id,
            markup,
        };
        Some(response.encode())
    }
}

/// WebSocket upgrade for the highlight session endpoint
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(server): State<Arc<HighlightServer>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, server))
}

async fn handle_socket(socket: WebSocket, server: Arc<HighlightServer>) {
    let (mut sender, mut receiver) = socket.split();
    server.stats.connections.fetch_add(1, Ordering::Relaxed);
    tracing::info!("🔌 editor connected");

    let mut keepalive = tokio::time::interval(server.keepalive);
    // The first tick completes immediately; consume it so pings start one
    // interval after connect.
    keepalive.tick().await;

    loop {
        tokio::select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        // Frames on one connection are answered strictly in
                        // arrival order; a frame that arrives mid-highlight
                        // waits in the socket buffer.
                        let Some(reply) = server.respond_to_frame(&text) else {
                            continue;
                        };
                        if sender.send(Message::Text(reply.into())).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
            _ = keepalive.tick() => {
                if sender.send(Message::Ping(Bytes::new())).await.is_err() {
                    break;
                }
            }
        }
    }

    tracing::info!("🔌 editor disconnected");
}

async fn index_handler() -> String {
    format!("limn {}\n", env!("CARGO_PKG_VERSION"))
}

async fn languages_handler() -> Json<Vec<&'static str>> {
    Json(limn_highlight::supported_languages())
}

/// Middleware to log HTTP requests with status code and latency
async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    if status >= 500 {
        tracing::error!("{} {} -> {} in {:.1}ms", method, path, status, latency_ms);
    } else if status >= 400 {
        tracing::warn!("{} {} -> {} in {:.1}ms", method, path, status, latency_ms);
    } else {
        tracing::info!("{} {} -> {} in {:.1}ms", method, path, status, latency_ms);
    }

    response
}

/// Build the axum router
pub fn build_router(server: Arc<HighlightServer>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/languages", get(languages_handler))
        .route("/ws", get(ws_handler))
        .with_state(server)
        .layer(middleware::from_fn(log_requests))
}

/// Bound listener ready to serve
pub struct BoundListener {
    pub listener: TcpListener,
    pub port: u16,
}

/// Bind the preferred port on `ip`, trying the next 19 ports when it is
/// taken and falling back to an OS-assigned one after that. A preferred
/// port of 0 asks the OS directly.
pub async fn bind_listener(ip: Ipv4Addr, preferred: u16) -> Result<BoundListener> {
    use std::io::ErrorKind;

    if preferred != 0 {
        for port in preferred..preferred.saturating_add(20) {
            let addr = format!("{ip}:{port}");
            match TcpListener::bind(&addr).await {
                Ok(listener) => return Ok(BoundListener { listener, port }),
                Err(e) if e.kind() == ErrorKind::AddrInUse => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    let listener = TcpListener::bind(format!("{ip}:0")).await?;
    let port = listener.local_addr()?.port();
    Ok(BoundListener { listener, port })
}

/// Bind and serve until ctrl-c.
pub async fn run(server: Arc<HighlightServer>, ip: Ipv4Addr, preferred_port: u16) -> Result<()> {
    let bound = bind_listener(ip, preferred_port).await?;
    tracing::info!("🔌 listening on http://{}:{}", ip, bound.port);

    let app = build_router(server);
    axum::serve(bound.listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("🔌 shutting down");
    }
}
