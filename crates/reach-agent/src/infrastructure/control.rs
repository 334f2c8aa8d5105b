//! WebSocket control server: accept loop and per-session command routing.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured address.
//! 2. Accepting incoming TCP connections from controllers.
//! 3. Upgrading each connection to a WebSocket session.
//! 4. Reading JSON command frames and routing each through the
//!    [`CommandBridge`].
//! 5. Writing the JSON reply frame for every command.
//! 6. Gracefully shutting down when the `running` flag is cleared.
//!
//! # Scalability
//!
//! Each controller session runs in its own Tokio task.  The `run_server`
//! accept loop never blocks: it accepts a connection and immediately spawns a
//! task for it before accepting the next one, so one slow controller never
//! delays others.
//!
//! # Replies are acknowledgements, not outcomes
//!
//! A command frame is acknowledged as soon as it is routed.  Touch commands in
//! particular are fire-and-forget: the gesture outcome arrives later on the
//! injection event channel and surfaces in the log, never in the reply frame.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::{
    accept_async,
    tungstenite::{Error as WsError, Message as WsMessage},
};
use tracing::{debug, error, info, warn};

use reach_core::{CommandReply, CommandRequest};

use crate::application::command_bridge::CommandBridge;

// ── Public API ────────────────────────────────────────────────────────────────

/// Runs the control server accept loop until `running` is set to `false`.
///
/// Binds a TCP listener on `bind_addr` and accepts incoming connections in a
/// loop.  Each accepted connection is handed off to a dedicated Tokio task.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot be bound (e.g., the port is
/// already in use or the process lacks permission to bind).
pub async fn run_server(
    bind_addr: SocketAddr,
    bridge: Arc<CommandBridge>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind control listener on {bind_addr}"))?;

    info!("control server listening on {bind_addr}");

    loop {
        // Check the shutdown flag before each accept attempt.
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping accept loop");
            break;
        }

        // Use a short timeout on `accept()` so the loop can periodically check
        // the `running` flag even when no controllers are connecting.
        let accept_result = timeout(Duration::from_millis(200), listener.accept()).await;

        match accept_result {
            Ok(Ok((stream, peer_addr))) => {
                info!("new controller connection from {peer_addr}");
                let bridge = Arc::clone(&bridge);

                // Spawn a dedicated Tokio task for this session so the accept
                // loop is never delayed by session I/O.
                tokio::spawn(async move {
                    handle_control_session(stream, peer_addr, bridge).await;
                });
            }
            Ok(Err(e)) => {
                // Transient accept error (e.g., too many open file
                // descriptors).  Log it and continue rather than crashing.
                error!("accept error: {e}");
            }
            Err(_) => {
                // Timeout: no new connection in the last 200 ms.  Loop back to
                // check the `running` flag.
            }
        }
    }

    Ok(())
}

// ── Per-session handler ───────────────────────────────────────────────────────

/// Top-level handler for a single controller session.
///
/// Wraps [`run_session`] and logs the outcome.  The outer/inner function pair
/// lets `run_session` use `?` for clean error propagation while errors are
/// logged here.
async fn handle_control_session(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    bridge: Arc<CommandBridge>,
) {
    match run_session(raw_stream, peer_addr, bridge).await {
        Ok(()) => info!("session {peer_addr} closed normally"),
        Err(e) => warn!("session {peer_addr} closed with error: {e:#}"),
    }
}

/// Runs the complete lifecycle of a single controller session.
///
/// Completes the WebSocket handshake, then serves frames one at a time: each
/// text frame is decoded, routed through the bridge, and answered with exactly
/// one reply frame.  A malformed frame gets a `notImplemented` reply rather
/// than closing the session; the controller may send a well-formed command
/// next.
///
/// # Errors
///
/// Returns an error if the WebSocket handshake fails.
async fn run_session(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    bridge: Arc<CommandBridge>,
) -> anyhow::Result<()> {
    // `accept_async` reads the controller's HTTP Upgrade request and sends the
    // "101 Switching Protocols" response.  After this, `ws_stream` speaks
    // WebSocket frames instead of raw HTTP.
    let ws_stream = accept_async(raw_stream)
        .await
        .with_context(|| format!("WebSocket handshake failed with {peer_addr}"))?;

    info!("control session established: {peer_addr}");

    let (mut ws_tx, mut ws_rx) = ws_stream.split();

    // Session identifier string used in log messages.
    let session_id = peer_addr.to_string();

    loop {
        // `next()` returns `None` when the stream is closed.
        let ws_msg = match ws_rx.next().await {
            Some(Ok(msg)) => msg,
            Some(Err(WsError::ConnectionClosed | WsError::Protocol(_))) => {
                debug!("session {session_id}: controller WebSocket closed normally");
                break;
            }
            Some(Err(e)) => {
                warn!("session {session_id}: controller WebSocket error: {e}");
                break;
            }
            None => {
                debug!("session {session_id}: controller stream ended");
                break;
            }
        };

        match ws_msg {
            WsMessage::Text(json_str) => {
                let reply = reply_for_frame(&bridge, &json_str).await;

                let json_reply = match serde_json::to_string(&reply) {
                    Ok(s) => s,
                    Err(e) => {
                        error!("session {session_id}: reply serialization error: {e}");
                        continue;
                    }
                };

                if ws_tx.send(WsMessage::Text(json_reply)).await.is_err() {
                    debug!("session {session_id}: WebSocket send failed (controller disconnected)");
                    break;
                }
            }

            WsMessage::Binary(_) => {
                // The control protocol is JSON-only.  Binary frames are
                // unexpected; log and skip.
                warn!("session {session_id}: unexpected binary WebSocket frame (ignored)");
            }

            WsMessage::Ping(data) => {
                // Protocol-level ping; tokio-tungstenite queues the Pong reply
                // automatically when writing to the sink.  Just log it.
                debug!("session {session_id}: WebSocket ping ({} bytes)", data.len());
            }

            WsMessage::Pong(_) => {
                debug!("session {session_id}: WebSocket pong received");
            }

            WsMessage::Close(_) => {
                debug!("session {session_id}: WebSocket Close frame received");
                break;
            }

            WsMessage::Frame(_) => {
                debug!("session {session_id}: raw frame (ignored)");
            }
        }
    }

    Ok(())
}

// ── Frame handling ────────────────────────────────────────────────────────────

/// Decodes one text frame and routes it through the bridge.
///
/// A frame that does not parse as a [`CommandRequest`] is answered with
/// [`CommandReply::NotImplemented`]; one bad frame must not end the session.
async fn reply_for_frame(bridge: &CommandBridge, text: &str) -> CommandReply {
    match serde_json::from_str::<CommandRequest>(text) {
        Ok(request) => {
            debug!("command frame: {}", frame_summary(&request));
            bridge.handle(&request).await
        }
        Err(e) => {
            warn!("invalid command frame: {e}");
            CommandReply::NotImplemented
        }
    }
}

/// Returns a short `channel/method` string for a command request.
///
/// Used in debug log messages so the log shows what was asked without
/// dumping the full argument payload.
fn frame_summary(request: &CommandRequest) -> String {
    format!("{}/{}", request.channel, request.method)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::capture_service::CaptureService;
    use crate::application::command_bridge::CommandBridge;
    use crate::application::inject_touch::{InjectTouchUseCase, PlatformGestureDispatcher};
    use crate::application::registry::CapabilityRegistry;
    use crate::infrastructure::display::MockDisplayProbe;
    use crate::infrastructure::gesture::MockGestureDispatcher;
    use crate::infrastructure::indicator::MockIndicator;

    /// Builds a bridge wired to mocks, returning the dispatcher so tests can
    /// inspect what was injected.
    fn make_bridge() -> (Arc<CommandBridge>, Arc<MockGestureDispatcher>) {
        let registry = Arc::new(CapabilityRegistry::new());
        let dispatcher = Arc::new(MockGestureDispatcher::completing());
        let handle = Arc::clone(&dispatcher) as Arc<dyn PlatformGestureDispatcher>;
        registry.connect(&handle);

        let probe = Arc::new(MockDisplayProbe::phone_portrait());
        let (touch, _events) = InjectTouchUseCase::new(registry, probe);
        let capture = CaptureService::new(Arc::new(MockIndicator::new()));

        let bridge = Arc::new(CommandBridge::new(
            Arc::new(touch),
            Arc::new(tokio::sync::Mutex::new(capture)),
        ));
        (bridge, dispatcher)
    }

    #[tokio::test]
    async fn test_reply_for_frame_routes_touch_command() {
        // Arrange
        let (bridge, dispatcher) = make_bridge();
        let frame = r#"{"channel":"remote-touch","method":"sendTouch","args":{"x":100.0,"y":200.0}}"#;

        // Act
        let reply = reply_for_frame(&bridge, frame).await;

        // Assert
        assert_eq!(reply, CommandReply::Ack);
        assert_eq!(dispatcher.tap_points(), vec![(100.0, 200.0)]);
    }

    #[tokio::test]
    async fn test_reply_for_frame_malformed_json_yields_not_implemented() {
        // Arrange
        let (bridge, dispatcher) = make_bridge();

        // Act
        let reply = reply_for_frame(&bridge, "{not json at all").await;

        // Assert
        assert_eq!(reply, CommandReply::NotImplemented);
        assert_eq!(dispatcher.dispatch_count(), 0);
    }

    #[tokio::test]
    async fn test_reply_for_frame_unknown_channel_yields_not_implemented() {
        // Arrange
        let (bridge, _dispatcher) = make_bridge();
        let frame = r#"{"channel":"clipboard","method":"paste"}"#;

        // Act
        let reply = reply_for_frame(&bridge, frame).await;

        // Assert
        assert_eq!(reply, CommandReply::NotImplemented);
    }

    #[test]
    fn test_frame_summary_shows_channel_and_method() {
        let request = CommandRequest {
            channel: "remote-touch".to_string(),
            method: "sendTouch".to_string(),
            args: serde_json::Value::Null,
        };
        assert_eq!(frame_summary(&request), "remote-touch/sendTouch");
    }
}
