//! CommandBridge: routes named commands to the agent's use cases.
//!
//! The bridge is deliberately boring: it holds no state of its own and does
//! nothing but decode arguments (applying per-operation defaults) and
//! forward.  Both known operations reply `Ack` as soon as the command has
//! been handed off; the ack means "accepted", not "it worked".  Whether a
//! touch was actually injected (capability present, gesture completed) is
//! visible only through the injection use case's diagnostics, never through
//! the reply.
//!
//! Anything outside the two known channel/method pairs gets the explicit
//! `NotImplemented` reply.  Commands never fail: there is no error arm.

use std::sync::Arc;

use reach_core::protocol::commands::{
    CommandReply, CommandRequest, TouchArgs, REMOTE_TOUCH_CHANNEL, SCREEN_SESSION_CHANNEL,
    SEND_TOUCH_METHOD, START_SCREEN_SERVICE_METHOD,
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::capture_service::CaptureService;
use crate::application::inject_touch::InjectTouchUseCase;

/// Stateless router from decoded command requests to use cases.
pub struct CommandBridge {
    touch: Arc<InjectTouchUseCase>,
    capture: Arc<Mutex<CaptureService>>,
}

impl CommandBridge {
    /// Creates a bridge over the two use cases.
    pub fn new(touch: Arc<InjectTouchUseCase>, capture: Arc<Mutex<CaptureService>>) -> Self {
        Self { touch, capture }
    }

    /// Handles one command and produces the caller's reply.
    ///
    /// `startScreenService` drives the capture session's start transition
    /// before acking; the ack does not depend on the session outcome.
    /// `sendTouch` decodes coordinates (missing/malformed fields become
    /// `0.0`) and hands the command to touch injection, which resolves its
    /// fate asynchronously.
    pub async fn handle(&self, request: &CommandRequest) -> CommandReply {
        match (request.channel.as_str(), request.method.as_str()) {
            (SCREEN_SESSION_CHANNEL, START_SCREEN_SERVICE_METHOD) => {
                self.capture.lock().await.start();
                CommandReply::Ack
            }
            (REMOTE_TOUCH_CHANNEL, SEND_TOUCH_METHOD) => {
                let command = TouchArgs::decode(&request.args).into_command();
                self.touch.handle_touch(command);
                CommandReply::Ack
            }
            _ => {
                debug!(
                    "unrecognized command: {}/{}",
                    request.channel, request.method
                );
                CommandReply::NotImplemented
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::capture_service::{ForegroundIndicator, IndicatorError};
    use crate::application::inject_touch::{
        DisplayError, DropReason, InjectionEvent, PlatformDisplayProbe,
    };
    use crate::application::registry::CapabilityRegistry;
    use reach_core::{CaptureState, IndicatorSpec, ScreenBounds};
    use serde_json::{json, Value};
    use tokio::sync::mpsc;

    // ── Minimal stubs (routing is under test, not the use cases) ─────────────

    struct NullIndicator;

    impl ForegroundIndicator for NullIndicator {
        fn establish(&self, _spec: &IndicatorSpec) -> Result<(), IndicatorError> {
            Ok(())
        }

        fn clear(&self) {}
    }

    struct PhoneProbe;

    impl PlatformDisplayProbe for PhoneProbe {
        fn bounds(&self) -> Result<ScreenBounds, DisplayError> {
            Ok(ScreenBounds::new(1080, 2400))
        }
    }

    fn make_bridge() -> (
        CommandBridge,
        mpsc::Receiver<InjectionEvent>,
        Arc<Mutex<CaptureService>>,
    ) {
        let registry = Arc::new(CapabilityRegistry::new());
        let (touch, events) = InjectTouchUseCase::new(registry, Arc::new(PhoneProbe));
        let capture = Arc::new(Mutex::new(CaptureService::new(Arc::new(NullIndicator))));
        let bridge = CommandBridge::new(Arc::new(touch), Arc::clone(&capture));
        (bridge, events, capture)
    }

    fn request(channel: &str, method: &str, args: Value) -> CommandRequest {
        CommandRequest {
            channel: channel.to_string(),
            method: method.to_string(),
            args,
        }
    }

    #[tokio::test]
    async fn test_start_screen_service_acks_and_starts_the_session() {
        // Arrange
        let (bridge, _events, capture) = make_bridge();

        // Act
        let reply = bridge
            .handle(&request("screen-session", "startScreenService", Value::Null))
            .await;

        // Assert
        assert_eq!(reply, CommandReply::Ack);
        assert_eq!(capture.lock().await.state(), CaptureState::Running);
    }

    #[tokio::test]
    async fn test_send_touch_acks_even_without_a_capability() {
        // Arrange – no capability was ever connected
        let (bridge, mut events, _capture) = make_bridge();

        // Act
        let reply = bridge
            .handle(&request(
                "remote-touch",
                "sendTouch",
                json!({ "x": 100.0, "y": 200.0 }),
            ))
            .await;

        // Assert – caller sees success; the drop is diagnostic only
        assert_eq!(reply, CommandReply::Ack);
        assert_eq!(
            events.recv().await,
            Some(InjectionEvent::Dropped {
                reason: DropReason::NoCapability
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_method_on_known_channel_is_not_implemented() {
        // Arrange
        let (bridge, _events, capture) = make_bridge();

        // Act
        let reply = bridge
            .handle(&request("screen-session", "stopScreenService", Value::Null))
            .await;

        // Assert – explicit not-implemented, and nothing was triggered
        assert_eq!(reply, CommandReply::NotImplemented);
        assert_eq!(capture.lock().await.state(), CaptureState::Stopped);
    }

    #[tokio::test]
    async fn test_unknown_channel_is_not_implemented() {
        let (bridge, _events, _capture) = make_bridge();

        let reply = bridge
            .handle(&request("clipboard", "paste", Value::Null))
            .await;

        assert_eq!(reply, CommandReply::NotImplemented);
    }

    #[tokio::test]
    async fn test_method_names_are_matched_within_their_channel() {
        // `sendTouch` on the screen-session channel is not a real operation.
        let (bridge, _events, _capture) = make_bridge();

        let reply = bridge
            .handle(&request("screen-session", "sendTouch", Value::Null))
            .await;

        assert_eq!(reply, CommandReply::NotImplemented);
    }
}
