//! Command-surface types: named channels, typed requests, typed replies.
//!
//! Commands arrive as JSON objects naming a channel and a method, with an
//! optional argument object.  Decoding is deliberately tolerant: a missing
//! or malformed coordinate becomes `0.0` at this boundary, and the call
//! never fails over argument shape.  The only caller-visible negative
//! outcome on the whole surface is the `notImplemented` reply for
//! unrecognized channel/method combinations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::geometry::TouchCommand;

// ── Channel and method names ──────────────────────────────────────────────────

/// Channel carrying capture-session commands.
pub const SCREEN_SESSION_CHANNEL: &str = "screen-session";

/// Starts the capture session.  No arguments.
pub const START_SCREEN_SERVICE_METHOD: &str = "startScreenService";

/// Channel carrying remote-control touch commands.
pub const REMOTE_TOUCH_CHANNEL: &str = "remote-touch";

/// Injects a tap at `(x, y)`.  Both arguments optional, defaulting to 0.0.
pub const SEND_TOUCH_METHOD: &str = "sendTouch";

// ── Request / reply ───────────────────────────────────────────────────────────

/// A named command from the calling layer.
///
/// `args` is an arbitrary JSON value (`null` when the caller sent none);
/// each operation decodes it with its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Logical channel the command was sent on.
    pub channel: String,
    /// Operation name within the channel.
    pub method: String,
    /// Operation arguments, if any.
    #[serde(default)]
    pub args: Value,
}

/// The bridge's answer to a command.
///
/// `Ack` means "accepted" only: for fire-and-forget operations it says
/// nothing about whether the forwarded action ultimately took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CommandReply {
    /// The command was recognized and accepted.
    Ack,
    /// The channel/method combination is not part of the command surface.
    NotImplemented,
}

// ── Argument decoding ─────────────────────────────────────────────────────────

/// Decoded `sendTouch` arguments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchArgs {
    pub x: f64,
    pub y: f64,
}

impl TouchArgs {
    /// Decodes touch arguments from an arbitrary JSON value.
    ///
    /// Total over all inputs: an absent field, a non-numeric field, or a
    /// non-object `args` value all decode to `0.0` for the coordinate in
    /// question.  Decode failure is modelled as "use the default", not as an
    /// error.
    pub fn decode(args: &Value) -> Self {
        Self {
            x: coordinate_or_zero(args, "x"),
            y: coordinate_or_zero(args, "y"),
        }
    }

    /// Converts the decoded arguments into a domain [`TouchCommand`].
    pub fn into_command(self) -> TouchCommand {
        TouchCommand::new(self.x, self.y)
    }
}

/// Reads one numeric field, defaulting to `0.0` when absent or malformed.
fn coordinate_or_zero(args: &Value, key: &str) -> f64 {
    args.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
