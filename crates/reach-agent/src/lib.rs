//! reach-agent library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does reach-agent do? (for beginners)
//!
//! The *agent* runs on the device whose screen is being shared and
//! remotely controlled.  A controller somewhere else watches the screen
//! and sends commands back; the agent is the piece that turns those
//! commands into privileged OS actions.
//!
//! The agent:
//!
//! 1. Listens for JSON command frames on a WebSocket control socket
//!    (`screen-session` and `remote-touch` channels).
//! 2. Starts the capture session on command, registering the persistent
//!    visible indicator the OS demands *before* the session counts as
//!    running.
//! 3. Tracks whether the user-granted touch-injection capability is
//!    currently connected; it can appear and vanish at any time, and the
//!    agent must keep working (by dropping touches) while it is absent.
//! 4. Clamps incoming touch coordinates onto the live screen, builds a tap
//!    gesture, and dispatches it through the capability.
//! 5. Watches each dispatched gesture's asynchronous outcome and logs
//!    completion or cancellation without ever blocking the command path.

/// Application layer: use cases for the agent.
pub mod application;

/// Infrastructure layer: platform adapters, the control ingress, and config.
pub mod infrastructure;
