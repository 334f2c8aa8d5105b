//! # reach-core
//!
//! Shared library for ScreenReach containing the touch/gesture domain model,
//! the capture-session state machine, and the command protocol types.
//!
//! This crate is used by the device agent (and any future controller-side
//! tooling).  It has zero dependencies on OS APIs, async runtimes, or network
//! sockets.
//!
//! # Architecture overview (for beginners)
//!
//! ScreenReach turns a device into a remotely-viewable, remotely-controllable
//! screen: a controller sees the device's screen and sends touch commands
//! back.  The device side needs two privileged OS capabilities for that: a
//! long-running screen-capture session (which the OS requires to stay
//! user-visible) and synthetic touch injection (which the user must grant
//! explicitly, and which can disappear again at any time).
//!
//! This crate (`reach-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – Pure business logic with no OS dependencies.  Screen
//!   geometry and coordinate clamping, tap-gesture construction, and the
//!   capture-session lifecycle expressed as an event-driven state machine.
//!
//! - **`protocol`** – The command surface: typed requests and replies for the
//!   named channels a controller can call (`screen-session`, `remote-touch`),
//!   including the tolerant argument decoding that turns missing or malformed
//!   coordinates into `0.0` instead of an error.

// Declare the two top-level modules.  Rust will look for each in a
// subdirectory with the same name (e.g., src/domain/mod.rs).
pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `reach_core::TouchCommand` instead of `reach_core::domain::geometry::TouchCommand`.
pub use domain::geometry::{ScreenBounds, TapPoint, TouchCommand};
pub use domain::gesture::{GestureOutcome, GestureRequest, GestureStroke, TAP_DURATION_MS};
pub use domain::session::{
    CaptureSession, CaptureState, IndicatorSpec, SessionEffect, SessionEvent,
};
pub use protocol::commands::{CommandReply, CommandRequest, TouchArgs};
