//! Infrastructure layer for the agent.
//!
//! Contains the outward-facing adapters: the WebSocket control ingress,
//! configuration storage, and the platform seams for gesture injection,
//! display probing, and the foreground indicator.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `reach_core`, but MUST NOT be imported by the `application` or domain
//! layers.
//!
//! # Sub-modules
//!
//! - **`gesture`** – Implementations of `PlatformGestureDispatcher`.  The
//!   real dispatcher belongs to the host embedding that owns the OS-granted
//!   capability; this tree ships the recording mock used by tests and by
//!   the demo wiring.
//!
//! - **`display`** – Implementations of `PlatformDisplayProbe`.  Same
//!   situation: the live display query comes from the host embedding, the
//!   mock ships here.
//!
//! - **`indicator`** – Implementations of `ForegroundIndicator` (the
//!   ongoing-notification primitive).
//!
//! - **`control`** – The WebSocket server that receives JSON command frames
//!   from controllers and answers with command replies.
//!
//! - **`storage`** – TOML configuration loading/saving in the platform
//!   config directory.

pub mod control;
pub mod display;
pub mod gesture;
pub mod indicator;
pub mod storage;
