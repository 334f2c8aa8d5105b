//! Application layer use cases for the agent.
//!
//! # What use cases does the agent have?
//!
//! - **`registry`** – Holds the at-most-one currently-connected
//!   touch-injection capability handle.  The OS capability lifecycle calls
//!   `connect`/`disconnect`; everything else only ever takes point-in-time
//!   snapshots via `current()`.
//!
//! - **`inject_touch`** – Turns a caller-supplied touch command into a
//!   clamped, dispatched tap gesture and watches the asynchronous outcome on
//!   a spawned task.  The OS-facing work happens behind the
//!   `PlatformGestureDispatcher` and `PlatformDisplayProbe` traits, injected
//!   at construction time.
//!
//! - **`capture_service`** – Drives the capture-session state machine and
//!   executes its effects: the visible indicator is registered through the
//!   injected `ForegroundIndicator` before the session is considered
//!   running.
//!
//! - **`command_bridge`** – Stateless routing from decoded command requests
//!   to the two use cases above; answers `notImplemented` for everything it
//!   does not recognize.

pub mod capture_service;
pub mod command_bridge;
pub mod inject_touch;
pub mod registry;
