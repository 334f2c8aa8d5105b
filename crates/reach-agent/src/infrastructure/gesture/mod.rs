//! Gesture dispatcher implementations.
//!
//! The production dispatcher is owned by the host embedding: whatever
//! process-level component receives the OS capability grant constructs a
//! [`PlatformGestureDispatcher`](crate::application::inject_touch::PlatformGestureDispatcher)
//! around it and connects it to the registry.  This tree only ships the
//! mock, which is all the agent's own logic ever needs to see.

pub mod mock;

pub use mock::{MockGestureDispatcher, ScriptedOutcome};
