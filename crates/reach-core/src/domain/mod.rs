//! Domain entities for ScreenReach.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain** (or "entities" layer).  Domain code:
//!
//! - Contains the core business rules of the application.
//! - Has **no** imports from OS APIs, network libraries, async runtimes, or UI
//!   frameworks.
//! - Can be compiled and tested on any platform without any external setup.
//! - Defines the data types and operations that make the system uniquely what
//!   it is: in this case, clamping remote touch coordinates onto a live
//!   screen, describing tap gestures the OS can inject, and the lifecycle of
//!   a capture session that must stay user-visible while it runs.
//!
//! Code in outer layers (application, infrastructure) depends on the domain,
//! but the domain never depends on them.  This makes the domain easy to
//! unit-test in isolation.

/// Screen bounds, touch commands, and coordinate clamping.
pub mod geometry;

/// Tap gesture construction and dispatch outcomes.
pub mod gesture;

/// The capture-session lifecycle state machine.
///
/// See [`session::CaptureSession`] for the main type.
pub mod session;
