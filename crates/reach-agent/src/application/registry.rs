//! CapabilityRegistry: tracks the at-most-one connected touch-injection handle.
//!
//! The OS grants and revokes the touch-injection capability on its own
//! schedule: the user may enable it minutes after the agent starts, or
//! revoke it mid-session.  The registry is the one piece of shared mutable
//! state in the agent: the capability lifecycle writes it (via
//! [`CapabilityRegistry::connect`] / [`CapabilityRegistry::disconnect`]),
//! touch injection reads it.
//!
//! Two rules keep this safe:
//!
//! - The slot holds a [`Weak`] reference.  The registry never keeps the OS
//!   handle alive; once the OS side drops it, reads see "absent" even if
//!   `disconnect` was never called.
//! - [`CapabilityRegistry::current`] upgrades under the lock and hands out
//!   an owned [`Arc`].  That snapshot stays usable for the command being
//!   processed even if the capability disconnects concurrently; a command
//!   races the *disconnect notification*, never a dangling handle.
//!
//! Absence is a normal state, not an error.  Callers decide what to do with
//! `None` (touch injection drops the command).

use std::sync::{Arc, RwLock, Weak};

use crate::application::inject_touch::PlatformGestureDispatcher;

/// A live, connected touch-injection capability.
pub type CapabilityHandle = Arc<dyn PlatformGestureDispatcher>;

/// Holder of the currently-connected capability handle, if any.
#[derive(Default)]
pub struct CapabilityRegistry {
    slot: RwLock<Option<Weak<dyn PlatformGestureDispatcher>>>,
}

impl CapabilityRegistry {
    /// Creates an empty registry (no capability connected).
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a newly-connected capability handle.
    ///
    /// Replaces whatever was there before: at most one handle is ever live,
    /// and a fresh connect event supersedes a stale entry unconditionally.
    pub fn connect(&self, handle: &CapabilityHandle) {
        *self.slot.write().unwrap() = Some(Arc::downgrade(handle));
    }

    /// Clears the registry when the capability disconnects or is destroyed.
    pub fn disconnect(&self) {
        *self.slot.write().unwrap() = None;
    }

    /// Returns a point-in-time snapshot of the connected capability.
    ///
    /// `None` before the first connect, after a disconnect, or once the OS
    /// side has dropped the handle.
    pub fn current(&self) -> Option<CapabilityHandle> {
        self.slot.read().unwrap().as_ref().and_then(Weak::upgrade)
    }

    /// Whether a live handle is currently connected.  Diagnostic use only;
    /// command handling must take a [`CapabilityRegistry::current`] snapshot
    /// instead of checking first and reading later.
    pub fn is_connected(&self) -> bool {
        self.current().is_some()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
