//! Foreground indicator adapters.
//!
//! Screen capture must never run invisibly: before any frame is produced, a
//! persistent, user-visible indicator (a notification on mobile platforms, a
//! tray entry on desktops) has to be on screen.  The production indicator is
//! supplied by the host embedding this agent, since only the host can talk to
//! the platform's notification service.
//!
//! A [`MockIndicator`] is always compiled so lifecycle tests can observe
//! exactly when the indicator was requested and cleared, and can script the
//! platform refusing to show it.

use std::sync::Mutex;

use reach_core::IndicatorSpec;

use crate::application::capture_service::{ForegroundIndicator, IndicatorError};

/// A mock indicator that records establish and clear calls.
///
/// # Example
///
/// ```ignore
/// let indicator = Arc::new(MockIndicator::new());
/// let mut service = CaptureService::new(Arc::clone(&indicator) as _);
///
/// service.start();
/// assert_eq!(indicator.establish_count(), 1);
///
/// service.stop();
/// assert_eq!(indicator.clear_count(), 1);
/// ```
pub struct MockIndicator {
    /// Every spec passed to `establish`, in call order.
    pub established: Mutex<Vec<IndicatorSpec>>,
    /// Number of `clear` calls observed.
    pub clears: Mutex<usize>,
    should_fail: Mutex<bool>,
}

impl MockIndicator {
    /// An indicator whose `establish` calls all succeed.
    pub fn new() -> Self {
        Self {
            established: Mutex::new(Vec::new()),
            clears: Mutex::new(0),
            should_fail: Mutex::new(false),
        }
    }

    /// An indicator whose `establish` calls are all refused, for exercising
    /// the abort-on-indicator-failure path.
    pub fn failing() -> Self {
        let indicator = Self::new();
        *indicator.should_fail.lock().unwrap() = true;
        indicator
    }

    /// Flips the refusal flag.
    ///
    /// Interior-mutable (unlike the plain `should_fail` fields on the other
    /// mocks) because the indicator is shared behind an `Arc` by the time a
    /// recovery test wants to turn failures back off.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock().unwrap() = fail;
    }

    /// Number of `establish` calls observed.
    pub fn establish_count(&self) -> usize {
        self.established.lock().unwrap().len()
    }

    /// Number of `clear` calls observed.
    pub fn clear_count(&self) -> usize {
        *self.clears.lock().unwrap()
    }
}

impl Default for MockIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl ForegroundIndicator for MockIndicator {
    /// Records the spec and succeeds, or refuses if scripted to fail.
    fn establish(&self, spec: &IndicatorSpec) -> Result<(), IndicatorError> {
        if *self.should_fail.lock().unwrap() {
            return Err(IndicatorError::Refused("mock refusal".into()));
        }
        self.established.lock().unwrap().push(spec.clone());
        Ok(())
    }

    /// Counts the call.  Clearing an indicator that is not showing is a no-op
    /// on real platforms, so the mock records it without complaint.
    fn clear(&self) {
        *self.clears.lock().unwrap() += 1;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
