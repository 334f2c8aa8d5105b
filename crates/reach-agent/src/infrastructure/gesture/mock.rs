//! Mock gesture dispatcher for unit and integration testing.
//!
//! # Why a mock dispatcher?
//!
//! The real dispatcher wraps an OS-granted accessibility capability that:
//!
//! - Only exists after the user explicitly enables it on a real device.
//! - Actually injects touches into whatever is on screen.
//! - Reports completion through OS callbacks that test code cannot trigger.
//!
//! The `MockGestureDispatcher` records every accepted gesture in a
//! `Mutex<Vec<...>>` and resolves the outcome channel according to a script
//! chosen at construction time, so tests can exercise every completion path
//! deterministically.
//!
//! # Usage in tests
//!
//! ```ignore
//! let dispatcher = Arc::new(MockGestureDispatcher::completing());
//! let handle: Arc<dyn PlatformGestureDispatcher> = Arc::clone(&dispatcher);
//! registry.connect(&handle);
//!
//! use_case.handle_touch(TouchCommand::new(100.0, 200.0));
//!
//! assert_eq!(dispatcher.tap_points(), vec![(100.0, 200.0)]);
//! ```
//!
//! # `should_fail` flag
//!
//! Construct with [`MockGestureDispatcher::rejecting`] (or set `should_fail`
//! before sharing) to make every `dispatch` call refuse the gesture, which
//! exercises the rejected-dispatch drop path in callers.

use std::sync::Mutex;

use reach_core::{GestureOutcome, GestureRequest};
use tokio::sync::oneshot;

use crate::application::inject_touch::{DispatchError, PlatformGestureDispatcher};

/// How the mock resolves the outcome channel of each accepted gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedOutcome {
    /// Resolve every gesture as [`GestureOutcome::Completed`] immediately.
    Complete,
    /// Resolve every gesture as [`GestureOutcome::Cancelled`] immediately.
    Cancel,
    /// Accept the gesture but keep the outcome pending until
    /// [`MockGestureDispatcher::resolve_held`] is called.
    Hold,
}

/// A mock dispatcher that records all accepted gestures.
pub struct MockGestureDispatcher {
    /// Every accepted gesture request, in dispatch order.
    pub requests: Mutex<Vec<GestureRequest>>,
    /// When `true`, every `dispatch` call returns [`DispatchError::Rejected`].
    pub should_fail: bool,
    outcome: ScriptedOutcome,
    held: Mutex<Vec<oneshot::Sender<GestureOutcome>>>,
}

impl MockGestureDispatcher {
    fn with_outcome(outcome: ScriptedOutcome) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            should_fail: false,
            outcome,
            held: Mutex::new(Vec::new()),
        }
    }

    /// A dispatcher whose gestures all complete immediately.
    pub fn completing() -> Self {
        Self::with_outcome(ScriptedOutcome::Complete)
    }

    /// A dispatcher whose gestures are all cancelled by the "OS".
    pub fn cancelling() -> Self {
        Self::with_outcome(ScriptedOutcome::Cancel)
    }

    /// A dispatcher that accepts gestures but leaves their outcomes pending
    /// until [`MockGestureDispatcher::resolve_held`].
    pub fn holding() -> Self {
        Self::with_outcome(ScriptedOutcome::Hold)
    }

    /// A dispatcher that refuses every gesture at submission time.
    pub fn rejecting() -> Self {
        Self {
            should_fail: true,
            ..Self::with_outcome(ScriptedOutcome::Complete)
        }
    }

    /// Number of gestures accepted so far.
    pub fn dispatch_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The tap points of accepted gestures, in dispatch order.
    pub fn tap_points(&self) -> Vec<(f32, f32)> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| (r.strokes[0].from.x, r.strokes[0].from.y))
            .collect()
    }

    /// Resolves every held outcome with `outcome`.
    ///
    /// Only meaningful for a dispatcher built with
    /// [`MockGestureDispatcher::holding`].
    pub fn resolve_held(&self, outcome: GestureOutcome) {
        for tx in self.held.lock().unwrap().drain(..) {
            let _ = tx.send(outcome);
        }
    }
}

impl PlatformGestureDispatcher for MockGestureDispatcher {
    /// Records the gesture and resolves its outcome per the script, or
    /// refuses it if `should_fail` is set.
    fn dispatch(
        &self,
        request: GestureRequest,
    ) -> Result<oneshot::Receiver<GestureOutcome>, DispatchError> {
        if self.should_fail {
            return Err(DispatchError::Rejected("mock failure".into()));
        }
        self.requests.lock().unwrap().push(request);

        let (tx, rx) = oneshot::channel();
        match self.outcome {
            ScriptedOutcome::Complete => {
                let _ = tx.send(GestureOutcome::Completed);
            }
            ScriptedOutcome::Cancel => {
                let _ = tx.send(GestureOutcome::Cancelled);
            }
            ScriptedOutcome::Hold => self.held.lock().unwrap().push(tx),
        }
        Ok(rx)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
