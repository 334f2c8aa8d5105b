//! InjectTouchUseCase: turns remote touch commands into injected tap gestures.
//!
//! This use case sits at the application layer and owns the whole per-touch
//! pipeline: query the live display bounds, clamp the coordinates, build the
//! tap, take a capability snapshot, dispatch, and watch the asynchronous
//! outcome.  The OS-facing pieces are behind the
//! [`PlatformGestureDispatcher`] and [`PlatformDisplayProbe`] traits so the
//! pipeline runs unchanged against mocks.
//!
//! Two properties shape everything here:
//!
//! - **The caller is never blocked.**  [`InjectTouchUseCase::handle_touch`]
//!   returns as soon as the gesture is handed to the OS (or dropped); the
//!   `Completed`/`Cancelled` outcome arrives later on a spawned watcher
//!   task and is logged, not returned.
//! - **Degradation, not failure.**  Missing capability, unreadable display
//!   and rejected dispatch all turn into a dropped command plus a
//!   diagnostic event.  Nothing on this path returns an error to the
//!   command surface.

use std::sync::Arc;

use reach_core::{GestureOutcome, GestureRequest, ScreenBounds, TapPoint, TouchCommand};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::registry::CapabilityRegistry;

/// Capacity of the injection event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Error type for gesture dispatch operations.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The OS refused to accept the gesture for injection.
    #[error("gesture rejected by platform: {0}")]
    Rejected(String),

    /// The capability went away between the registry snapshot and the
    /// dispatch call reaching the OS.
    #[error("capability disconnected during dispatch")]
    Disconnected,
}

/// Error type for display-bounds queries.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The platform API call to read the display dimensions failed.
    ///
    /// The inner string contains a human-readable description of the OS
    /// error.
    #[error("platform API error while querying display bounds: {0}")]
    PlatformError(String),
}

/// Platform-agnostic gesture dispatch capability.
///
/// Implemented by the OS-granted touch-injection subsystem (and by mocks).
/// Handles to implementations are tracked by the
/// [`CapabilityRegistry`](crate::application::registry::CapabilityRegistry);
/// they exist only while the user has the capability enabled.
pub trait PlatformGestureDispatcher: Send + Sync {
    /// Submits a gesture for injection.
    ///
    /// Must return promptly.  On success the returned receiver resolves to
    /// the gesture's [`GestureOutcome`] once the OS has played it out (or
    /// given up on it); the dispatch call itself never waits for that.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] if the OS refuses to accept the gesture at
    /// submission time.
    fn dispatch(
        &self,
        request: GestureRequest,
    ) -> Result<oneshot::Receiver<GestureOutcome>, DispatchError>;
}

/// Live display-bounds query.
///
/// Queried once per touch command, at dispatch time.  Results are never
/// cached: orientation or resolution may change between commands.
pub trait PlatformDisplayProbe: Send + Sync {
    /// Returns the current pixel dimensions of the output display.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::PlatformError`] if the OS API call fails.
    fn bounds(&self) -> Result<ScreenBounds, DisplayError>;
}

/// Why a touch command never reached the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// No capability handle was connected at command time.
    NoCapability,
    /// The display bounds could not be read, so there was nothing to clamp
    /// against.
    NoDisplay,
    /// The capability refused the dispatch call.
    DispatchRejected,
}

/// Observable record of what became of a touch command.
///
/// Emitted on the use case's event channel for diagnostics and tests.  The
/// caller-facing reply is always an ack; these events are the only place
/// the real fate of a command shows up.  Delivery on the drop path is
/// best-effort: the log line is authoritative, the event is a convenience.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InjectionEvent {
    /// The command was dropped before dispatch.
    Dropped { reason: DropReason },
    /// The OS played the gesture to completion.
    Completed { point: TapPoint },
    /// The OS declined or interrupted the gesture.  Not retried.
    Cancelled { point: TapPoint },
}

/// The Inject Touch use case.
///
/// Receives decoded touch commands and drives them through clamping,
/// capability lookup, and asynchronous dispatch.
pub struct InjectTouchUseCase {
    registry: Arc<CapabilityRegistry>,
    display: Arc<dyn PlatformDisplayProbe>,
    events: mpsc::Sender<InjectionEvent>,
}

impl InjectTouchUseCase {
    /// Creates the use case and returns it together with the receiving end
    /// of its injection event stream.
    pub fn new(
        registry: Arc<CapabilityRegistry>,
        display: Arc<dyn PlatformDisplayProbe>,
    ) -> (Self, mpsc::Receiver<InjectionEvent>) {
        let (events, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        (
            Self {
                registry,
                display,
                events,
            },
            rx,
        )
    }

    /// Handles one touch command end to end.
    ///
    /// Returns as soon as the gesture has been handed to the OS or the
    /// command has been dropped; the eventual outcome is logged and emitted
    /// by a spawned watcher.  Never returns an error: capability absence,
    /// display trouble, and dispatch rejection all degrade to a dropped
    /// command with a diagnostic trail.
    ///
    /// Must be called from within a Tokio runtime (the outcome watcher is
    /// spawned onto it).
    pub fn handle_touch(&self, command: TouchCommand) {
        let bounds = match self.display.bounds() {
            Ok(bounds) => bounds,
            Err(e) => {
                debug!("touch dropped: {e}");
                self.emit(InjectionEvent::Dropped {
                    reason: DropReason::NoDisplay,
                });
                return;
            }
        };

        let point = command.clamp_to(bounds);
        let request = GestureRequest::tap(point);
        let gesture_id = request.id;

        // One atomic snapshot per command: a disconnect that lands after
        // this line affects the next command, not this one.
        let Some(dispatcher) = self.registry.current() else {
            debug!("touch dropped: no capability connected");
            self.emit(InjectionEvent::Dropped {
                reason: DropReason::NoCapability,
            });
            return;
        };

        match dispatcher.dispatch(request) {
            Ok(outcome) => {
                debug!(
                    "tap {gesture_id} dispatched at ({:.1}, {:.1})",
                    point.x, point.y
                );
                tokio::spawn(watch_outcome(
                    gesture_id,
                    point,
                    outcome,
                    self.events.clone(),
                ));
            }
            Err(e) => {
                warn!("tap {gesture_id} not dispatched: {e}");
                self.emit(InjectionEvent::Dropped {
                    reason: DropReason::DispatchRejected,
                });
            }
        }
    }

    /// Emits a drop event without ever stalling the command path: if the
    /// observer is gone or backlogged, the event is discarded (the log line
    /// has already been written).
    fn emit(&self, event: InjectionEvent) {
        if self.events.try_send(event).is_err() {
            debug!("injection event discarded: observer missing or backlogged");
        }
    }
}

/// Awaits one dispatched gesture's outcome and records it.
///
/// Runs as its own task so the command path never waits on the OS.  A
/// dispatcher that drops its sender without reporting counts as cancelled:
/// an input subsystem that vanished mid-gesture cannot have completed it.
async fn watch_outcome(
    gesture_id: Uuid,
    point: TapPoint,
    outcome: oneshot::Receiver<GestureOutcome>,
    events: mpsc::Sender<InjectionEvent>,
) {
    match outcome.await {
        Ok(GestureOutcome::Completed) => {
            info!(
                "tap {gesture_id} completed at ({:.1}, {:.1})",
                point.x, point.y
            );
            let _ = events.send(InjectionEvent::Completed { point }).await;
        }
        Ok(GestureOutcome::Cancelled) | Err(_) => {
            warn!(
                "tap {gesture_id} cancelled by OS at ({:.1}, {:.1})",
                point.x, point.y
            );
            let _ = events.send(InjectionEvent::Cancelled { point }).await;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
