//! CaptureService: runs the capture-session lifecycle against the host OS.
//!
//! The pure state machine in `reach_core` decides *what* must happen; this
//! service makes it happen.  Effects are executed synchronously while the
//! triggering event is being handled and their results are fed straight
//! back into the machine, so by the time a start command returns, the
//! session is either `Running` with the indicator up, or `Stopped` because
//! the indicator could not be established.  There is no window in which
//! capture runs without its mandatory visible indicator.
//!
//! The actual capture/encode pipeline is an external collaborator: this
//! service owns only the lifecycle and visibility contract.

use std::sync::Arc;

use reach_core::{
    CaptureSession, CaptureState, IndicatorSpec, SessionEffect, SessionEvent,
};
use thiserror::Error;
use tracing::{debug, error, info};

/// Error type for foreground indicator registration.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// The OS refused to register the indicator (e.g., notification
    /// permission revoked).
    #[error("indicator registration refused: {0}")]
    Refused(String),
}

/// Foreground-visibility registration primitive.
///
/// The host OS requires any long-running capture capability to display an
/// ongoing, user-visible indicator.  Implementations register one under the
/// fixed identity carried by [`IndicatorSpec`].
pub trait ForegroundIndicator: Send + Sync {
    /// Registers (or re-registers) the persistent visible indicator.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError`] if the OS refuses the registration.
    fn establish(&self, spec: &IndicatorSpec) -> Result<(), IndicatorError>;

    /// Removes the indicator.  Must be idempotent; clearing an indicator
    /// that was never shown is a no-op.
    fn clear(&self);
}

/// The Capture Session use case.
///
/// Owns the lifecycle state machine and the injected indicator adapter.
/// All methods are synchronous: every transition settles (including the
/// indicator registration it implies) before the method returns.
pub struct CaptureService {
    session: CaptureSession,
    indicator: Arc<dyn ForegroundIndicator>,
    spec: IndicatorSpec,
}

impl CaptureService {
    /// Creates a stopped service using the fixed default indicator identity.
    pub fn new(indicator: Arc<dyn ForegroundIndicator>) -> Self {
        Self {
            session: CaptureSession::new(),
            indicator,
            spec: IndicatorSpec::default(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CaptureState {
        self.session.state()
    }

    /// Handles a start command from the command surface.
    ///
    /// On return the session is `Running` (indicator up) or `Stopped`
    /// (indicator registration failed; logged at error level).  Redundant
    /// starts are no-ops.
    pub fn start(&mut self) {
        self.drive(SessionEvent::StartRequested);
    }

    /// Handles an externally-triggered stop.
    pub fn stop(&mut self) {
        self.drive(SessionEvent::StopRequested);
    }

    /// Handles the host killing and restarting the service process.
    ///
    /// Sticky policy: the session resumes at `Starting` and re-establishes
    /// its indicator before running again.
    pub fn host_restart(&mut self) {
        self.drive(SessionEvent::HostRestart);
    }

    fn drive(&mut self, event: SessionEvent) {
        for effect in self.session.apply(event) {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: SessionEffect) {
        match effect {
            SessionEffect::ShowIndicator => match self.indicator.establish(&self.spec) {
                Ok(()) => {
                    debug!(
                        "indicator established (channel {}, notification {})",
                        self.spec.channel_id, self.spec.notification_id
                    );
                    self.drive(SessionEvent::IndicatorReady);
                }
                Err(e) => {
                    error!("capture session aborted: {e}");
                    self.drive(SessionEvent::IndicatorFailed);
                }
            },
            SessionEffect::BeginCapture => {
                // Hand-off point for the capture/encode pipeline, which
                // lives with the host embedding.  Reaching Running with the
                // indicator up is the whole contract here.
                info!("capture session running");
            }
            SessionEffect::ClearIndicator => {
                self.indicator.clear();
                info!("capture session stopped");
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
