//! Capture-session lifecycle state machine.
//!
//! The host OS only tolerates a long-running capture capability that stays
//! user-visible: the session must register a persistent indicator *before*
//! it counts as running, or the OS may kill it.  The lifecycle here is a
//! pure state machine (discrete events in, effects out) so the whole
//! start/stop/restart behaviour can be tested by feeding it synthetic event
//! sequences, with no host runtime involved.
//!
//! The service layer that owns this machine is responsible for executing
//! the returned effects (registering the indicator, tearing it down,
//! handing off to the capture pipeline) and feeding the results back in as
//! further events.

// ── Indicator identity ────────────────────────────────────────────────────────

/// Notification channel the indicator is registered under.
pub const INDICATOR_CHANNEL_ID: &str = "screen_capture_channel";

/// Fixed id of the ongoing notification.
pub const INDICATOR_NOTIFICATION_ID: u32 = 1;

/// The persistent visible indicator required while the session is active.
///
/// Identity (channel id + notification id) is fixed and contractual: the OS
/// keys the ongoing notification on it.  Only one indicator ever exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorSpec {
    /// Notification channel id.
    pub channel_id: String,
    /// Stable notification id.
    pub notification_id: u32,
    /// User-visible title.
    pub title: String,
    /// User-visible body text.
    pub body: String,
}

impl Default for IndicatorSpec {
    fn default() -> Self {
        Self {
            channel_id: INDICATOR_CHANNEL_ID.to_string(),
            notification_id: INDICATOR_NOTIFICATION_ID,
            title: "Screen Capture Service".to_string(),
            body: "Capturing screen...".to_string(),
        }
    }
}

// ── States, events, effects ───────────────────────────────────────────────────

/// Where the capture session currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// No session active, no indicator shown.
    Stopped,
    /// Start accepted; waiting for the visible indicator to be established.
    Starting,
    /// Indicator up, session active.
    Running,
}

impl Default for CaptureState {
    fn default() -> Self {
        CaptureState::Stopped
    }
}

/// Discrete external events that drive the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A start command arrived on the command surface.
    StartRequested,
    /// The visible indicator was successfully established.
    IndicatorReady,
    /// Establishing the visible indicator failed.
    IndicatorFailed,
    /// An external collaborator asked the session to stop.
    StopRequested,
    /// The host killed and restarted the service process (sticky restart).
    HostRestart,
}

/// Work the owning service must perform in response to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    /// Register the persistent visible indicator, then report back with
    /// [`SessionEvent::IndicatorReady`] or [`SessionEvent::IndicatorFailed`].
    ShowIndicator,
    /// Hand off to the capture/encode pipeline.
    BeginCapture,
    /// Tear the indicator down.
    ClearIndicator,
}

// ── State machine ─────────────────────────────────────────────────────────────

/// The capture-session lifecycle.
///
/// `Stopped → Starting → Running`, with `Running → Stopped` externally
/// triggered.  Restart policy is sticky: a [`SessionEvent::HostRestart`]
/// while active puts the machine back into `Starting` with a fresh
/// indicator request.  Events that make no sense in the current state are
/// idempotent no-ops: repeated start commands, stray indicator results and
/// stop requests while already stopped all produce no effects.
#[derive(Debug, Default)]
pub struct CaptureSession {
    state: CaptureState,
}

impl CaptureSession {
    /// Creates a session in the `Stopped` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Applies one event and returns the effects the owner must execute.
    ///
    /// Effects are returned in execution order.
    pub fn apply(&mut self, event: SessionEvent) -> Vec<SessionEffect> {
        use CaptureState::*;
        use SessionEffect::*;
        use SessionEvent::*;

        match (self.state, event) {
            (Stopped, StartRequested) => {
                self.state = Starting;
                vec![ShowIndicator]
            }
            // The indicator must be up before the session counts as running.
            (Starting, IndicatorReady) => {
                self.state = Running;
                vec![BeginCapture]
            }
            // Indicator registration failed: abort to Stopped, no retry.
            (Starting, IndicatorFailed) => {
                self.state = Stopped;
                vec![ClearIndicator]
            }
            (Starting | Running, StopRequested) => {
                self.state = Stopped;
                vec![ClearIndicator]
            }
            // Sticky restart: the host brought the process back up; resume
            // from Starting so the indicator is re-established first.
            (Starting | Running, HostRestart) => {
                self.state = Starting;
                vec![ShowIndicator]
            }
            // Everything else is a redundant event in this state.
            _ => Vec::new(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_from_stopped_requests_indicator_before_anything_else() {
        // Arrange
        let mut session = CaptureSession::new();

        // Act
        let effects = session.apply(SessionEvent::StartRequested);

        // Assert – not running yet; first the indicator must come up
        assert_eq!(session.state(), CaptureState::Starting);
        assert_eq!(effects, vec![SessionEffect::ShowIndicator]);
    }

    #[test]
    fn test_indicator_ready_promotes_starting_to_running() {
        // Arrange
        let mut session = CaptureSession::new();
        session.apply(SessionEvent::StartRequested);

        // Act
        let effects = session.apply(SessionEvent::IndicatorReady);

        // Assert
        assert_eq!(session.state(), CaptureState::Running);
        assert_eq!(effects, vec![SessionEffect::BeginCapture]);
    }

    #[test]
    fn test_capture_never_begins_before_indicator_is_ready() {
        // Arrange
        let mut session = CaptureSession::new();

        // Act
        let effects = session.apply(SessionEvent::StartRequested);

        // Assert – ShowIndicator requested, BeginCapture withheld
        assert!(!effects.contains(&SessionEffect::BeginCapture));
        assert_ne!(session.state(), CaptureState::Running);
    }

    #[test]
    fn test_indicator_failure_aborts_to_stopped_without_capture() {
        // Arrange
        let mut session = CaptureSession::new();
        session.apply(SessionEvent::StartRequested);

        // Act
        let effects = session.apply(SessionEvent::IndicatorFailed);

        // Assert – clean abort, half-registered indicator torn down
        assert_eq!(session.state(), CaptureState::Stopped);
        assert_eq!(effects, vec![SessionEffect::ClearIndicator]);
    }

    #[test]
    fn test_stop_while_running_clears_indicator() {
        // Arrange
        let mut session = CaptureSession::new();
        session.apply(SessionEvent::StartRequested);
        session.apply(SessionEvent::IndicatorReady);

        // Act
        let effects = session.apply(SessionEvent::StopRequested);

        // Assert
        assert_eq!(session.state(), CaptureState::Stopped);
        assert_eq!(effects, vec![SessionEffect::ClearIndicator]);
    }

    #[test]
    fn test_host_restart_while_running_resumes_at_starting() {
        // Arrange
        let mut session = CaptureSession::new();
        session.apply(SessionEvent::StartRequested);
        session.apply(SessionEvent::IndicatorReady);

        // Act
        let effects = session.apply(SessionEvent::HostRestart);

        // Assert – sticky policy: back to Starting, indicator re-requested
        assert_eq!(session.state(), CaptureState::Starting);
        assert_eq!(effects, vec![SessionEffect::ShowIndicator]);
    }

    #[test]
    fn test_host_restart_while_stopped_is_ignored() {
        let mut session = CaptureSession::new();

        let effects = session.apply(SessionEvent::HostRestart);

        assert_eq!(session.state(), CaptureState::Stopped);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_redundant_start_commands_are_no_ops() {
        // Arrange
        let mut session = CaptureSession::new();
        session.apply(SessionEvent::StartRequested);

        // Act – second start while Starting, third while Running
        let while_starting = session.apply(SessionEvent::StartRequested);
        session.apply(SessionEvent::IndicatorReady);
        let while_running = session.apply(SessionEvent::StartRequested);

        // Assert
        assert!(while_starting.is_empty());
        assert!(while_running.is_empty());
        assert_eq!(session.state(), CaptureState::Running);
    }

    #[test]
    fn test_stray_indicator_results_outside_starting_are_no_ops() {
        let mut session = CaptureSession::new();

        assert!(session.apply(SessionEvent::IndicatorReady).is_empty());
        assert!(session.apply(SessionEvent::IndicatorFailed).is_empty());
        assert_eq!(session.state(), CaptureState::Stopped);
    }

    #[test]
    fn test_stop_while_stopped_is_a_no_op() {
        let mut session = CaptureSession::new();

        let effects = session.apply(SessionEvent::StopRequested);

        assert!(effects.is_empty());
        assert_eq!(session.state(), CaptureState::Stopped);
    }

    #[test]
    fn test_session_can_be_restarted_after_stop() {
        // Arrange – full run, then stop
        let mut session = CaptureSession::new();
        session.apply(SessionEvent::StartRequested);
        session.apply(SessionEvent::IndicatorReady);
        session.apply(SessionEvent::StopRequested);

        // Act
        let effects = session.apply(SessionEvent::StartRequested);

        // Assert – lifecycle starts over cleanly
        assert_eq!(session.state(), CaptureState::Starting);
        assert_eq!(effects, vec![SessionEffect::ShowIndicator]);
    }

    #[test]
    fn test_default_indicator_identity_is_fixed() {
        let spec = IndicatorSpec::default();

        assert_eq!(spec.channel_id, INDICATOR_CHANNEL_ID);
        assert_eq!(spec.notification_id, INDICATOR_NOTIFICATION_ID);
        assert_eq!(spec.title, "Screen Capture Service");
        assert_eq!(spec.body, "Capturing screen...");
    }
}
