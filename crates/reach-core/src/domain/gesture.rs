//! Synthetic gesture construction and dispatch outcomes.
//!
//! A gesture is the unit of work handed to the OS input subsystem: one or
//! more timed strokes through screen space.  The only gesture this system
//! currently produces is a tap (a single zero-length stroke held for a
//! fixed duration), but the request type is a stroke sequence so richer
//! gestures such as swipes can reuse the same dispatch path later.

use uuid::Uuid;

use crate::domain::geometry::TapPoint;

// ── Gesture constants ─────────────────────────────────────────────────────────

/// How long a tap stroke is held, in milliseconds.
pub const TAP_DURATION_MS: u64 = 100;

/// A single timed stroke within a gesture.
///
/// The stroke moves from `from` to `to`, starting `start_ms` after the
/// gesture begins and lasting `duration_ms`.  A tap is the degenerate case
/// where `from == to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureStroke {
    /// Where the stroke begins.
    pub from: TapPoint,
    /// Where the stroke ends.
    pub to: TapPoint,
    /// Offset from gesture start, in milliseconds.
    pub start_ms: u64,
    /// How long the stroke lasts, in milliseconds.
    pub duration_ms: u64,
}

impl GestureStroke {
    /// Returns `true` if this stroke covers no distance.
    pub fn is_stationary(&self) -> bool {
        self.from == self.to
    }
}

/// An ordered sequence of strokes submitted to the OS gesture dispatcher.
///
/// Carries a generated id so the dispatch log line and the asynchronous
/// outcome log line can be correlated.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureRequest {
    /// Correlation id for diagnostics.
    pub id: Uuid,
    /// The strokes, in playback order.
    pub strokes: Vec<GestureStroke>,
}

impl GestureRequest {
    /// Builds a tap gesture: a single stationary stroke at `point`, starting
    /// at offset 0 and held for [`TAP_DURATION_MS`].
    pub fn tap(point: TapPoint) -> Self {
        Self {
            id: Uuid::new_v4(),
            strokes: vec![GestureStroke {
                from: point,
                to: point,
                start_ms: 0,
                duration_ms: TAP_DURATION_MS,
            }],
        }
    }
}

/// How the OS input subsystem resolved a dispatched gesture.
///
/// Reported asynchronously, after the dispatch call has already returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The gesture was injected to completion.
    Completed,
    /// The OS declined or interrupted the gesture.  Not retried here; retry
    /// is a caller concern.
    Cancelled,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
