//! Screen geometry: live display bounds and touch-coordinate clamping.
//!
//! Remote touch commands arrive in screen-pixel space but carry no guarantee
//! of being in range: the controller may have stale dimensions, the device
//! may have rotated, or the input may simply be garbage.  Policy: coordinates
//! are *corrected* onto the screen, never rejected.  A malformed remote touch
//! must degrade to a harmless in-bounds tap, not an error.

/// Pixel dimensions of the output display.
///
/// Always queried from the OS at dispatch time, never cached: orientation or
/// resolution may change between any two commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenBounds {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ScreenBounds {
    /// Creates bounds for a `width` x `height` display.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Largest addressable X coordinate (`width - 1`, or 0 for a degenerate
    /// zero-width display).
    pub fn max_x(&self) -> f64 {
        f64::from(self.width.saturating_sub(1))
    }

    /// Largest addressable Y coordinate (`height - 1`, or 0 for a degenerate
    /// zero-height display).
    pub fn max_y(&self) -> f64 {
        f64::from(self.height.saturating_sub(1))
    }
}

/// A touch command as supplied by the caller, in screen-pixel space.
///
/// No inherent bounds.  Must be clamped against the live [`ScreenBounds`]
/// before it may be dispatched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchCommand {
    pub x: f64,
    pub y: f64,
}

impl TouchCommand {
    /// Creates a touch command at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamps this command into `[0, width-1] x [0, height-1]` against the
    /// given bounds, narrowing to the precision the OS gesture primitive
    /// consumes.
    ///
    /// In-bounds coordinates pass through unchanged.  Out-of-range values are
    /// silently corrected to the nearest edge.  Non-finite coordinates (NaN,
    /// infinities) are treated like missing arguments and become `0.0` before
    /// clamping.
    pub fn clamp_to(&self, bounds: ScreenBounds) -> TapPoint {
        TapPoint {
            x: clamp_axis(self.x, bounds.max_x()),
            y: clamp_axis(self.y, bounds.max_y()),
        }
    }
}

/// A validated, in-bounds tap position ready for gesture construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapPoint {
    pub x: f32,
    pub y: f32,
}

/// Clamps one axis value into `[0, max]`.
fn clamp_axis(value: f64, max: f64) -> f32 {
    let value = if value.is_finite() { value } else { 0.0 };
    value.clamp(0.0, max) as f32
}

// ── Tests ─────────────────────────────────────────────────────────────────────
