//! Display bounds adapters.
//!
//! Touch clamping needs the output display's current pixel dimensions, queried
//! fresh for every command.  On a real device this comes from the windowing or
//! display service of the host platform; the production probe is therefore
//! supplied by whatever embeds this agent, not by this crate.
//!
//! # Why query per command?
//!
//! A phone rotates, a desktop changes resolution, a headless target swaps
//! virtual displays.  Caching bounds at connect time would clamp against stale
//! dimensions and could push taps onto pixels that no longer exist.  The
//! clamping use case calls [`PlatformDisplayProbe::bounds`] at dispatch time
//! precisely so none of that matters.
//!
//! A [`MockDisplayProbe`] is always compiled (not guarded by `#[cfg]`) so
//! tests on any platform can run without a physical display.

use std::sync::Mutex;

use reach_core::ScreenBounds;

use crate::application::inject_touch::{DisplayError, PlatformDisplayProbe};

/// A mock display probe that reports configurable bounds.
///
/// Used in unit tests and on platforms without a display service.  Makes no
/// OS calls; the bounds are provided at construction time and can be replaced
/// mid-test with [`MockDisplayProbe::set_bounds`] to simulate a rotation.
///
/// # Example
///
/// ```ignore
/// let probe = MockDisplayProbe::phone_portrait();
/// assert_eq!(probe.bounds().unwrap(), ScreenBounds::new(1080, 2400));
///
/// probe.set_bounds(ScreenBounds::new(2400, 1080)); // rotate to landscape
/// assert_eq!(probe.bounds().unwrap().width, 2400);
/// ```
pub struct MockDisplayProbe {
    current: Mutex<ScreenBounds>,
    /// When `true`, every `bounds` call fails with
    /// [`DisplayError::PlatformError`].
    pub should_fail: bool,
}

impl MockDisplayProbe {
    /// Creates a probe reporting the given fixed bounds.
    pub fn with_bounds(bounds: ScreenBounds) -> Self {
        Self {
            current: Mutex::new(bounds),
            should_fail: false,
        }
    }

    /// A probe reporting a 1080x2400 portrait phone display.
    ///
    /// The most common test fixture; it mirrors the device class that remote
    /// touch commands are typically aimed at.
    pub fn phone_portrait() -> Self {
        Self::with_bounds(ScreenBounds::new(1080, 2400))
    }

    /// A probe reporting a 1920x1080 desktop display.
    pub fn desktop_1080p() -> Self {
        Self::with_bounds(ScreenBounds::new(1920, 1080))
    }

    /// A probe whose every query fails, for exercising the
    /// probe-failure drop path in callers.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::phone_portrait()
        }
    }

    /// Replaces the reported bounds.
    ///
    /// Subsequent `bounds` calls observe the new dimensions, which lets a test
    /// rotate or resize the "display" between two commands.
    pub fn set_bounds(&self, bounds: ScreenBounds) {
        *self.current.lock().unwrap() = bounds;
    }
}

impl PlatformDisplayProbe for MockDisplayProbe {
    /// Returns the currently configured bounds, or fails if `should_fail` is
    /// set.
    fn bounds(&self) -> Result<ScreenBounds, DisplayError> {
        if self.should_fail {
            return Err(DisplayError::PlatformError("mock display failure".into()));
        }
        Ok(*self.current.lock().unwrap())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_portrait_fixture_reports_1080_by_2400() {
        // Arrange
        let probe = MockDisplayProbe::phone_portrait();

        // Act
        let bounds = probe.bounds().expect("bounds");

        // Assert
        assert_eq!(bounds, ScreenBounds::new(1080, 2400));
    }

    #[test]
    fn test_desktop_1080p_fixture_reports_1920_by_1080() {
        // Arrange
        let probe = MockDisplayProbe::desktop_1080p();

        // Act
        let bounds = probe.bounds().expect("bounds");

        // Assert
        assert_eq!(bounds, ScreenBounds::new(1920, 1080));
    }

    #[test]
    fn test_set_bounds_is_visible_to_later_queries() {
        // Arrange
        let probe = MockDisplayProbe::phone_portrait();

        // Act: rotate to landscape.
        probe.set_bounds(ScreenBounds::new(2400, 1080));

        // Assert
        let bounds = probe.bounds().expect("bounds");
        assert_eq!(bounds.width, 2400);
        assert_eq!(bounds.height, 1080);
    }

    #[test]
    fn test_failing_probe_returns_platform_error() {
        // Arrange
        let probe = MockDisplayProbe::failing();

        // Act
        let result = probe.bounds();

        // Assert
        assert!(matches!(result, Err(DisplayError::PlatformError(_))));
    }
}
