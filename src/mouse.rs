//=========================================================================
// Mouse Mode
//
// Three orthogonal pointer behaviors: exclusive capture, relative motion,
// and cursor visibility. The platform backends own the impure half
// (grab/release, warp, cursor image); this module owns the pure half:
// the last-known position and the delta computation used for relative
// motion, including the one-shot suppression of the sample taken right
// after a mode change (the first sample after a re-center has no
// meaningful previous position).
//
//=========================================================================

//=== MouseMode ===========================================================

/// Requested pointer behavior, applied atomically by
/// [`Context::set_mouse_mode`](crate::Context::set_mouse_mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseMode {
    /// Exclusive capture: all pointer input routes to the window
    /// regardless of screen position, and the cursor is warped to the
    /// window center on entry.
    pub captured: bool,

    /// Report motion as deltas against the previous poll instead of
    /// absolute window coordinates, re-centering the cursor each poll so
    /// virtual movement is unbounded.
    pub relative: bool,

    /// System cursor visibility over the window.
    pub visible: bool,
}

impl MouseMode {
    pub fn new(captured: bool, relative: bool, visible: bool) -> Self {
        Self { captured, relative, visible }
    }
}

//=== MouseTracker ========================================================

/// Last-known cursor position plus the "delta invalid" latch.
///
/// `sample` is fed the cursor position once per poll cycle while relative
/// motion is active and yields the delta to dispatch, if any.
#[derive(Debug, Default)]
pub(crate) struct MouseTracker {
    last_x: i32,
    last_y: i32,
    delta_invalid: bool,
}

impl MouseTracker {
    /// Re-anchors the tracker at `(x, y)` and arms the suppression latch.
    /// Called on every mode change, after any warp.
    pub fn reset(&mut self, x: i32, y: i32) {
        self.last_x = x;
        self.last_y = y;
        self.delta_invalid = true;
    }

    /// Records the cursor at `(x, y)` without arming suppression.
    /// Called after the per-poll re-center warp.
    pub fn anchor(&mut self, x: i32, y: i32) {
        self.last_x = x;
        self.last_y = y;
    }

    /// Computes the motion delta since the previous sample.
    ///
    /// Returns `None` for the first sample after a [`reset`] (spurious
    /// post-warp motion) and for zero deltas.
    ///
    /// [`reset`]: MouseTracker::reset
    pub fn sample(&mut self, x: i32, y: i32) -> Option<(i32, i32)> {
        if self.delta_invalid {
            self.delta_invalid = false;
            self.last_x = x;
            self.last_y = y;
            return None;
        }

        let dx = x - self.last_x;
        let dy = y - self.last_y;
        self.last_x = x;
        self.last_y = y;

        if dx != 0 || dy != 0 {
            Some((dx, dy))
        } else {
            None
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_free_absolute_hidden_flags_off() {
        let mode = MouseMode::default();
        assert!(!mode.captured && !mode.relative && !mode.visible);
    }

    #[test]
    fn first_sample_after_reset_is_suppressed() {
        let mut tracker = MouseTracker::default();
        tracker.reset(100, 100);

        // Spurious motion right after the warp must not produce a delta.
        assert_eq!(tracker.sample(140, 90), None);

        // The next sample is measured against the suppressed one.
        assert_eq!(tracker.sample(150, 95), Some((10, 5)));
    }

    #[test]
    fn exactly_one_sample_is_suppressed_per_reset() {
        let mut tracker = MouseTracker::default();
        tracker.reset(0, 0);
        assert_eq!(tracker.sample(5, 5), None);
        assert_eq!(tracker.sample(6, 5), Some((1, 0)));

        tracker.reset(0, 0);
        assert_eq!(tracker.sample(-3, 2), None);
        assert_eq!(tracker.sample(-3, 2), None, "zero delta stays silent");
        assert_eq!(tracker.sample(-1, 2), Some((2, 0)));
    }

    #[test]
    fn zero_delta_is_not_reported() {
        let mut tracker = MouseTracker::default();
        tracker.reset(10, 10);
        let _ = tracker.sample(10, 10);
        assert_eq!(tracker.sample(10, 10), None);
    }

    #[test]
    fn anchor_moves_reference_without_arming_suppression() {
        let mut tracker = MouseTracker::default();
        tracker.reset(0, 0);
        let _ = tracker.sample(0, 0);

        // Simulates the per-poll re-center: reference moves, next delta
        // is still reported.
        tracker.anchor(400, 300);
        assert_eq!(tracker.sample(410, 290), Some((10, -10)));
    }

    #[test]
    fn capture_toggle_mid_relative_swallows_the_warp_jump() {
        let mut tracker = MouseTracker::default();
        tracker.reset(100, 100);
        let _ = tracker.sample(100, 100);
        assert_eq!(tracker.sample(110, 105), Some((10, 5)));

        // Turning capture on while relative motion is already active
        // warps the cursor to the window center; the mode change resets
        // the tracker, so the center jump never surfaces as a delta.
        tracker.reset(400, 300);
        assert_eq!(tracker.sample(400, 300), None);
        assert_eq!(tracker.sample(403, 301), Some((3, 1)));
    }

    #[test]
    fn deltas_accumulate_across_recenters_unbounded() {
        let mut tracker = MouseTracker::default();
        tracker.reset(400, 300);
        let _ = tracker.sample(400, 300);

        let mut total = 0;
        for _ in 0..5 {
            if let Some((dx, _)) = tracker.sample(420, 300) {
                total += dx;
            }
            tracker.anchor(400, 300); // warp back to center
        }
        assert_eq!(total, 100, "virtual movement is unbounded across warps");
    }
}
