// SPDX-License-Identifier: GPL-3.0-only

//! Shift and caps lock state for the alphabetic layout.
//!
//! A single shift tap toggles the transient shifted state. Two taps in quick
//! succession toggle caps lock, which keeps the layout shifted until it is
//! toggled off the same way.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::{Duration, Instant};
//! use tinyboard::input::ShiftController;
//!
//! let mut shift = ShiftController::new();
//! let start = Instant::now();
//!
//! let shifted = shift.on_shift_press(start, false);
//! let shifted = shift.on_shift_press(start + Duration::from_millis(200), shifted);
//! assert!(shift.is_caps_lock());
//! ```

use std::time::{Duration, Instant};

use crate::app_settings::DOUBLE_TAP_WINDOW_MS;

/// Visible shift state of the alphabetic layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftPhase {
    Unshifted,
    Shifted,
    CapsLocked,
}

/// Tracks caps lock and shift tap timing.
///
/// The controller does not own the shifted flag itself; callers pass the
/// layout's current flag in and store the returned value.
#[derive(Debug, Clone)]
pub struct ShiftController {
    /// Sticky shifted state toggled by a double tap
    caps_lock: bool,

    /// Time of the last shift tap that did not toggle caps lock
    last_shift: Option<Instant>,

    /// Maximum gap between two taps that toggles caps lock
    double_tap_window: Duration,
}

impl ShiftController {
    /// Creates a controller with the default 800 ms double tap window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(DOUBLE_TAP_WINDOW_MS))
    }

    /// Creates a controller with a custom double tap window.
    #[must_use]
    pub fn with_window(double_tap_window: Duration) -> Self {
        Self {
            caps_lock: false,
            last_shift: None,
            double_tap_window,
        }
    }

    /// Returns the caps lock flag.
    #[must_use]
    pub fn is_caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// Returns the double tap window.
    #[must_use]
    pub fn double_tap_window(&self) -> Duration {
        self.double_tap_window
    }

    /// Handles a shift tap on the alphabetic layout.
    ///
    /// A tap strictly inside the window after the previous recorded tap
    /// toggles caps lock and forgets that tap, so the next tap starts a new
    /// window. Any other tap is recorded.
    ///
    /// # Arguments
    ///
    /// * `now` - Monotonic time of the tap
    /// * `shifted` - The layout's shifted flag before the tap
    ///
    /// # Returns
    ///
    /// The layout's new shifted flag: `caps_lock || !shifted`
    pub fn on_shift_press(&mut self, now: Instant, shifted: bool) -> bool {
        let within_window = self
            .last_shift
            .is_some_and(|last| now.saturating_duration_since(last) < self.double_tap_window);

        if within_window {
            self.caps_lock = !self.caps_lock;
            self.last_shift = None;
            tracing::debug!("Caps lock {}", if self.caps_lock { "on" } else { "off" });
        } else {
            self.last_shift = Some(now);
        }

        self.caps_lock || !shifted
    }

    /// Recomputes the shifted flag from the editor's capitalization hint.
    ///
    /// Leaves tap timing alone.
    ///
    /// # Arguments
    ///
    /// * `caps_mode` - The editor's cursor caps mode, non-zero when the next
    ///   character should be capitalized
    #[must_use]
    pub fn refresh(&self, caps_mode: u32) -> bool {
        self.caps_lock || caps_mode != 0
    }

    /// Classifies the alphabetic layout's shift state.
    #[must_use]
    pub fn phase(&self, shifted: bool) -> ShiftPhase {
        if self.caps_lock {
            ShiftPhase::CapsLocked
        } else if shifted {
            ShiftPhase::Shifted
        } else {
            ShiftPhase::Unshifted
        }
    }
}

impl Default for ShiftController {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    /// Presses shift at each offset, threading the shifted flag through.
    fn press_at(controller: &mut ShiftController, start: Instant, offsets: &[u64]) -> bool {
        offsets
            .iter()
            .fold(false, |shifted, &offset| controller.on_shift_press(start + ms(offset), shifted))
    }

    /// Test 1: A single tap shifts without caps lock
    #[test]
    fn test_single_tap() {
        let mut controller = ShiftController::new();
        let shifted = controller.on_shift_press(Instant::now(), false);

        assert!(shifted);
        assert!(!controller.is_caps_lock());
        assert_eq!(controller.phase(shifted), ShiftPhase::Shifted);
    }

    /// Test 2: A second single tap unshifts
    #[test]
    fn test_two_slow_taps_toggle_shift() {
        let mut controller = ShiftController::new();
        let shifted = press_at(&mut controller, Instant::now(), &[0, 1000]);

        assert!(!shifted);
        assert!(!controller.is_caps_lock());
        assert_eq!(controller.phase(shifted), ShiftPhase::Unshifted);
    }

    /// Test 3: Two taps inside the window toggle caps lock once
    #[test]
    fn test_double_tap_locks() {
        let mut controller = ShiftController::new();
        let shifted = press_at(&mut controller, Instant::now(), &[0, 300]);

        assert!(controller.is_caps_lock());
        assert!(shifted);
        assert_eq!(controller.phase(shifted), ShiftPhase::CapsLocked);
    }

    /// Test 4: A third rapid tap starts a new window instead of toggling
    #[test]
    fn test_third_rapid_tap_does_not_toggle() {
        let mut controller = ShiftController::new();
        let shifted = press_at(&mut controller, Instant::now(), &[0, 200, 400]);

        assert!(controller.is_caps_lock(), "Third tap must not undo the lock");
        assert!(shifted, "Caps lock keeps the layout shifted");
    }

    /// Test 5: Four rapid taps lock then unlock
    #[test]
    fn test_four_rapid_taps_unlock() {
        let mut controller = ShiftController::new();
        let shifted = press_at(&mut controller, Instant::now(), &[0, 200, 400, 600]);

        assert!(!controller.is_caps_lock());
        // The fourth tap sees the layout shifted, so it unshifts
        assert!(!shifted);
    }

    /// Test 6: The window is exclusive at exactly 800 ms
    #[test]
    fn test_window_boundary() {
        let mut controller = ShiftController::new();
        press_at(&mut controller, Instant::now(), &[0, 800]);
        assert!(!controller.is_caps_lock(), "800 ms is outside the window");

        let mut controller = ShiftController::new();
        press_at(&mut controller, Instant::now(), &[0, 799]);
        assert!(controller.is_caps_lock(), "799 ms is inside the window");
    }

    /// Test 7: A gap after a lock never toggles
    #[test]
    fn test_gap_never_toggles() {
        let mut controller = ShiftController::new();
        let start = Instant::now();
        let shifted = press_at(&mut controller, start, &[0, 100]);
        assert!(controller.is_caps_lock());

        let shifted = controller.on_shift_press(start + ms(5000), shifted);
        assert!(controller.is_caps_lock());
        assert!(shifted);
    }

    /// Test 8: Refresh follows the caps hint unless caps lock is on
    #[test]
    fn test_refresh() {
        let mut controller = ShiftController::new();
        assert!(!controller.refresh(0));
        assert!(controller.refresh(0x2000));

        press_at(&mut controller, Instant::now(), &[0, 100]);
        assert!(controller.refresh(0), "Caps lock forces shifted");
    }

    /// Test 9: Custom window
    #[test]
    fn test_custom_window() {
        let mut controller = ShiftController::with_window(ms(100));
        press_at(&mut controller, Instant::now(), &[0, 150]);
        assert!(!controller.is_caps_lock());
        assert_eq!(controller.double_tap_window(), ms(100));
    }
}
