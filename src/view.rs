// SPDX-License-Identifier: GPL-3.0-only

//! Snapshot of what the view layer draws.
//!
//! [`KeyboardView`] is a plain serializable value captured from a
//! [`LayoutSelector`]: the active layout's keys with their display faces,
//! the shift flags and the margins that keep the view clear of system bars.

use serde::Serialize;

use crate::app_settings::KEYCODE_SHIFT;
use crate::config::ViewInsets;
use crate::keyboard::LayoutKind;
use crate::layout::Key;
use crate::selector::LayoutSelector;

/// Margins around the keyboard view, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Margins {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    /// Margins for the given insets. Negative insets count as zero.
    pub fn from_insets(insets: &ViewInsets) -> Self {
        Self {
            left: insets.left.max(0),
            right: insets.right.max(0),
            bottom: insets.bottom.max(0),
        }
    }
}

/// One key as drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyFace {
    pub code: i32,
    /// Label text, upper-cased for single character labels while shifted
    pub label: Option<String>,
    pub icon: Option<String>,
    pub icon_preview: Option<String>,
    pub x: i32,
    pub width: i32,
    /// Drawn highlighted, used for the shift key while shifted
    pub active: bool,
}

impl KeyFace {
    fn from_key(key: &Key, shifted: bool) -> Self {
        Self {
            code: key.code,
            label: key.label.as_deref().map(|label| display_label(label, shifted)),
            icon: key.icon.clone(),
            icon_preview: key.icon_preview.clone(),
            x: key.x,
            width: key.width,
            active: key.code == KEYCODE_SHIFT && shifted,
        }
    }

    /// Returns `true` if the key takes no space, as a hidden key does.
    pub fn is_collapsed(&self) -> bool {
        self.width == 0
    }
}

/// Label text for a key face.
///
/// Only single character labels follow the shift state; words like "Go" or
/// "?123" are shown as written.
pub fn display_label(label: &str, shifted: bool) -> String {
    let mut chars = label.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if shifted => c.to_uppercase().collect(),
        _ => label.to_string(),
    }
}

/// Everything the view layer needs to draw the active keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyboardView {
    pub kind: LayoutKind,
    pub layout_name: String,
    pub shifted: bool,
    pub caps_lock: bool,
    pub optional_key_visible: bool,
    pub rows: Vec<Vec<KeyFace>>,
    pub margins: Margins,
}

impl KeyboardView {
    /// Captures the selector's active keyboard.
    pub fn capture(selector: &LayoutSelector, insets: &ViewInsets) -> Self {
        let keyboard = selector.current();
        let shifted = keyboard.is_shifted();

        Self {
            kind: keyboard.kind(),
            layout_name: keyboard.definition().name.clone(),
            shifted,
            caps_lock: selector.is_caps_lock(),
            optional_key_visible: keyboard.is_optional_key_visible(),
            rows: keyboard
                .rows()
                .iter()
                .map(|row| row.keys.iter().map(|key| KeyFace::from_key(key, shifted)).collect())
                .collect(),
            margins: Margins::from_insets(insets),
        }
    }

    /// Finds a key face by code.
    pub fn key(&self, code: i32) -> Option<&KeyFace> {
        self.rows.iter().flatten().find(|face| face.code == code)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_settings::{KEYCODE_ENTER, KEYCODE_LANGUAGE_SWITCH, KEYCODE_MODE_CHANGE};
    use crate::input::{EditorInfo, ImeOptions};
    use crate::keyboard::ImeAction;
    use crate::selector::tests::{HOST, TestHost, selector};
    use std::time::Instant;

    /// Test 1: Single character labels follow shift
    #[test]
    fn test_display_label() {
        assert_eq!(display_label("q", true), "Q");
        assert_eq!(display_label("q", false), "q");
        assert_eq!(display_label("?123", true), "?123");
        assert_eq!(display_label("", true), "");
    }

    /// Test 2: Negative insets clamp to zero
    #[test]
    fn test_margins_from_insets() {
        let insets = ViewInsets {
            left: -4,
            right: 12,
            bottom: 48,
        };
        assert_eq!(
            Margins::from_insets(&insets),
            Margins {
                left: 0,
                right: 12,
                bottom: 48
            }
        );
    }

    /// Test 3: Capture reflects the active layout and shift state
    #[test]
    fn test_capture_primary_shifted() {
        let mut selector = selector();
        selector.start_input(EditorInfo::text(ImeOptions::new(ImeAction::Send, false)), &HOST);
        selector.press_shift_at(Instant::now(), &HOST);

        let view = KeyboardView::capture(&selector, &ViewInsets::default());
        assert_eq!(view.kind, LayoutKind::Primary);
        assert_eq!(view.layout_name, "qwerty");
        assert!(view.shifted);
        assert!(!view.caps_lock);

        assert_eq!(view.key('q' as i32).unwrap().label.as_deref(), Some("Q"));
        assert_eq!(view.key(KEYCODE_ENTER).unwrap().label.as_deref(), Some("Send"));
        assert!(view.key(KEYCODE_SHIFT).unwrap().active);
        assert_eq!(view.key(KEYCODE_MODE_CHANGE).unwrap().label.as_deref(), Some("?123"));
    }

    /// Test 4: Hidden optional key is collapsed in the view
    #[test]
    fn test_capture_hidden_optional_key() {
        let mut selector = selector();
        let host = TestHost {
            offer_switch: false,
            caps_mode: Some(0),
        };
        selector.start_input(EditorInfo::number(ImeOptions(0)), &host);

        let view = KeyboardView::capture(&selector, &ViewInsets::default());
        assert_eq!(view.kind, LayoutKind::Symbols);
        assert!(!view.optional_key_visible);

        let lang = view.key(KEYCODE_LANGUAGE_SWITCH).unwrap();
        assert!(lang.is_collapsed());
        assert!(lang.icon.is_none());
        assert_eq!(view.key(KEYCODE_MODE_CHANGE).unwrap().width, 25);
    }

    /// Test 5: The view serializes to JSON
    #[test]
    fn test_view_serializes() {
        let selector = selector();
        let view = KeyboardView::capture(&selector, &ViewInsets::default());

        let json = serde_json::to_value(&view).expect("Should serialize");
        assert_eq!(json["kind"], "primary");
        assert_eq!(json["rows"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["margins"]["bottom"], 0);
    }
}
