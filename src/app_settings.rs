// SPDX-License-Identifier: GPL-3.0-only

//! Centralized engine settings and constants.

/// Default log directive used by the replay host.
pub const DEFAULT_LOG_DIRECTIVE: &str = "tinyboard=info";

/// Window in milliseconds within which a second shift press toggles caps lock.
pub const DOUBLE_TAP_WINDOW_MS: u64 = 800;

// ============================================================================
// Fixed Key Codes
// ============================================================================

/// Shift key.
pub const KEYCODE_SHIFT: i32 = -1;

/// Switches between the alphabetic and symbol layouts.
pub const KEYCODE_MODE_CHANGE: i32 = -2;

/// Cancel key.
pub const KEYCODE_CANCEL: i32 = -3;

/// Done key, sends an enter key event to the editor.
pub const KEYCODE_DONE: i32 = -4;

/// Backspace.
pub const KEYCODE_DELETE: i32 = -5;

/// Alt key.
pub const KEYCODE_ALT: i32 = -6;

/// Switches to the next input method. This is the optional key.
pub const KEYCODE_LANGUAGE_SWITCH: i32 = -101;

/// Enter (line feed). This is the action key.
pub const KEYCODE_ENTER: i32 = 10;

/// Space bar.
pub const KEYCODE_SPACE: i32 = 32;

// ============================================================================
// Layout Geometry
// ============================================================================

/// Largest right edge a key may have, in layout units.
///
/// Any two widths of a valid layout add up without overflowing `i32`.
pub const MAX_KEY_EXTENT: i32 = i32::MAX / 2;

// ============================================================================
// Editor Info Bit Layout
// ============================================================================

/// Mask selecting the input class bits of an editor input type.
pub const INPUT_TYPE_MASK_CLASS: u32 = 0x0000_000f;

/// Input type class: no content type, the editor is not a text field.
pub const INPUT_TYPE_NULL: u32 = 0;

/// Input type class: plain text.
pub const INPUT_TYPE_CLASS_TEXT: u32 = 1;

/// Input type class: numbers.
pub const INPUT_TYPE_CLASS_NUMBER: u32 = 2;

/// Input type class: phone numbers.
pub const INPUT_TYPE_CLASS_PHONE: u32 = 3;

/// Input type class: dates and times.
pub const INPUT_TYPE_CLASS_DATETIME: u32 = 4;

/// Mask selecting the requested action of the editor's IME options.
pub const IME_MASK_ACTION: u32 = 0x0000_00ff;

/// Requested action: go to the target of the entered text.
pub const IME_ACTION_GO: u32 = 2;

/// Requested action: run a search.
pub const IME_ACTION_SEARCH: u32 = 3;

/// Requested action: send the entered text.
pub const IME_ACTION_SEND: u32 = 4;

/// Requested action: move to the next field.
pub const IME_ACTION_NEXT: u32 = 5;

/// The editor does not want its action bound to the enter key.
pub const IME_FLAG_NO_ENTER_ACTION: u32 = 0x4000_0000;
