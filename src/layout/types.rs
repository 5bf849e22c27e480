// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for keyboard layout definitions.
//!
//! The serialized JSON shape of a layout file, and the immutable
//! [`LayoutDefinition`] the engine works on.

use serde::{Deserialize, Serialize};

use crate::app_settings::{KEYCODE_ENTER, KEYCODE_LANGUAGE_SWITCH};

// ============================================================================
// Layout File Format
// ============================================================================

fn default_version() -> String {
    "1.0".to_string()
}

fn default_key_width() -> i32 {
    10
}

/// Serialized shape of a layout file.
///
/// Geometry is in abstract layout units. Keys that omit `x` flow after the
/// previous key in their row; keys that omit `width` use `default_key_width`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutFile {
    /// Layout name
    pub name: String,

    /// Layout version
    #[serde(default = "default_version")]
    pub version: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Width of keys that do not declare their own
    #[serde(default = "default_key_width")]
    pub default_key_width: i32,

    /// Gap inserted between consecutive auto-placed keys
    #[serde(default)]
    pub horizontal_gap: i32,

    /// Rows of keys, top to bottom
    #[serde(default)]
    pub rows: Vec<RowSpec>,
}

/// Serialized row of a layout file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSpec {
    /// Keys in this row, left to right
    #[serde(default)]
    pub keys: Vec<KeySpec>,
}

/// Serialized key of a layout file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpec {
    /// Identity code emitted when the key is pressed
    pub code: i32,

    /// Text drawn on the key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Icon drawn on the key instead of the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Icon shown in the key press preview
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_preview: Option<String>,

    /// Explicit x origin; auto-placed when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,

    /// Explicit width; `default_key_width` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
}

// ============================================================================
// Layout Data Structures
// ============================================================================

/// A key with resolved geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    /// Identity code
    pub code: i32,
    /// Text drawn on the key
    pub label: Option<String>,
    /// Icon reference drawn on the key
    pub icon: Option<String>,
    /// Icon reference for the press preview
    pub icon_preview: Option<String>,
    /// Left edge in layout units
    pub x: i32,
    /// Width in layout units
    pub width: i32,
}

impl Key {
    /// Returns the right edge of the key.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Returns `true` if the key has something to draw.
    pub fn has_face(&self) -> bool {
        self.label.is_some() || self.icon.is_some()
    }
}

/// A row of keys with resolved geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Keys in this row, left to right
    pub keys: Vec<Key>,
}

/// Position of a key inside a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyRef {
    /// Row index
    pub row: usize,
    /// Key index within the row
    pub index: usize,
}

/// An immutable keyboard layout.
///
/// Produced by the parser and never mutated afterwards; per-instance
/// changes live in [`crate::keyboard::KeyboardState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDefinition {
    /// Layout name
    pub name: String,
    /// Layout version
    pub version: String,
    /// Rows of keys
    pub rows: Vec<Row>,
}

impl LayoutDefinition {
    /// Creates a layout from already resolved rows.
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            rows,
        }
    }

    /// Finds the first key carrying `code`.
    pub fn find_key(&self, code: i32) -> Option<KeyRef> {
        self.rows.iter().enumerate().find_map(|(row, r)| {
            r.keys
                .iter()
                .position(|k| k.code == code)
                .map(|index| KeyRef { row, index })
        })
    }

    /// Returns the key at `key_ref`.
    pub fn key(&self, key_ref: KeyRef) -> Option<&Key> {
        self.rows.get(key_ref.row)?.keys.get(key_ref.index)
    }

    /// Iterates over every key in row order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.rows.iter().flat_map(|r| r.keys.iter())
    }

    /// Returns the number of keys in the layout.
    pub fn key_count(&self) -> usize {
        self.rows.iter().map(|r| r.keys.len()).sum()
    }

    /// The commit/enter key, if the layout declares one.
    pub fn action_key(&self) -> Option<KeyRef> {
        self.find_key(KEYCODE_ENTER)
    }

    /// The input method switch key, if the layout declares one.
    pub fn optional_key(&self) -> Option<KeyRef> {
        self.find_key(KEYCODE_LANGUAGE_SWITCH)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: i32, x: i32, width: i32) -> Key {
        Key {
            code,
            label: Some(code.to_string()),
            x,
            width,
            ..Key::default()
        }
    }

    /// Test 1: KeySpec defaults when fields are omitted
    #[test]
    fn test_key_spec_defaults() {
        let spec: KeySpec = serde_json::from_str(r#"{"code": 113, "label": "q"}"#)
            .expect("Should parse minimal key");

        assert_eq!(spec.code, 113);
        assert_eq!(spec.label.as_deref(), Some("q"));
        assert_eq!(spec.x, None);
        assert_eq!(spec.width, None);
        assert_eq!(spec.icon, None);
    }

    /// Test 2: LayoutFile defaults
    #[test]
    fn test_layout_file_defaults() {
        let file: LayoutFile =
            serde_json::from_str(r#"{"name": "empty"}"#).expect("Should parse minimal layout");

        assert_eq!(file.version, "1.0");
        assert_eq!(file.default_key_width, 10);
        assert_eq!(file.horizontal_gap, 0);
        assert!(file.rows.is_empty());
    }

    /// Test 3: Special key lookup by fixed code
    #[test]
    fn test_special_key_lookup() {
        let layout = LayoutDefinition::new(
            "test",
            vec![
                Row {
                    keys: vec![key(113, 0, 10), key(119, 10, 10)],
                },
                Row {
                    keys: vec![
                        key(KEYCODE_LANGUAGE_SWITCH, 0, 10),
                        key(32, 10, 40),
                        key(KEYCODE_ENTER, 50, 15),
                    ],
                },
            ],
        );

        assert_eq!(layout.key_count(), 5);
        assert_eq!(layout.action_key(), Some(KeyRef { row: 1, index: 2 }));
        assert_eq!(layout.optional_key(), Some(KeyRef { row: 1, index: 0 }));
        assert_eq!(layout.find_key(999), None);

        let enter = layout.key(KeyRef { row: 1, index: 2 }).unwrap();
        assert_eq!(enter.right(), 65);
        assert!(layout.key(KeyRef { row: 5, index: 0 }).is_none());
    }

    /// Test 4: The right edge saturates instead of overflowing
    #[test]
    fn test_right_edge_saturates() {
        let key = Key { x: i32::MAX - 5, width: 10, ..Key::default() };
        assert_eq!(key.right(), i32::MAX);
    }
}
