// SPDX-License-Identifier: GPL-3.0-only

//! Validation rules for keyboard layout definitions.
//!
//! Validation is permissive: most problems are collected as warnings and the
//! layout stays usable. Only geometry that cannot be laid out at all
//! (non-positive widths, negative origins, keys reaching past
//! [`MAX_KEY_EXTENT`]) is reported as an error.

use crate::app_settings::{KEYCODE_ENTER, KEYCODE_LANGUAGE_SWITCH, MAX_KEY_EXTENT};
use crate::layout::error::ValidationIssue;
use crate::layout::types::{KeySpec, LayoutDefinition, LayoutFile};

/// Returns `true` if any issue in the list is fatal.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(ValidationIssue::is_error)
}

/// Validates a deserialized layout file before geometry is resolved.
pub fn validate_layout_file(file: &LayoutFile) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if file.name.is_empty() {
        issues.push(
            ValidationIssue::warning("Layout name is empty", "name")
                .with_hint("Provide a descriptive name for the layout"),
        );
    }

    if file.version.is_empty() {
        issues.push(
            ValidationIssue::warning("Layout version is empty", "version")
                .with_hint("Use semantic versioning (e.g., '1.0', '1.0.0')"),
        );
    }

    if file.default_key_width <= 0 {
        issues.push(
            ValidationIssue::error(
                format!("Default key width {} is not positive", file.default_key_width),
                "default_key_width",
            )
            .with_hint("Use a positive width such as 10"),
        );
    }

    if file.horizontal_gap < 0 {
        issues.push(ValidationIssue::warning(
            format!("Horizontal gap {} is negative, keys will overlap", file.horizontal_gap),
            "horizontal_gap",
        ));
    }

    if file.rows.is_empty() {
        issues.push(ValidationIssue::warning("Layout has no rows", "rows"));
    }

    let mut action_keys = 0;
    let mut optional_keys = 0;

    for (row_idx, row) in file.rows.iter().enumerate() {
        // Placement runs in i64 so it can describe rows that overflow i32
        let mut cursor: i64 = 0;

        if row.keys.is_empty() {
            issues.push(ValidationIssue::warning(
                "Row has no keys",
                format!("rows[{}]", row_idx),
            ));
        }

        for (key_idx, key) in row.keys.iter().enumerate() {
            let key_path = format!("rows[{}].keys[{}]", row_idx, key_idx);
            validate_key(key, &key_path, &mut issues);
            validate_placement(key, file, &mut cursor, &key_path, &mut issues);

            if key.code == KEYCODE_ENTER {
                action_keys += 1;
                if action_keys == 2 {
                    issues.push(
                        ValidationIssue::warning("Layout declares more than one action key", key_path.clone())
                            .with_hint("Only the first key with code 10 is relabelled"),
                    );
                }
            }

            if key.code == KEYCODE_LANGUAGE_SWITCH {
                optional_keys += 1;
                if optional_keys == 2 {
                    issues.push(
                        ValidationIssue::warning("Layout declares more than one input method switch key", key_path)
                            .with_hint("Only the first key with code -101 can be hidden"),
                    );
                }
            }
        }
    }

    issues
}

fn validate_key(key: &KeySpec, key_path: &str, issues: &mut Vec<ValidationIssue>) {
    if let Some(width) = key.width {
        if width <= 0 {
            issues.push(
                ValidationIssue::error(
                    format!("Key width {} is not positive", width),
                    format!("{}.width", key_path),
                )
                .with_hint("Hidden keys are produced at runtime, declare the full width"),
            );
        }
    }

    if let Some(x) = key.x {
        if x < 0 {
            issues.push(ValidationIssue::error(
                format!("Key origin {} is negative", x),
                format!("{}.x", key_path),
            ));
        }
    }

    if key.label.is_none() && key.icon.is_none() {
        issues.push(
            ValidationIssue::warning("Key has neither a label nor an icon", key_path)
                .with_hint("Provide a label or an icon so the key can be drawn"),
        );
    }
}

/// Places `key` the way the parser will and checks where it lands.
///
/// Explicit negative origins are reported by [`validate_key`]; this only
/// reports auto-placed keys pushed left of 0 by a negative gap, and keys
/// whose right edge passes [`MAX_KEY_EXTENT`].
fn validate_placement(
    key: &KeySpec,
    file: &LayoutFile,
    cursor: &mut i64,
    key_path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let x = key.x.map_or(*cursor, i64::from);
    let right = x + i64::from(key.width.unwrap_or(file.default_key_width));
    *cursor = right + i64::from(file.horizontal_gap);

    if key.x.is_none() && x < 0 {
        issues.push(
            ValidationIssue::error(
                format!("Auto-placed key starts at negative origin {}", x),
                format!("{}.x", key_path),
            )
            .with_hint("Use a smaller negative gap or give the key an explicit x"),
        );
    }

    if right > i64::from(MAX_KEY_EXTENT) {
        issues.push(
            ValidationIssue::error(
                format!("Key ends at {}, past the maximum extent {}", right, MAX_KEY_EXTENT),
                key_path,
            )
            .with_hint("Layout units are relative, scale the row down"),
        );
    }
}

/// Validates resolved geometry, reporting keys that overlap within a row.
pub fn validate_geometry(layout: &LayoutDefinition) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (row_idx, row) in layout.rows.iter().enumerate() {
        let mut ordered: Vec<(usize, i32, i32)> = row
            .keys
            .iter()
            .enumerate()
            .map(|(i, k)| (i, k.x, k.right()))
            .collect();
        ordered.sort_by_key(|&(_, x, _)| x);

        for pair in ordered.windows(2) {
            let (_, _, prev_right) = pair[0];
            let (idx, x, _) = pair[1];
            if x < prev_right {
                issues.push(ValidationIssue::warning(
                    format!("Key starts at {} but the previous key ends at {}", x, prev_right),
                    format!("rows[{}].keys[{}].x", row_idx, idx),
                ));
            }
        }
    }

    issues
}

// ============================================================================
// Tests
// ============================================================================
