// SPDX-License-Identifier: GPL-3.0-only

//! Layout parsing logic for loading JSON layout definitions.
//!
//! This module reads layout files, resolves key geometry (auto-placing keys
//! that omit an explicit `x`), and runs validation.

use crate::layout::error::{ParseError, ParseResult};
use crate::layout::types::{Key, LayoutDefinition, LayoutFile, Row};
use crate::layout::validation::{has_errors, validate_geometry, validate_layout_file};
use std::fs;

/// Parses a keyboard layout from a JSON file.
///
/// I/O errors, JSON errors and fatal validation errors are reported with the
/// file path attached.
///
/// # Example
///
/// ```rust,ignore
/// use tinyboard::layout::parse_layout_file;
///
/// match parse_layout_file("resources/layouts/qwerty.json") {
///     Ok(result) => {
///         for warning in &result.warnings {
///             eprintln!("{}", warning);
///         }
///         println!("Loaded {} keys", result.layout.key_count());
///     }
///     Err(e) => eprintln!("Failed to parse layout: {}", e),
/// }
/// ```
pub fn parse_layout_file(path: &str) -> Result<ParseResult<LayoutDefinition>, ParseError> {
    let json_str = fs::read_to_string(path).map_err(|e| ParseError::io_error_with_path(e, path))?;

    let file: LayoutFile =
        serde_json::from_str(&json_str).map_err(|e| ParseError::json_error_with_path(e, path))?;

    build_layout(file).map_err(|e| e.with_path(path))
}

/// Parses a keyboard layout from a JSON string.
pub fn parse_layout_from_string(json: &str) -> Result<ParseResult<LayoutDefinition>, ParseError> {
    let file: LayoutFile = serde_json::from_str(json).map_err(ParseError::json_error)?;
    build_layout(file)
}

/// Validates a deserialized layout file and resolves it into a definition.
///
/// Returns a `ValidationError` carrying every issue when at least one of them
/// is fatal; otherwise the resolved layout is returned with its warnings.
pub fn build_layout(file: LayoutFile) -> Result<ParseResult<LayoutDefinition>, ParseError> {
    let mut issues = validate_layout_file(&file);
    if has_errors(&issues) {
        return Err(ParseError::validation_error(issues));
    }

    let layout = resolve_geometry(&file);
    issues.extend(validate_geometry(&layout));

    tracing::info!(
        "Loaded layout '{}' with {} keys ({} warnings)",
        layout.name,
        layout.key_count(),
        issues.len()
    );

    Ok(ParseResult::with_warnings(layout, issues))
}

/// Resolves the x origin and width of every key.
///
/// Keys without an explicit `x` start where the previous key ended plus the
/// layout's horizontal gap. The first key of a row starts at 0.
fn resolve_geometry(file: &LayoutFile) -> LayoutDefinition {
    let rows = file
        .rows
        .iter()
        .map(|row| {
            let mut cursor = 0;
            let keys = row
                .keys
                .iter()
                .map(|spec| {
                    let x = spec.x.unwrap_or(cursor);
                    let width = spec.width.unwrap_or(file.default_key_width);
                    cursor = x.saturating_add(width).saturating_add(file.horizontal_gap);
                    Key {
                        code: spec.code,
                        label: spec.label.clone(),
                        icon: spec.icon.clone(),
                        icon_preview: spec.icon_preview.clone(),
                        x,
                        width,
                    }
                })
                .collect();
            Row { keys }
        })
        .collect();

    LayoutDefinition {
        name: file.name.clone(),
        version: file.version.clone(),
        rows,
    }
}

// ============================================================================
// Tests
// ============================================================================
