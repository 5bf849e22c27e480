// SPDX-License-Identifier: GPL-3.0-only

//! JSON layout loading for tinyboard keyboards.
//!
//! A layout file describes rows of keys with integer identity codes and
//! horizontal geometry. Loading produces an immutable [`LayoutDefinition`];
//! everything that changes at runtime (labels of the action key, the hidden
//! input method switch key) lives in [`crate::keyboard::KeyboardState`].
//!
//! # Example
//!
//! ```rust,ignore
//! use tinyboard::layout::parse_layout_from_string;
//!
//! let json = r#"{
//!     "name": "Tiny",
//!     "default_key_width": 10,
//!     "rows": [
//!         {"keys": [
//!             {"code": -2, "label": "?123", "width": 15},
//!             {"code": -101, "icon": "sym_keyboard_language_switch"},
//!             {"code": 32, "label": "space", "width": 40},
//!             {"code": 10, "icon": "sym_keyboard_return", "width": 15}
//!         ]}
//!     ]
//! }"#;
//!
//! let result = parse_layout_from_string(json)?;
//! assert!(result.layout.optional_key().is_some());
//! ```
//!
//! Keys without `x` are placed after the previous key of their row plus the
//! layout's `horizontal_gap`. Keys without `width` use `default_key_width`.

pub mod error;
pub mod parser;
pub mod types;
pub mod validation;

// Re-export public API - Error handling types
pub use error::{ParseError, ParseResult, Severity, ValidationIssue};

// Re-export public API - Parser functions
pub use parser::{build_layout, parse_layout_file, parse_layout_from_string};

// Re-export public API - Data structures
pub use types::{Key, KeyRef, KeySpec, LayoutDefinition, LayoutFile, Row, RowSpec};

// ============================================================================
// Public API Integration Tests
// ============================================================================
