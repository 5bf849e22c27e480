// SPDX-License-Identifier: GPL-3.0-only

//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use crate::app_settings::DOUBLE_TAP_WINDOW_MS;
use crate::keyboard::{ActionLabelTable, HidePolicy, KeyboardState, LayoutKind};
use crate::layout::{LayoutDefinition, ParseError};

/// Hide policy and label table of one layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPolicy {
    #[serde(default)]
    pub hide: HidePolicy,
    #[serde(default)]
    pub action_labels: ActionLabelTable,
}

/// Per-layout policies.
///
/// All three layouts default to the same policy: the switch key folds into
/// the mode change key, and the search action clears its icon. Layouts that
/// need [`HidePolicy::absorb_and_shift`] or
/// [`ActionLabelTable::keep_search_icon`] select them in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPolicies {
    #[serde(default)]
    pub primary: LayoutPolicy,
    #[serde(default)]
    pub symbols: LayoutPolicy,
    #[serde(default)]
    pub symbols_shifted: LayoutPolicy,
}

/// System bar insets the keyboard view keeps clear of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewInsets {
    #[serde(default)]
    pub left: i32,
    #[serde(default)]
    pub right: i32,
    #[serde(default)]
    pub bottom: i32,
}

/// Configuration for the keyboard engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum gap between two shift taps that toggles caps lock
    pub double_tap_window_ms: u64,
    /// Hide policy and action labels per layout
    pub layouts: LayoutPolicies,
    /// Insets applied to the view
    pub insets: ViewInsets,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
            layouts: LayoutPolicies::default(),
            insets: ViewInsets::default(),
        }
    }
}

impl EngineConfig {
    /// Loads a config from a JSON file.
    pub fn load(path: &str) -> Result<Self, ParseError> {
        let json = fs::read_to_string(path).map_err(|e| ParseError::io_error_with_path(e, path))?;
        serde_json::from_str(&json).map_err(|e| ParseError::json_error_with_path(e, path))
    }

    /// Parses a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The double tap window as a duration.
    pub fn double_tap_window(&self) -> Duration {
        Duration::from_millis(self.double_tap_window_ms)
    }

    /// The policy for `kind`.
    pub fn policy(&self, kind: LayoutKind) -> &LayoutPolicy {
        match kind {
            LayoutKind::Primary => &self.layouts.primary,
            LayoutKind::Symbols => &self.layouts.symbols,
            LayoutKind::SymbolsShifted => &self.layouts.symbols_shifted,
        }
    }

    /// Builds a keyboard state for `kind` with this config's policy.
    pub fn keyboard(&self, kind: LayoutKind, definition: LayoutDefinition) -> KeyboardState {
        let policy = self.policy(kind);
        KeyboardState::with_policies(kind, definition, policy.hide, policy.action_labels.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================
