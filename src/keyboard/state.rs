// SPDX-License-Identifier: GPL-3.0-only

//! Per-instance keyboard state.
//!
//! A [`KeyboardState`] wraps one immutable [`LayoutDefinition`] and owns the
//! mutable copy of its keys that the view draws. Two things change at runtime:
//!
//! - the action key's label, driven by the editor's requested action
//! - the input method switch key, which can be hidden. Its width is given to
//!   a neighbor key so the row has no gap, and both keys are restored from a
//!   snapshot taken when the state was built

use serde::{Deserialize, Serialize};

use crate::app_settings::KEYCODE_MODE_CHANGE;
use crate::keyboard::LayoutKind;
use crate::keyboard::action::{ActionLabelTable, ImeAction};
use crate::layout::{Key, KeyRef, LayoutDefinition, Row};

// ============================================================================
// Hide Policy
// ============================================================================

fn default_neighbor_code() -> i32 {
    KEYCODE_MODE_CHANGE
}

/// How a layout reflows its row when the optional key is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HidePolicy {
    /// Code of the key that absorbs the hidden key's width
    #[serde(default = "default_neighbor_code")]
    pub neighbor_code: i32,

    /// Whether the neighbor also moves its origin left by the absorbed width.
    ///
    /// Used when the optional key sits to the left of its neighbor.
    #[serde(default)]
    pub shift_neighbor_origin: bool,
}

impl HidePolicy {
    /// The neighbor grows to the right over the hidden key.
    pub fn absorb_into(neighbor_code: i32) -> Self {
        Self {
            neighbor_code,
            shift_neighbor_origin: false,
        }
    }

    /// The neighbor grows to the left over the hidden key.
    pub fn absorb_and_shift(neighbor_code: i32) -> Self {
        Self {
            neighbor_code,
            shift_neighbor_origin: true,
        }
    }
}

impl Default for HidePolicy {
    fn default() -> Self {
        Self::absorb_into(KEYCODE_MODE_CHANGE)
    }
}

// ============================================================================
// Optional Key Snapshot
// ============================================================================

/// Original geometry and face of the optional key and its neighbor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalKeySnapshot {
    pub x: i32,
    pub width: i32,
    pub label: Option<String>,
    pub icon: Option<String>,
    pub icon_preview: Option<String>,
    pub neighbor_x: i32,
    pub neighbor_width: i32,
}

#[derive(Debug, Clone)]
struct OptionalKeySlot {
    key: KeyRef,
    neighbor: KeyRef,
    policy: HidePolicy,
    snapshot: OptionalKeySnapshot,
}

// ============================================================================
// Keyboard State
// ============================================================================

/// One keyboard layout plus its runtime state.
#[derive(Debug, Clone)]
pub struct KeyboardState {
    kind: LayoutKind,
    definition: LayoutDefinition,
    rows: Vec<Row>,
    action_key: Option<KeyRef>,
    optional: Option<OptionalKeySlot>,
    action_labels: ActionLabelTable,
    optional_visible: bool,
    shifted: bool,
}

impl KeyboardState {
    /// Creates a state with the default hide policy and label table.
    pub fn new(kind: LayoutKind, definition: LayoutDefinition) -> Self {
        Self::with_policies(kind, definition, HidePolicy::default(), ActionLabelTable::default())
    }

    /// Creates a state, capturing the optional key snapshot.
    ///
    /// If the layout has an optional key but no key matching the policy's
    /// neighbor code, the optional key can never be hidden.
    pub fn with_policies(
        kind: LayoutKind,
        definition: LayoutDefinition,
        policy: HidePolicy,
        action_labels: ActionLabelTable,
    ) -> Self {
        let action_key = definition.action_key();
        let optional = definition.optional_key().and_then(|key| {
            let Some(neighbor) = definition.find_key(policy.neighbor_code) else {
                tracing::warn!(
                    "Layout '{}' has an input method switch key but no neighbor with code {}, it will stay visible",
                    definition.name,
                    policy.neighbor_code
                );
                return None;
            };
            let optional_key = definition.key(key)?;
            let neighbor_key = definition.key(neighbor)?;
            Some(OptionalKeySlot {
                key,
                neighbor,
                policy,
                snapshot: OptionalKeySnapshot {
                    x: optional_key.x,
                    width: optional_key.width,
                    label: optional_key.label.clone(),
                    icon: optional_key.icon.clone(),
                    icon_preview: optional_key.icon_preview.clone(),
                    neighbor_x: neighbor_key.x,
                    neighbor_width: neighbor_key.width,
                },
            })
        });

        Self {
            kind,
            rows: definition.rows.clone(),
            definition,
            action_key,
            optional,
            action_labels,
            optional_visible: true,
            shifted: false,
        }
    }

    /// Which of the three layouts this is.
    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    /// The immutable layout this state was built from.
    pub fn definition(&self) -> &LayoutDefinition {
        &self.definition
    }

    /// Rows with the current runtime geometry and labels.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterates over every key in row order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.rows.iter().flat_map(|r| r.keys.iter())
    }

    /// Returns the key at `key_ref`.
    pub fn key(&self, key_ref: KeyRef) -> Option<&Key> {
        self.rows.get(key_ref.row)?.keys.get(key_ref.index)
    }

    fn key_mut(&mut self, key_ref: KeyRef) -> Option<&mut Key> {
        self.rows.get_mut(key_ref.row)?.keys.get_mut(key_ref.index)
    }

    /// Returns the first key with `code`.
    pub fn key_by_code(&self, code: i32) -> Option<&Key> {
        self.keys().find(|k| k.code == code)
    }

    /// The action key, if the layout has one.
    pub fn action_key(&self) -> Option<&Key> {
        self.action_key.and_then(|r| self.key(r))
    }

    /// The optional key, if it can be hidden on this layout.
    pub fn optional_key(&self) -> Option<&Key> {
        self.optional.as_ref().and_then(|slot| self.key(slot.key))
    }

    /// The snapshot taken at construction, if the layout has a hideable key.
    pub fn optional_key_snapshot(&self) -> Option<&OptionalKeySnapshot> {
        self.optional.as_ref().map(|slot| &slot.snapshot)
    }

    /// The hide policy in effect, if the layout has a hideable key.
    pub fn hide_policy(&self) -> Option<HidePolicy> {
        self.optional.as_ref().map(|slot| slot.policy)
    }

    /// Returns `false` only while the optional key is hidden.
    pub fn is_optional_key_visible(&self) -> bool {
        self.optional_visible
    }

    /// Shows or hides the optional key.
    ///
    /// All geometry is computed from the construction snapshot, so repeated
    /// calls with the same value leave the layout unchanged. No-op when the
    /// layout has no hideable key.
    pub fn set_optional_key_visible(&mut self, visible: bool) {
        let Some(slot) = self.optional.clone() else {
            return;
        };
        let snapshot = &slot.snapshot;

        if let Some(neighbor) = self.key_mut(slot.neighbor) {
            if visible {
                neighbor.x = snapshot.neighbor_x;
                neighbor.width = snapshot.neighbor_width;
            } else {
                neighbor.width = snapshot.neighbor_width.saturating_add(snapshot.width);
                neighbor.x = if slot.policy.shift_neighbor_origin {
                    snapshot.neighbor_x.saturating_sub(snapshot.width)
                } else {
                    snapshot.neighbor_x
                };
            }
        }

        if let Some(key) = self.key_mut(slot.key) {
            if visible {
                key.x = snapshot.x;
                key.width = snapshot.width;
                key.label = snapshot.label.clone();
                key.icon = snapshot.icon.clone();
                key.icon_preview = snapshot.icon_preview.clone();
            } else {
                key.width = 0;
                key.label = None;
                key.icon = None;
                key.icon_preview = None;
            }
        }

        if self.optional_visible != visible {
            tracing::debug!(
                "{:?} layout: input method switch key {}",
                self.kind,
                if visible { "shown" } else { "hidden" }
            );
        }
        self.optional_visible = visible;
    }

    /// Relabels the action key for the editor's requested action.
    ///
    /// No-op when the layout has no action key.
    pub fn set_ime_action_label(&mut self, action: ImeAction, no_enter_action: bool) {
        let Some(action_ref) = self.action_key else {
            return;
        };
        let label = self.action_labels.label_for(action, no_enter_action).clone();
        if let Some(key) = self.key_mut(action_ref) {
            label.apply(key);
            tracing::debug!("{:?} layout: action key labelled '{}'", self.kind, label.text);
        }
    }

    /// Returns the shifted flag.
    pub fn is_shifted(&self) -> bool {
        self.shifted
    }

    /// Sets the shifted flag, returning `true` if it changed.
    pub fn set_shifted(&mut self, shifted: bool) -> bool {
        if self.shifted == shifted {
            return false;
        }
        self.shifted = shifted;
        true
    }
}

// ============================================================================
// Tests
// ============================================================================
