// SPDX-License-Identifier: GPL-3.0-only

//! Action key labelling.
//!
//! The editor tells the keyboard what its enter key should do (go, search,
//! send...). This module maps that request to the text and icon treatment of
//! the action key. The mapping is a per-layout table so layouts can differ in
//! how they treat the key's icon.

use serde::{Deserialize, Serialize};

use crate::layout::Key;

/// Action requested by the editor for its enter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImeAction {
    /// Navigate to the target of the entered text
    Go,
    /// Move focus to the next field
    Next,
    /// Run a search
    Search,
    /// Send the entered text
    Send,
    /// No action or an action without a dedicated label
    Unspecified,
}

/// What happens to the action key's icons when a label is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconEffect {
    /// Leave icon and preview untouched
    Keep,
    /// Clear the icon, keep the preview
    Clear,
    /// Clear both icon and preview
    ClearWithPreview,
}

/// Label text and icon treatment for one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLabel {
    /// Text shown on the action key
    pub text: String,
    /// Icon treatment
    pub icon: IconEffect,
}

impl ActionLabel {
    /// Creates a label.
    pub fn new(text: impl Into<String>, icon: IconEffect) -> Self {
        Self {
            text: text.into(),
            icon,
        }
    }

    /// Returns `true` if applying this label removes the key's icon.
    pub fn clears_icon(&self) -> bool {
        self.icon != IconEffect::Keep
    }

    /// Writes the label onto `key`.
    pub fn apply(&self, key: &mut Key) {
        match self.icon {
            IconEffect::Keep => {}
            IconEffect::Clear => key.icon = None,
            IconEffect::ClearWithPreview => {
                key.icon = None;
                key.icon_preview = None;
            }
        }
        key.label = Some(self.text.clone());
    }
}

/// Per-layout mapping from [`ImeAction`] to [`ActionLabel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLabelTable {
    pub go: ActionLabel,
    pub next: ActionLabel,
    pub search: ActionLabel,
    pub send: ActionLabel,
    /// Used for every other action and whenever the editor suppresses its
    /// enter action
    pub enter: ActionLabel,
}

impl ActionLabelTable {
    /// Table that clears the icon for every action, including search.
    pub fn standard() -> Self {
        Self {
            go: ActionLabel::new("Go", IconEffect::ClearWithPreview),
            next: ActionLabel::new("Next", IconEffect::ClearWithPreview),
            search: ActionLabel::new("Search", IconEffect::Clear),
            send: ActionLabel::new("Send", IconEffect::ClearWithPreview),
            enter: ActionLabel::new("Enter", IconEffect::Clear),
        }
    }

    /// Table that keeps a search icon on the action key.
    pub fn keep_search_icon() -> Self {
        Self {
            search: ActionLabel::new("Search", IconEffect::Keep),
            ..Self::standard()
        }
    }

    /// Resolves the label for an editor request.
    ///
    /// `suppress_enter` always wins and yields the enter label.
    pub fn label_for(&self, action: ImeAction, suppress_enter: bool) -> &ActionLabel {
        if suppress_enter {
            return &self.enter;
        }
        match action {
            ImeAction::Go => &self.go,
            ImeAction::Next => &self.next,
            ImeAction::Search => &self.search,
            ImeAction::Send => &self.send,
            ImeAction::Unspecified => &self.enter,
        }
    }
}

impl Default for ActionLabelTable {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIONS: [ImeAction; 5] = [
        ImeAction::Go,
        ImeAction::Next,
        ImeAction::Search,
        ImeAction::Send,
        ImeAction::Unspecified,
    ];

    fn enter_key() -> Key {
        Key {
            code: 10,
            icon: Some("sym_keyboard_return".to_string()),
            icon_preview: Some("sym_keyboard_feedback_return".to_string()),
            x: 80,
            width: 20,
            ..Key::default()
        }
    }

    /// Test 1: Every action maps to its own label
    #[test]
    fn test_action_labels() {
        let table = ActionLabelTable::standard();

        assert_eq!(table.label_for(ImeAction::Go, false).text, "Go");
        assert_eq!(table.label_for(ImeAction::Next, false).text, "Next");
        assert_eq!(table.label_for(ImeAction::Search, false).text, "Search");
        assert_eq!(table.label_for(ImeAction::Send, false).text, "Send");
        assert_eq!(table.label_for(ImeAction::Unspecified, false).text, "Enter");
    }

    /// Test 2: The suppress flag always yields "Enter"
    #[test]
    fn test_suppress_enter_wins() {
        for table in [ActionLabelTable::standard(), ActionLabelTable::keep_search_icon()] {
            for action in ACTIONS {
                assert_eq!(
                    table.label_for(action, true).text,
                    "Enter",
                    "{:?} with suppress flag should be Enter",
                    action
                );
            }
        }
    }

    /// Test 3: Labels always come from the five defined texts
    #[test]
    fn test_label_range() {
        let allowed = ["Go", "Next", "Search", "Send", "Enter"];
        let table = ActionLabelTable::default();
        for action in ACTIONS {
            for suppress in [false, true] {
                let text = table.label_for(action, suppress).text.as_str();
                assert!(allowed.contains(&text), "Unexpected label {}", text);
            }
        }
    }

    /// Test 4: Search icon treatment differs between tables
    #[test]
    fn test_search_icon_per_table() {
        let mut key = enter_key();
        ActionLabelTable::standard()
            .label_for(ImeAction::Search, false)
            .apply(&mut key);
        assert_eq!(key.icon, None);
        assert!(key.icon_preview.is_some(), "Search keeps the preview");

        let mut key = enter_key();
        let table = ActionLabelTable::keep_search_icon();
        let label = table.label_for(ImeAction::Search, false);
        assert!(!label.clears_icon());
        label.apply(&mut key);
        assert_eq!(key.icon.as_deref(), Some("sym_keyboard_return"));
        assert_eq!(key.label.as_deref(), Some("Search"));
    }

    /// Test 5: Go clears icon and preview but leaves geometry alone
    #[test]
    fn test_apply_go() {
        let mut key = enter_key();
        ActionLabelTable::standard()
            .label_for(ImeAction::Go, false)
            .apply(&mut key);

        assert_eq!(key.label.as_deref(), Some("Go"));
        assert_eq!(key.icon, None);
        assert_eq!(key.icon_preview, None);
        assert_eq!((key.x, key.width), (80, 20));
    }

    /// Test 6: Tables deserialize with snake_case icon effects
    #[test]
    fn test_table_deserialize() {
        let json = r#"{
            "go": {"text": "Go", "icon": "clear_with_preview"},
            "next": {"text": "Next", "icon": "clear_with_preview"},
            "search": {"text": "Search", "icon": "keep"},
            "send": {"text": "Send", "icon": "clear_with_preview"},
            "enter": {"text": "Enter", "icon": "clear"}
        }"#;

        let table: ActionLabelTable = serde_json::from_str(json).expect("Should parse table");
        assert_eq!(table, ActionLabelTable::keep_search_icon());
    }
}
