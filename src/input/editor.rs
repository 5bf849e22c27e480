// SPDX-License-Identifier: GPL-3.0-only

//! Editor metadata delivered by the host when an input session starts.

use serde::{Deserialize, Serialize};

use crate::app_settings::{
    IME_ACTION_GO, IME_ACTION_NEXT, IME_ACTION_SEARCH, IME_ACTION_SEND, IME_FLAG_NO_ENTER_ACTION,
    IME_MASK_ACTION, INPUT_TYPE_CLASS_DATETIME, INPUT_TYPE_CLASS_NUMBER, INPUT_TYPE_CLASS_PHONE,
    INPUT_TYPE_CLASS_TEXT, INPUT_TYPE_MASK_CLASS, INPUT_TYPE_NULL,
};
use crate::keyboard::ImeAction;

/// Classification of the field being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCategory {
    /// Not a text field
    Null,
    /// Free text
    Text,
    /// Numbers
    Number,
    /// Phone numbers
    Phone,
    /// Dates and times
    DateTime,
    /// A class this engine does not know
    Other(u32),
}

impl InputCategory {
    /// Classifies a raw editor input type by its class bits.
    pub fn from_input_type(input_type: u32) -> Self {
        match input_type & INPUT_TYPE_MASK_CLASS {
            INPUT_TYPE_NULL => InputCategory::Null,
            INPUT_TYPE_CLASS_TEXT => InputCategory::Text,
            INPUT_TYPE_CLASS_NUMBER => InputCategory::Number,
            INPUT_TYPE_CLASS_PHONE => InputCategory::Phone,
            INPUT_TYPE_CLASS_DATETIME => InputCategory::DateTime,
            other => InputCategory::Other(other),
        }
    }

    /// Numeric-like fields start on the symbols layout.
    pub fn prefers_symbols(self) -> bool {
        matches!(
            self,
            InputCategory::Number | InputCategory::Phone | InputCategory::DateTime
        )
    }
}

/// Raw IME option bits of an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImeOptions(pub u32);

impl ImeOptions {
    /// Builds options for an action with the no-enter flag set or cleared.
    pub fn new(action: ImeAction, no_enter_action: bool) -> Self {
        let action_bits = match action {
            ImeAction::Go => IME_ACTION_GO,
            ImeAction::Next => IME_ACTION_NEXT,
            ImeAction::Search => IME_ACTION_SEARCH,
            ImeAction::Send => IME_ACTION_SEND,
            ImeAction::Unspecified => 0,
        };
        let flag = if no_enter_action { IME_FLAG_NO_ENTER_ACTION } else { 0 };
        Self(action_bits | flag)
    }

    /// The requested action.
    pub fn action(self) -> ImeAction {
        match self.0 & IME_MASK_ACTION {
            IME_ACTION_GO => ImeAction::Go,
            IME_ACTION_NEXT => ImeAction::Next,
            IME_ACTION_SEARCH => ImeAction::Search,
            IME_ACTION_SEND => ImeAction::Send,
            _ => ImeAction::Unspecified,
        }
    }

    /// Whether the editor asked not to bind its action to the enter key.
    pub fn no_enter_action(self) -> bool {
        self.0 & IME_FLAG_NO_ENTER_ACTION != 0
    }
}

/// What the host knows about the field that gained focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditorInfo {
    /// Raw input type bits
    #[serde(default)]
    pub input_type: u32,
    /// Raw IME option bits
    #[serde(default)]
    pub ime_options: ImeOptions,
}

impl EditorInfo {
    /// Creates editor info from raw bits.
    pub fn new(input_type: u32, ime_options: ImeOptions) -> Self {
        Self {
            input_type,
            ime_options,
        }
    }

    /// A plain text field with the given IME options.
    pub fn text(ime_options: ImeOptions) -> Self {
        Self::new(INPUT_TYPE_CLASS_TEXT, ime_options)
    }

    /// A numeric field with the given IME options.
    pub fn number(ime_options: ImeOptions) -> Self {
        Self::new(INPUT_TYPE_CLASS_NUMBER, ime_options)
    }

    /// The field's category.
    pub fn category(&self) -> InputCategory {
        InputCategory::from_input_type(self.input_type)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test 1: Input class is taken from the low bits only
    #[test]
    fn test_category_uses_class_mask() {
        // Text class with a variation and flags set in the high bits
        assert_eq!(InputCategory::from_input_type(0x0002_0081), InputCategory::Text);
        assert_eq!(InputCategory::from_input_type(0x0000_1002), InputCategory::Number);
        assert_eq!(InputCategory::from_input_type(3), InputCategory::Phone);
        assert_eq!(InputCategory::from_input_type(0x14), InputCategory::DateTime);
        assert_eq!(InputCategory::from_input_type(0), InputCategory::Null);
        assert_eq!(InputCategory::from_input_type(9), InputCategory::Other(9));
    }

    /// Test 2: Only numeric-like categories prefer symbols
    #[test]
    fn test_prefers_symbols() {
        assert!(InputCategory::Number.prefers_symbols());
        assert!(InputCategory::Phone.prefers_symbols());
        assert!(InputCategory::DateTime.prefers_symbols());
        assert!(!InputCategory::Text.prefers_symbols());
        assert!(!InputCategory::Null.prefers_symbols());
        assert!(!InputCategory::Other(7).prefers_symbols());
    }

    /// Test 3: IME options decode action and flag independently
    #[test]
    fn test_ime_options_decode() {
        let options = ImeOptions(IME_ACTION_SEARCH | IME_FLAG_NO_ENTER_ACTION);
        assert_eq!(options.action(), ImeAction::Search);
        assert!(options.no_enter_action());

        // Done (6) and Previous (7) have no dedicated label
        assert_eq!(ImeOptions(6).action(), ImeAction::Unspecified);
        assert_eq!(ImeOptions(7).action(), ImeAction::Unspecified);
        assert!(!ImeOptions(IME_ACTION_GO).no_enter_action());
    }

    /// Test 4: Building options round-trips through decoding
    #[test]
    fn test_ime_options_new() {
        for action in [
            ImeAction::Go,
            ImeAction::Next,
            ImeAction::Search,
            ImeAction::Send,
            ImeAction::Unspecified,
        ] {
            let options = ImeOptions::new(action, true);
            assert_eq!(options.action(), action);
            assert!(options.no_enter_action());
        }
    }

    /// Test 5: Editor info deserializes with defaults
    #[test]
    fn test_editor_info_deserialize() {
        let info: EditorInfo = serde_json::from_str(r#"{"input_type": 2, "ime_options": 5}"#)
            .expect("Should parse editor info");
        assert_eq!(info.category(), InputCategory::Number);
        assert_eq!(info.ime_options.action(), ImeAction::Next);

        let empty: EditorInfo = serde_json::from_str("{}").expect("Should parse empty info");
        assert_eq!(empty, EditorInfo::default());
    }
}
