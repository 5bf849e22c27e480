// SPDX-License-Identifier: GPL-3.0-only

//! Key code classification.
//!
//! Layouts identify keys by integer codes. Negative codes are commands
//! (shift, mode change, delete...), non-negative codes are Unicode scalar
//! values to commit as text.

use crate::app_settings::{
    KEYCODE_DELETE, KEYCODE_DONE, KEYCODE_LANGUAGE_SWITCH, KEYCODE_MODE_CHANGE, KEYCODE_SHIFT,
};

/// What a pressed key asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    /// Send an enter key event to the editor
    Done,
    /// Delete backwards
    Delete,
    /// Shift handling
    Shift,
    /// Switch to the next input method
    LanguageSwitch,
    /// Toggle between alphabetic and symbol layouts
    ModeChange,
    /// Commit a character
    Character(char),
    /// A command code this engine has no behavior for, or a code that is not
    /// a Unicode scalar value
    Ignored(i32),
}

/// Classifies a key code.
pub fn parse_key_code(code: i32) -> KeyCommand {
    match code {
        KEYCODE_DONE => KeyCommand::Done,
        KEYCODE_DELETE => KeyCommand::Delete,
        KEYCODE_SHIFT => KeyCommand::Shift,
        KEYCODE_LANGUAGE_SWITCH => KeyCommand::LanguageSwitch,
        KEYCODE_MODE_CHANGE => KeyCommand::ModeChange,
        other => u32::try_from(other)
            .ok()
            .and_then(char::from_u32)
            .map_or(KeyCommand::Ignored(other), KeyCommand::Character),
    }
}

/// Text committed for a character key, upper-cased when shifted.
pub fn character_text(c: char, shifted: bool) -> String {
    if shifted {
        c.to_uppercase().collect()
    } else {
        c.to_string()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_settings::{KEYCODE_ALT, KEYCODE_CANCEL, KEYCODE_ENTER};

    /// Test 1: Command codes
    #[test]
    fn test_command_codes() {
        assert_eq!(parse_key_code(KEYCODE_DONE), KeyCommand::Done);
        assert_eq!(parse_key_code(KEYCODE_DELETE), KeyCommand::Delete);
        assert_eq!(parse_key_code(KEYCODE_SHIFT), KeyCommand::Shift);
        assert_eq!(parse_key_code(KEYCODE_LANGUAGE_SWITCH), KeyCommand::LanguageSwitch);
        assert_eq!(parse_key_code(KEYCODE_MODE_CHANGE), KeyCommand::ModeChange);
    }

    /// Test 2: Character codes, including the enter key's line feed
    #[test]
    fn test_character_codes() {
        assert_eq!(parse_key_code(97), KeyCommand::Character('a'));
        assert_eq!(parse_key_code(0x20AC), KeyCommand::Character('€'));
        assert_eq!(parse_key_code(KEYCODE_ENTER), KeyCommand::Character('\n'));
    }

    /// Test 3: Codes without behavior are ignored
    #[test]
    fn test_ignored_codes() {
        assert_eq!(parse_key_code(KEYCODE_CANCEL), KeyCommand::Ignored(KEYCODE_CANCEL));
        assert_eq!(parse_key_code(KEYCODE_ALT), KeyCommand::Ignored(KEYCODE_ALT));
        // Surrogates are not scalar values
        assert_eq!(parse_key_code(0xD800), KeyCommand::Ignored(0xD800));
        assert_eq!(parse_key_code(0x11_0000), KeyCommand::Ignored(0x11_0000));
    }

    /// Test 4: Shifted characters are upper-cased
    #[test]
    fn test_character_text() {
        assert_eq!(character_text('q', false), "q");
        assert_eq!(character_text('q', true), "Q");
        assert_eq!(character_text('1', true), "1");
        assert_eq!(character_text('ß', true), "SS");
    }
}
