// SPDX-License-Identifier: GPL-3.0-only

//! Input handling for tinyboard.
//!
//! This module turns what the host delivers into things the engine can act
//! on:
//!
//! - **Key codes**: classify a pressed key as a command or a character
//! - **Editor info**: decode the focused field's input type and IME options
//! - **Shift state**: caps lock double tap timing for the alphabetic layout
//!
//! # Example
//!
//! ```rust,ignore
//! use tinyboard::input::{parse_key_code, EditorInfo, ImeOptions, KeyCommand};
//!
//! assert_eq!(parse_key_code(-1), KeyCommand::Shift);
//!
//! let editor = EditorInfo::new(2, ImeOptions(5));
//! assert!(editor.category().prefers_symbols());
//! ```

pub mod editor;
pub mod keycode;
pub mod shift;

// Re-export public API
pub use editor::{EditorInfo, ImeOptions, InputCategory};
pub use keycode::{KeyCommand, character_text, parse_key_code};
pub use shift::{ShiftController, ShiftPhase};
