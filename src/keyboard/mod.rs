// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard instances and action key labelling.
//!
//! - `state`: [`KeyboardState`], one layout plus its runtime key state
//! - `action`: [`ActionLabelTable`], the editor action to label mapping

pub mod action;
pub mod state;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use action::{ActionLabel, ActionLabelTable, IconEffect, ImeAction};
pub use state::{HidePolicy, KeyboardState, OptionalKeySnapshot};

/// The three layouts the engine switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Alphabetic layout, the only one with caps lock
    Primary,
    /// Digits and common punctuation
    Symbols,
    /// Less common symbols, reached with shift from `Symbols`
    SymbolsShifted,
}

impl LayoutKind {
    /// All kinds in switching order.
    pub const ALL: [LayoutKind; 3] = [
        LayoutKind::Primary,
        LayoutKind::Symbols,
        LayoutKind::SymbolsShifted,
    ];

    /// Returns `true` for either symbol layout.
    pub fn is_symbols(self) -> bool {
        matches!(self, LayoutKind::Symbols | LayoutKind::SymbolsShifted)
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutKind::Primary => "primary",
            LayoutKind::Symbols => "symbols",
            LayoutKind::SymbolsShifted => "symbols_shifted",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_kind_symbols() {
        assert!(!LayoutKind::Primary.is_symbols());
        assert!(LayoutKind::Symbols.is_symbols());
        assert!(LayoutKind::SymbolsShifted.is_symbols());
    }

    #[test]
    fn test_layout_kind_serde_matches_display() {
        for kind in LayoutKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }
}
