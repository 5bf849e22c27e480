// SPDX-License-Identifier: GPL-3.0-only

//! tinyboard - Layout and shift state engine for a compact on-screen keyboard
//!
//! The engine keeps three keyboards (alphabetic, symbols, shifted symbols)
//! and decides which one is shown, how the shift key behaves, what the
//! action key says and whether the input method switch key is offered. It
//! has no UI of its own: a host feeds it events and draws the
//! [`view::KeyboardView`] it exposes.
//!
//! # Architecture
//!
//! ```text
//!   layout JSON --> layout::parse_layout_file --> LayoutDefinition
//!                                                       |
//!   EngineConfig (hide policy, labels) ------------> KeyboardState x3
//!                                                       |
//!   host --KeyboardEvent--> selector::LayoutSelector <--+
//!        <--HostAction----        |
//!                                 +--> view::KeyboardView
//! ```
//!
//! # Modules
//!
//! - `app_settings`: Centralized constants (key codes, editor bit masks)
//! - `config`: Engine configuration loaded from JSON
//! - `input`: Key code classification, editor info decoding, shift timing
//! - `keyboard`: Keyboard instances and action key labelling
//! - `layout`: Layout file parsing and validation
//! - `selector`: Active layout selection and event dispatch
//! - `view`: Snapshot of what the view layer draws

pub mod app_settings;
pub mod config;
pub mod input;
pub mod keyboard;
pub mod layout;
pub mod selector;
pub mod view;

// ============================================================================
// Integration Tests
// ============================================================================
