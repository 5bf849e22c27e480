// SPDX-License-Identifier: GPL-3.0-only

//! Active layout selection and event dispatch.
//!
//! [`LayoutSelector`] owns the three keyboard states and decides which one
//! is current. The host feeds it [`KeyboardEvent`]s synchronously and
//! answers queries through [`InputHost`]; key presses that need the editor
//! to do something come back as [`HostAction`]s.
//!
//! ```text
//!              mode change                shift
//!   Primary <-------------> Symbols <-------------> SymbolsShifted
//!      ^                                                  |
//!      +------------------ mode change -------------------+
//! ```
//!
//! Finishing an input session always returns to `Primary`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

use crate::config::EngineConfig;
use crate::input::{EditorInfo, KeyCommand, ShiftController, ShiftPhase, character_text, parse_key_code};
use crate::keyboard::{KeyboardState, LayoutKind};
use crate::layout::{LayoutDefinition, ParseError, parse_layout_file};

// ============================================================================
// Host Interface
// ============================================================================

/// Queries the engine makes of its host.
pub trait InputHost {
    /// Whether another input method is available to switch to.
    fn should_offer_input_method_switch(&self) -> bool;

    /// The editor's caps mode at the cursor.
    ///
    /// Return `Some(0)` for an editor that is not a text field and `None`
    /// when no editor connection is available, which skips the refresh.
    fn cursor_caps_mode(&self, editor: &EditorInfo) -> Option<u32>;
}

/// Events the host delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KeyboardEvent {
    /// An editor gained focus
    StartInput { editor: EditorInfo },
    /// The keyboard view is about to be shown for the current editor
    StartInputView,
    /// The editor lost focus
    FinishInput,
    /// A key was pressed
    Key { code: i32 },
}

/// Work the host must perform on the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostAction {
    /// Insert text at the cursor
    CommitText { text: String },
    /// Send an enter key down/up pair
    SendEnter,
    /// Send a delete key down/up pair
    DeleteBackward,
    /// Switch to the next input method
    SwitchInputMethod,
}

// ============================================================================
// Layout Set
// ============================================================================

/// The three layout definitions the selector switches between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSet {
    pub primary: LayoutDefinition,
    pub symbols: LayoutDefinition,
    pub symbols_shifted: LayoutDefinition,
}

impl LayoutSet {
    /// File names looked up by [`LayoutSet::load_dir`].
    pub const FILE_NAMES: [&'static str; 3] = ["qwerty.json", "symbols.json", "symbols_shift.json"];

    /// Loads three layout files, logging their warnings.
    pub fn load(primary: &str, symbols: &str, symbols_shifted: &str) -> Result<Self, ParseError> {
        Ok(Self {
            primary: load_logged(primary)?,
            symbols: load_logged(symbols)?,
            symbols_shifted: load_logged(symbols_shifted)?,
        })
    }

    /// Loads `qwerty.json`, `symbols.json` and `symbols_shift.json` from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, ParseError> {
        let [primary, symbols, symbols_shifted] =
            Self::FILE_NAMES.map(|name| dir.join(name).to_string_lossy().into_owned());
        Self::load(&primary, &symbols, &symbols_shifted)
    }
}

fn load_logged(path: &str) -> Result<LayoutDefinition, ParseError> {
    let result = parse_layout_file(path)?;
    for warning in &result.warnings {
        tracing::warn!("{}: {}", path, warning);
    }
    Ok(result.into_layout())
}

// ============================================================================
// Layout Selector
// ============================================================================

/// Chooses the active keyboard and applies shift, mode and session events.
#[derive(Debug, Clone)]
pub struct LayoutSelector {
    primary: KeyboardState,
    symbols: KeyboardState,
    symbols_shifted: KeyboardState,
    current: LayoutKind,
    shift: ShiftController,
    /// Editor of the running input session
    editor: Option<EditorInfo>,
    /// Display width the layouts were last loaded for
    display_width: Option<u32>,
    config: EngineConfig,
}

impl LayoutSelector {
    /// Creates a selector on the primary layout.
    pub fn new(layouts: LayoutSet, config: EngineConfig) -> Self {
        Self {
            primary: config.keyboard(LayoutKind::Primary, layouts.primary),
            symbols: config.keyboard(LayoutKind::Symbols, layouts.symbols),
            symbols_shifted: config.keyboard(LayoutKind::SymbolsShifted, layouts.symbols_shifted),
            current: LayoutKind::Primary,
            shift: ShiftController::with_window(config.double_tap_window()),
            editor: None,
            display_width: None,
            config,
        }
    }

    /// The engine config.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Which layout is active.
    pub fn current_kind(&self) -> LayoutKind {
        self.current
    }

    /// The active keyboard.
    pub fn current(&self) -> &KeyboardState {
        self.keyboard(self.current)
    }

    /// The keyboard for `kind`.
    pub fn keyboard(&self, kind: LayoutKind) -> &KeyboardState {
        match kind {
            LayoutKind::Primary => &self.primary,
            LayoutKind::Symbols => &self.symbols,
            LayoutKind::SymbolsShifted => &self.symbols_shifted,
        }
    }

    fn keyboard_mut(&mut self, kind: LayoutKind) -> &mut KeyboardState {
        match kind {
            LayoutKind::Primary => &mut self.primary,
            LayoutKind::Symbols => &mut self.symbols,
            LayoutKind::SymbolsShifted => &mut self.symbols_shifted,
        }
    }

    /// Caps lock of the alphabetic layout.
    pub fn is_caps_lock(&self) -> bool {
        self.shift.is_caps_lock()
    }

    /// Shift phase of the alphabetic layout.
    pub fn shift_phase(&self) -> ShiftPhase {
        self.shift.phase(self.primary.is_shifted())
    }

    /// Editor of the running input session, if any.
    pub fn editor(&self) -> Option<&EditorInfo> {
        self.editor.as_ref()
    }

    // ========================================================================
    // Event Dispatch
    // ========================================================================

    /// Applies an event, timing shift taps with the monotonic clock.
    pub fn dispatch(&mut self, event: KeyboardEvent, host: &impl InputHost) -> Option<HostAction> {
        self.dispatch_at(event, Instant::now(), host)
    }

    /// Applies an event that happened at `now`.
    pub fn dispatch_at(
        &mut self,
        event: KeyboardEvent,
        now: Instant,
        host: &impl InputHost,
    ) -> Option<HostAction> {
        match event {
            KeyboardEvent::StartInput { editor } => {
                self.start_input(editor, host);
                None
            }
            KeyboardEvent::StartInputView => {
                self.start_input_view(host);
                None
            }
            KeyboardEvent::FinishInput => {
                self.finish_input(host);
                None
            }
            KeyboardEvent::Key { code } => self.press_key_at(code, now, host),
        }
    }

    /// Starts an input session for `editor`.
    ///
    /// Numeric, phone and date fields open the symbols layout; everything
    /// else opens the alphabetic layout with its shift state refreshed from
    /// the editor. The new layout's action key is relabelled either way.
    pub fn start_input(&mut self, editor: EditorInfo, host: &impl InputHost) {
        let category = editor.category();
        tracing::info!("Input session started ({:?})", category);
        self.editor = Some(editor);

        let target = if category.prefers_symbols() {
            LayoutKind::Symbols
        } else {
            LayoutKind::Primary
        };
        self.switch_to(target, host);
        if target == LayoutKind::Primary {
            self.refresh_shift(host);
        }

        let options = editor.ime_options;
        self.keyboard_mut(target)
            .set_ime_action_label(options.action(), options.no_enter_action());
    }

    /// Re-applies the current layout before the view is shown.
    pub fn start_input_view(&mut self, host: &impl InputHost) {
        self.switch_to(self.current, host);
    }

    /// Ends the input session and returns to the alphabetic layout.
    pub fn finish_input(&mut self, host: &impl InputHost) {
        tracing::info!("Input session finished");
        self.editor = None;
        self.switch_to(LayoutKind::Primary, host);
    }

    /// Handles the mode change key.
    pub fn press_mode_change(&mut self, host: &impl InputHost) {
        if self.current.is_symbols() {
            self.switch_to(LayoutKind::Primary, host);
        } else {
            self.switch_to(LayoutKind::Symbols, host);
            self.symbols.set_shifted(false);
        }
    }

    /// Handles the shift key pressed at `now`.
    ///
    /// On the symbol layouts shift swaps between the two symbol keyboards
    /// and never touches caps lock.
    pub fn press_shift_at(&mut self, now: Instant, host: &impl InputHost) {
        match self.current {
            LayoutKind::Primary => {
                let shifted = self.shift.on_shift_press(now, self.primary.is_shifted());
                self.primary.set_shifted(shifted);
            }
            LayoutKind::Symbols => {
                self.symbols.set_shifted(true);
                self.switch_to(LayoutKind::SymbolsShifted, host);
                self.symbols_shifted.set_shifted(true);
            }
            LayoutKind::SymbolsShifted => {
                self.symbols_shifted.set_shifted(false);
                self.switch_to(LayoutKind::Symbols, host);
                self.symbols.set_shifted(false);
            }
        }
    }

    /// Handles any key pressed at `now`.
    pub fn press_key_at(&mut self, code: i32, now: Instant, host: &impl InputHost) -> Option<HostAction> {
        match parse_key_code(code) {
            KeyCommand::Done => Some(HostAction::SendEnter),
            KeyCommand::Delete => {
                self.refresh_shift(host);
                Some(HostAction::DeleteBackward)
            }
            KeyCommand::Shift => {
                self.press_shift_at(now, host);
                None
            }
            KeyCommand::LanguageSwitch => Some(HostAction::SwitchInputMethod),
            KeyCommand::ModeChange => {
                self.press_mode_change(host);
                None
            }
            KeyCommand::Character(c) => {
                let text = character_text(c, self.current().is_shifted());
                self.refresh_shift(host);
                Some(HostAction::CommitText { text })
            }
            KeyCommand::Ignored(code) => {
                tracing::debug!("Ignoring key code {}", code);
                None
            }
        }
    }

    /// Recomputes the alphabetic layout's shifted flag from the editor.
    ///
    /// Skipped unless the alphabetic layout is active, a session is running
    /// and the host can report a caps mode.
    pub fn refresh_shift(&mut self, host: &impl InputHost) {
        if self.current != LayoutKind::Primary {
            return;
        }
        let Some(editor) = self.editor else {
            return;
        };
        let Some(caps_mode) = host.cursor_caps_mode(&editor) else {
            return;
        };
        let shifted = self.shift.refresh(caps_mode);
        self.primary.set_shifted(shifted);
    }

    /// Makes `kind` current and re-applies its optional key visibility.
    fn switch_to(&mut self, kind: LayoutKind, host: &impl InputHost) {
        let offer_switch = host.should_offer_input_method_switch();
        self.keyboard_mut(kind).set_optional_key_visible(offer_switch);
        if self.current != kind {
            tracing::debug!("Layout {} -> {}", self.current, kind);
        }
        self.current = kind;
    }

    // ========================================================================
    // Interface Re-initialisation
    // ========================================================================

    /// Rebuilds the keyboards when the display width changed.
    ///
    /// `load` is only called when a rebuild is needed. Caps lock and the
    /// current layout kind survive the rebuild, and a locked alphabetic
    /// layout comes back shifted. Other shifted flags and labels start fresh.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the keyboards were rebuilt.
    pub fn reload_layouts<F>(&mut self, display_width: u32, load: F) -> Result<bool, ParseError>
    where
        F: FnOnce() -> Result<LayoutSet, ParseError>,
    {
        if self.display_width == Some(display_width) {
            return Ok(false);
        }

        let layouts = load()?;
        self.primary = self.config.keyboard(LayoutKind::Primary, layouts.primary);
        self.symbols = self.config.keyboard(LayoutKind::Symbols, layouts.symbols);
        self.symbols_shifted = self
            .config
            .keyboard(LayoutKind::SymbolsShifted, layouts.symbols_shifted);
        self.display_width = Some(display_width);

        if self.shift.is_caps_lock() {
            let shifted = self.shift.refresh(0);
            self.primary.set_shifted(shifted);
        }

        tracing::info!("Rebuilt keyboards for display width {}", display_width);
        Ok(true)
    }
}

// ============================================================================
// Tests
// ============================================================================
