// SPDX-License-Identifier: GPL-3.0-only

//! tinyboard replay host
//!
//! Drives the keyboard engine from a JSON script instead of a real editor.
//! The script names the layout directory and an optional engine config, says
//! how the host answers the engine's queries, and lists the events to
//! deliver. The host actions produced and the final view are printed to
//! stdout as JSON; logs go to stderr.
//!
//! ```json
//! {
//!   "layout_dir": "../layouts",
//!   "alternate_input_method": false,
//!   "caps_mode": 0,
//!   "steps": [
//!     {"event": {"type": "start_input", "editor": {"input_type": 1, "ime_options": 2}}},
//!     {"at_ms": 100, "event": {"type": "key", "code": -1}},
//!     {"at_ms": 250, "event": {"type": "key", "code": 104}}
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use tinyboard::app_settings::DEFAULT_LOG_DIRECTIVE;
use tinyboard::config::EngineConfig;
use tinyboard::input::EditorInfo;
use tinyboard::layout::ParseError;
use tinyboard::selector::{HostAction, InputHost, KeyboardEvent, LayoutSelector, LayoutSet};
use tinyboard::view::KeyboardView;

fn default_layout_dir() -> PathBuf {
    PathBuf::from("resources/layouts")
}

fn default_caps_mode() -> Option<u32> {
    Some(0)
}

/// A replay script.
#[derive(Debug, Deserialize)]
struct Script {
    /// Directory holding the three layout files, relative to the script
    #[serde(default = "default_layout_dir")]
    layout_dir: PathBuf,

    /// Engine config file, relative to the script
    #[serde(default)]
    config: Option<PathBuf>,

    /// Answer to "is another input method available"
    #[serde(default)]
    alternate_input_method: bool,

    /// Cursor caps mode reported for every editor; `null` means no editor
    /// connection
    #[serde(default = "default_caps_mode")]
    caps_mode: Option<u32>,

    #[serde(default)]
    steps: Vec<Step>,
}

/// One scripted event.
#[derive(Debug, Deserialize)]
struct Step {
    /// Milliseconds since the start of the replay; the previous step's time
    /// when absent
    #[serde(default)]
    at_ms: Option<u64>,
    event: KeyboardEvent,
}

/// Host answering the engine's queries from the script.
struct ScriptHost {
    alternate_input_method: bool,
    caps_mode: Option<u32>,
}

impl InputHost for ScriptHost {
    fn should_offer_input_method_switch(&self) -> bool {
        self.alternate_input_method
    }

    fn cursor_caps_mode(&self, _editor: &EditorInfo) -> Option<u32> {
        self.caps_mode
    }
}

#[derive(Debug, Serialize)]
struct ReplayOutput {
    actions: Vec<HostAction>,
    view: KeyboardView,
}

fn main() -> ExitCode {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = DEFAULT_LOG_DIRECTIVE.parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(script_path) = env::args().nth(1) else {
        eprintln!("usage: tinyboard-replay <script.json>");
        return ExitCode::from(2);
    };

    match replay(Path::new(&script_path)) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs a script and renders its output as pretty JSON.
fn replay(script_path: &Path) -> Result<String, ParseError> {
    let path_str = script_path.to_string_lossy();
    let json = fs::read_to_string(script_path)
        .map_err(|e| ParseError::io_error_with_path(e, &*path_str))?;
    let script: Script =
        serde_json::from_str(&json).map_err(|e| ParseError::json_error_with_path(e, &*path_str))?;

    let base = script_path.parent().unwrap_or_else(|| Path::new("."));
    let layouts = LayoutSet::load_dir(&base.join(&script.layout_dir))?;
    let config = match &script.config {
        Some(config_path) => EngineConfig::load(&base.join(config_path).to_string_lossy())?,
        None => EngineConfig::default(),
    };
    let insets = config.insets;

    let host = ScriptHost {
        alternate_input_method: script.alternate_input_method,
        caps_mode: script.caps_mode,
    };
    let mut selector = LayoutSelector::new(layouts, config);

    let start = Instant::now();
    let mut now = start;
    let mut actions = Vec::new();
    for step in script.steps {
        if let Some(at_ms) = step.at_ms {
            now = start + Duration::from_millis(at_ms);
        }
        if let Some(action) = selector.dispatch_at(step.event, now, &host) {
            tracing::info!("Host action: {:?}", action);
            actions.push(action);
        }
    }

    let output = ReplayOutput {
        actions,
        view: KeyboardView::capture(&selector, &insets),
    };
    serde_json::to_string_pretty(&output).map_err(ParseError::json_error)
}
