// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::PaneSyncErrorCouldNot;
use miette::{Context, IntoDiagnostic};
use r3bl_pane_sync::{CopyScope, Range};
use serde::{Deserialize, Serialize};

/// Lines starting with this are skipped, as are blank lines.
pub const SCRIPT_COMMENT_PREFIX: &str = "#";

/// One user action. `pane` is the index of the file on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Scroll so that `top` is the first visible line.
    Scroll { pane: usize, top: usize },
    Select { pane: usize, selections: Vec<Range> },
    ToggleMode,
    Jump { pane: usize },
    Copy { pane: usize, scope: CopyScope },
    ClosePane { pane: usize },
    /// Let time pass, so a pending debounce deadline can elapse.
    WaitMs { ms: u64 },
}

/// # Errors
///
/// Returns an error naming the first line that isn't a valid [`ScriptStep`].
pub fn try_parse_script(text: &str) -> miette::Result<Vec<ScriptStep>> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with(SCRIPT_COMMENT_PREFIX))
        .map(|(line_number, line)| {
            serde_json::from_str::<ScriptStep>(line)
                .into_diagnostic()
                .wrap_err(PaneSyncErrorCouldNot::ParseScriptStep {
                    line_number,
                    line: line.to_string(),
                })
        })
        .collect()
}

/// # Errors
///
/// Returns an error if the file can't be read, or doesn't parse.
pub fn try_read_script(script_path: &str) -> miette::Result<Vec<ScriptStep>> {
    let text = std::fs::read_to_string(script_path)
        .into_diagnostic()
        .wrap_err(PaneSyncErrorCouldNot::ReadScript {
            script_path: script_path.to_string(),
        })?;
    try_parse_script(&text)
}
