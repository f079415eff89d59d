// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # psync
//!
//! Open a few files side by side in an in memory host, replay a script of user actions
//! (scrolls, selections, jumps, copies, mode toggles, closing panes, waiting) against a
//! [`r3bl_pane_sync::SyncEngine`], and print where every pane ended up.
//!
//! ```text
//! psync left.md right.md --script session.jsonl --mode offset
//! ```
//!
//! The script has one JSON object per line. Blank lines and lines starting with `#` are
//! skipped. Pane indices are the positions of the files on the command line.
//!
//! ```text
//! # scroll the left pane, give the debounce a chance to fire, then copy
//! {"step":"scroll","pane":0,"top":40}
//! {"step":"wait_ms","ms":50}
//! {"step":"select","pane":0,"selections":[{"start":{"line":41,"character":0},"end":{"line":41,"character":8}}]}
//! {"step":"copy","pane":0,"scope":"corresponding_panes"}
//! ```
//!
//! The sync mode is persisted between runs, see [`config_folder`].

#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

/// Gate for the chatty `debug!` logs in the replayer.
pub const DEBUG_PSYNC_MOD: bool = true;

// Attach sources.
pub mod clap_config;
pub mod config_folder;
pub mod psync_error;
pub mod replay;
pub mod report_handler;
pub mod script;

// Re-export.
pub use clap_config::*;
pub use config_folder::*;
pub use psync_error::*;
pub use replay::*;
pub use report_handler::*;
pub use script::*;
