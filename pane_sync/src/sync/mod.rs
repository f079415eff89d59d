// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Gate for the chatty `debug!` logs in the engine handlers.
pub const DEBUG_PANE_SYNC: bool = true;

// Attach sources.
pub mod clipboard;
pub mod echo_suppression_queue;
pub mod offset_table;
pub mod pane;
pub mod position_mapper;
pub mod sync_engine;
pub mod sync_mode;
pub mod test_fixtures;

// Re-export.
pub use clipboard::*;
pub use echo_suppression_queue::*;
pub use offset_table::*;
pub use pane::*;
pub use position_mapper::*;
pub use sync_engine::*;
pub use sync_mode::*;
pub use test_fixtures::*;
