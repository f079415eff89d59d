// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod commands;
pub mod event_loop;
pub mod pane_set_monitor;
pub mod scroll_synchronizer;
pub mod selection_mirror;
pub mod sync_config;
pub mod sync_engine_struct;
pub mod sync_event;

// Re-export.
pub use event_loop::*;
pub use sync_config::*;
pub use sync_engine_struct::*;
pub use sync_event::*;
