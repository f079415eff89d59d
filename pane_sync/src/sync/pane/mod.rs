// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod pane_document;
pub mod pane_host;
pub mod pane_info;

// Re-export.
pub use pane_document::*;
pub use pane_host::*;
pub use pane_info::*;
