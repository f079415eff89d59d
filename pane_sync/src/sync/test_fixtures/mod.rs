// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod in_memory_pane_host;

// Re-export.
pub use in_memory_pane_host::*;
