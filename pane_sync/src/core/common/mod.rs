// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod debounce_timer;
pub mod temp_dir;

// Re-export.
pub use debounce_timer::*;
pub use temp_dir::*;
