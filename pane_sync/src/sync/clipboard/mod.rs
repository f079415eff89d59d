// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod clipboard_service;
pub mod clipboard_test_fixtures;
pub mod system_clipboard;

// Re-export.
pub use clipboard_service::*;
pub use clipboard_test_fixtures::*;
pub use system_clipboard::*;
