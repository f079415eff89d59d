// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::error::Error;

pub type ClipboardResult<T> = Result<T, Box<dyn Error + Send + Sync + 'static>>;

/// Where `copy_selections` puts its payload. Injected into the engine so tests can
/// record copies instead of touching the desktop clipboard.
pub trait ClipboardService {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard can't be reached.
    fn try_write_text(&mut self, text: &str) -> ClipboardResult<()>;

    /// # Errors
    ///
    /// Returns an error if the clipboard can't be reached.
    fn try_read_text(&mut self) -> ClipboardResult<String>;
}

/// Separator between fragments when several selections are copied as one payload.
pub const CLIPBOARD_FRAGMENT_SEPARATOR: &str = "\n";
