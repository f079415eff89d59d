// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{ClipboardResult, ClipboardService};

/// Keeps every payload written to it, oldest first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingClipboard {
    pub copies: Vec<String>,
}

impl RecordingClipboard {
    #[must_use]
    pub fn last_copy(&self) -> Option<&str> { self.copies.last().map(String::as_str) }
}

impl ClipboardService for RecordingClipboard {
    fn try_write_text(&mut self, text: &str) -> ClipboardResult<()> {
        self.copies.push(text.to_string());
        Ok(())
    }

    fn try_read_text(&mut self) -> ClipboardResult<String> {
        Ok(self.last_copy().unwrap_or_default().to_string())
    }
}

/// Fails every call, like a headless session without a clipboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableClipboard;

impl ClipboardService for UnavailableClipboard {
    fn try_write_text(&mut self, _text: &str) -> ClipboardResult<()> {
        Err("clipboard unavailable".into())
    }

    fn try_read_text(&mut self) -> ClipboardResult<String> {
        Err("clipboard unavailable".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recording_clipboard_reads_back_last_write() {
        let mut clipboard = RecordingClipboard::default();
        assert_eq!(clipboard.try_read_text().unwrap(), "");

        clipboard.try_write_text("first").unwrap();
        clipboard.try_write_text("second").unwrap();
        assert_eq!(clipboard.try_read_text().unwrap(), "second");
        assert_eq!(clipboard.copies, vec!["first", "second"]);
    }

    #[test]
    fn test_unavailable_clipboard_always_fails() {
        let mut clipboard = UnavailableClipboard;
        assert!(clipboard.try_write_text("x").is_err());
        assert!(clipboard.try_read_text().is_err());
    }
}
