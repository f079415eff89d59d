// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{ClipboardResult, ClipboardService};
use crate::DEBUG_PANE_SYNC;
use copypasta_ext::{copypasta::ClipboardProvider, x11_fork::ClipboardContext};

/// The desktop clipboard. The X11 fork context keeps copied text alive after `psync`
/// exits. It is opened on first use, so constructing this never fails.
#[derive(Default)]
pub struct SystemClipboard {
    maybe_context: Option<ClipboardContext>,
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("is_open", &self.maybe_context.is_some())
            .finish()
    }
}

impl SystemClipboard {
    fn try_context(&mut self) -> ClipboardResult<&mut ClipboardContext> {
        if self.maybe_context.is_none() {
            self.maybe_context = Some(ClipboardContext::new()?);
        }
        self.maybe_context
            .as_mut()
            .ok_or_else(|| "clipboard context was not opened".into())
    }
}

impl ClipboardService for SystemClipboard {
    fn try_write_text(&mut self, text: &str) -> ClipboardResult<()> {
        self.try_context()?.set_contents(text.to_string())?;

        DEBUG_PANE_SYNC.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "📋 Wrote to system clipboard",
                byte_count = %text.len(),
            );
        });

        Ok(())
    }

    fn try_read_text(&mut self) -> ClipboardResult<String> {
        self.try_context()?.get_contents()
    }
}
