// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::SyncMode;
use std::time::Duration;

/// How long the scroll synchronizer waits after the last viewport event of a burst
/// before it mirrors the driver into the other panes.
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(10);

/// Knobs for a [`crate::SyncEngine`].
///
/// - `debounce_delay`: see [`DEFAULT_DEBOUNCE_DELAY`].
/// - `default_mode`: used when the [`crate::ModeStore`] has nothing saved yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    pub debounce_delay: Duration,
    pub default_mode: SyncMode,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_delay: DEFAULT_DEBOUNCE_DELAY,
            default_mode: SyncMode::Normal,
        }
    }
}

impl SyncConfig {
    #[must_use]
    pub fn with_debounce_delay(mut self, debounce_delay: Duration) -> Self {
        self.debounce_delay = debounce_delay;
        self
    }

    #[must_use]
    pub fn with_default_mode(mut self, default_mode: SyncMode) -> Self {
        self.default_mode = default_mode;
        self
    }
}
