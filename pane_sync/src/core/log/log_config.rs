// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;
use tracing_core::LevelFilter;

pub const DEFAULT_LOG_FILE_NAME: &str = "pane_sync.log";

/// Where log lines go. The sync engine only ever emits through [tracing] macros, so
/// this is purely a concern of whoever hosts it (eg: the `psync` binary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Off,
    Stderr,
    /// Appends to this file. Parent folders must already exist.
    File(PathBuf),
    StderrAndFile(PathBuf),
}

impl LogSink {
    #[must_use]
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            LogSink::File(path) | LogSink::StderrAndFile(path) => Some(path),
            LogSink::Off | LogSink::Stderr => None,
        }
    }

    #[must_use]
    pub fn writes_to_stderr(&self) -> bool {
        matches!(self, LogSink::Stderr | LogSink::StderrAndFile(_))
    }
}

/// Builder for the subscriber installed by [`crate::try_init_global_logging()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub sink: LogSink,
    pub max_level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            sink: LogSink::Off,
            max_level: LevelFilter::INFO,
        }
    }
}

impl LogConfig {
    /// Log to `maybe_path`, or to [`DEFAULT_LOG_FILE_NAME`] in the working directory.
    #[must_use]
    pub fn to_file(maybe_path: Option<PathBuf>) -> Self {
        Self {
            sink: LogSink::File(
                maybe_path.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE_NAME)),
            ),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn to_stderr() -> Self {
        Self {
            sink: LogSink::Stderr,
            ..Default::default()
        }
    }

    /// Keep the current file (if any) and also echo to stderr.
    #[must_use]
    pub fn also_to_stderr(mut self) -> Self {
        self.sink = match self.sink {
            LogSink::File(path) | LogSink::StderrAndFile(path) => {
                LogSink::StderrAndFile(path)
            }
            LogSink::Off | LogSink::Stderr => LogSink::Stderr,
        };
        self
    }

    #[must_use]
    pub fn with_max_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }

    #[must_use]
    pub fn is_off(&self) -> bool {
        self.sink == LogSink::Off || self.max_level == LevelFilter::OFF
    }
}
