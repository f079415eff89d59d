// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns a [`LogConfig`] into [`tracing_subscriber`] layers, and installs them either
//! process wide ([`try_init_global_logging()`]) or for the current thread only
//! ([`LogConfig::install_for_current_thread()`]).

use super::LogConfig;
use miette::{Context, IntoDiagnostic};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Type erased layer over the plain [Registry].
pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// One compact formatter shared by every sink, so stderr and file lines look the same.
macro_rules! compact_fmt_layer {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
    };
}

/// Builds one layer per destination in [`LogConfig::sink`]. Empty when logging is off.
///
/// # Errors
///
/// Returns an error if the log file can't be opened.
pub fn try_build_layers(config: &LogConfig) -> miette::Result<Vec<BoxedLayer>> {
    let mut layers: Vec<BoxedLayer> = vec![];

    if config.is_off() {
        return Ok(layers);
    }

    if config.sink.writes_to_stderr() {
        layers.push(stderr_layer(config.max_level));
    }

    if let Some(path) = config.sink.file_path() {
        layers.push(try_file_layer(path, config.max_level)?);
    }

    Ok(layers)
}

fn stderr_layer(max_level: LevelFilter) -> BoxedLayer {
    compact_fmt_layer!()
        .with_writer(std::io::stderr)
        .with_filter(max_level)
        .boxed()
}

fn try_file_layer(path: &Path, max_level: LevelFilter) -> miette::Result<BoxedLayer> {
    let appender = try_open_log_file(path)?;
    Ok(compact_fmt_layer!()
        .with_ansi(false)
        .with_writer(appender)
        .with_filter(max_level)
        .boxed())
}

/// Opens `path` for appending and never rotates it. Don't wrap the result in
/// `tracing_appender::non_blocking`: the worker guard would have to outlive `main`.
///
/// # Errors
///
/// Returns an error if `path` has no file name, or the file can't be opened.
pub fn try_open_log_file(path: &Path) -> miette::Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .ok_or_else(|| miette::miette!("Log path has no file name: {}", path.display()))?;

    let folder = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(&folder)
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not open log file: {}", path.display()))
}

/// Installs the process wide subscriber. Returns `Ok(false)` (and installs nothing)
/// when logging is off.
///
/// # Errors
///
/// Returns an error if the log file can't be opened, or a global subscriber has already
/// been set.
pub fn try_init_global_logging(config: &LogConfig) -> miette::Result<bool> {
    if config.is_off() {
        return Ok(false);
    }

    tracing_subscriber::registry()
        .with(try_build_layers(config)?)
        .try_init()
        .into_diagnostic()?;

    Ok(true)
}

impl LogConfig {
    /// Scopes the subscriber to the current thread until the guard drops. Used in tests
    /// so they don't fight over the global default.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be opened.
    pub fn install_for_current_thread(
        &self,
    ) -> miette::Result<Option<tracing::subscriber::DefaultGuard>> {
        if self.is_off() {
            return Ok(None);
        }
        let layers = try_build_layers(self)?;
        Ok(Some(tracing_subscriber::registry().with(layers).set_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::try_create_temp_dir;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_off_builds_nothing() {
        let config = LogConfig::default();
        assert!(try_build_layers(&config).unwrap().is_empty());
        assert!(!try_init_global_logging(&config).unwrap());
        assert!(config.install_for_current_thread().unwrap().is_none());
    }

    #[test]
    fn test_one_layer_per_destination() {
        let temp_dir = try_create_temp_dir().unwrap();
        let log_path = temp_dir.join("psync.log");

        let stderr_only = LogConfig::to_stderr();
        assert_eq!(try_build_layers(&stderr_only).unwrap().len(), 1);

        let both = LogConfig::to_file(Some(log_path.clone())).also_to_stderr();
        assert_eq!(try_build_layers(&both).unwrap().len(), 2);
        assert!(log_path.exists());
    }

    #[test]
    fn test_thread_local_subscriber_writes_to_file() {
        let temp_dir = try_create_temp_dir().unwrap();
        let log_path = temp_dir.join("engine.log");

        let config = LogConfig::to_file(Some(log_path.clone()));
        {
            let _guard = config.install_for_current_thread().unwrap();
            tracing::info!(message = "reveal issued", pane = 2);
        }

        let contents = std::fs::read_to_string(&log_path).unwrap();
        assert!(contents.contains("reveal issued"));
    }

    #[test]
    fn test_path_without_file_name_is_rejected() {
        assert!(try_open_log_file(Path::new("/")).is_err());
    }
}
