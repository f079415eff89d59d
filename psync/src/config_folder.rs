// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEBUG_PSYNC_MOD, PaneSyncErrorCouldNot};
use dirs::config_dir;
use miette::{Context, IntoDiagnostic};
use std::{fmt::{Display, Formatter, Result},
          fs,
          path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPaths {
    R3BLTopLevelFolderName,
    ModeStoreFolderName,
    LogFileName,
}

impl Display for ConfigPaths {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let path = match self {
            ConfigPaths::R3BLTopLevelFolderName => "r3bl-psync",
            ConfigPaths::ModeStoreFolderName => "mode_store",
            ConfigPaths::LogFileName => "psync.log",
        };
        write!(f, "{path}")
    }
}

/// This is where the config folder is.
#[must_use]
pub fn try_get_config_folder_path() -> Option<PathBuf> {
    let home_config_folder_path = config_dir()?;
    Some(home_config_folder_path.join(ConfigPaths::R3BLTopLevelFolderName.to_string()))
}

/// The folder the mode store lives in: `maybe_state_dir` if given, otherwise inside the
/// platform config folder. It is created if it doesn't exist.
///
/// # Errors
///
/// Returns an error if there's no platform config folder, or the folder can't be
/// created.
pub fn try_resolve_mode_store_path(maybe_state_dir: Option<&String>) -> miette::Result<PathBuf> {
    let mode_store_path =
        try_state_dir(maybe_state_dir)?.join(ConfigPaths::ModeStoreFolderName.to_string());

    fs::create_dir_all(&mode_store_path)
        .into_diagnostic()
        .wrap_err(PaneSyncErrorCouldNot::CreateStateDir)?;

    DEBUG_PSYNC_MOD.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(
            message = "Using mode store folder.",
            mode_store_path = ?mode_store_path
        );
    });

    Ok(mode_store_path)
}

/// The `--enable-logging` output file, next to the mode store. The state folder is
/// created if needed, the file itself is created by the logger.
///
/// # Errors
///
/// Returns an error if there's no platform config folder, or the folder can't be
/// created.
pub fn try_resolve_log_file_path(maybe_state_dir: Option<&String>) -> miette::Result<PathBuf> {
    let state_dir = try_state_dir(maybe_state_dir)?;
    fs::create_dir_all(&state_dir)
        .into_diagnostic()
        .wrap_err(PaneSyncErrorCouldNot::CreateStateDir)?;
    Ok(state_dir.join(ConfigPaths::LogFileName.to_string()))
}

fn try_state_dir(maybe_state_dir: Option<&String>) -> miette::Result<PathBuf> {
    match maybe_state_dir {
        Some(it) => Ok(PathBuf::from(it)),
        None => Ok(try_get_config_folder_path().ok_or(PaneSyncErrorCouldNot::CreateStateDir)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use r3bl_pane_sync::try_create_temp_dir;

    #[test]
    fn test_explicit_state_dir_is_created() {
        let root_temp_dir = try_create_temp_dir().unwrap();
        let state_dir = root_temp_dir
            .join("nested/state")
            .to_string_lossy()
            .to_string();

        let it = try_resolve_mode_store_path(Some(&state_dir)).unwrap();
        assert!(it.is_dir());
        assert!(it.ends_with("nested/state/mode_store"));
    }

    #[test]
    fn test_log_file_sits_in_state_dir() {
        let root_temp_dir = try_create_temp_dir().unwrap();
        let state_dir = root_temp_dir.join("state").to_string_lossy().to_string();

        let it = try_resolve_log_file_path(Some(&state_dir)).unwrap();
        assert!(it.ends_with("state/psync.log"));
        assert!(it.parent().unwrap().is_dir());
    }

    #[test]
    fn test_config_folder_is_namespaced() {
        if let Some(it) = try_get_config_folder_path() {
            assert!(it.ends_with("r3bl-psync"));
        }
    }
}
