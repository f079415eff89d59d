// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::{Context, IntoDiagnostic};
use std::{ops::Deref,
          path::{Path, PathBuf}};

pub const TEMP_DIR_PREFIX: &str = "r3bl_pane_sync_";

/// Scratch folder for tests that need a real mode store or log file on disk. Removed
/// (with everything in it) on drop.
#[derive(Debug)]
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    #[must_use]
    pub fn path(&self) -> &Path { &self.path }
}

impl Deref for TempDir {
    type Target = Path;

    fn deref(&self) -> &Path { &self.path }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_dir_all(&self.path) {
            // % is Display, ? is Debug.
            tracing::warn!(
                message = "Could not remove temp dir",
                path = %self.path.display(),
                error = %error
            );
        }
    }
}

/// Makes a fresh, uniquely named folder under [`std::env::temp_dir()`].
///
/// # Errors
///
/// Returns an error if the folder can't be created (permissions, full disk).
pub fn try_create_temp_dir() -> miette::Result<TempDir> {
    let path = std::env::temp_dir().join(format!("{TEMP_DIR_PREFIX}{}", uuid::Uuid::new_v4()));
    std::fs::create_dir(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not create temp dir: {}", path.display()))?;
    Ok(TempDir { path })
}
