// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The correspondence model state machine, and where it gets persisted.
//!
//! ```text
//!   ┌─────┐ advance ┌────────┐ advance ┌────────┐
//! ┌▶│ Off │────────▶│ Normal │────────▶│ Offset │─┐
//! │ └─────┘         └────────┘         └────────┘ │
//! └───────────────────────── advance ─────────────┘
//! ```

use crate::{DEBUG_PANE_SYNC, StateBucket, StateDb, read_record, write_record};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Which correspondence model is active. Exactly one at a time. It only changes when the
/// user asks for it, never as a side effect of syncing.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SyncMode {
    Off,
    /// Line locked: line `n` in any pane corresponds to line `n` in every other pane.
    #[default]
    Normal,
    /// Corresponding line is the driver's line plus a per pane offset.
    Offset,
}

impl SyncMode {
    /// The next mode in the toggle cycle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            SyncMode::Off => SyncMode::Normal,
            SyncMode::Normal => SyncMode::Offset,
            SyncMode::Offset => SyncMode::Off,
        }
    }
}

/// Abstraction for where the mode is persisted, for dependency injection. Implemented by
/// [`KvModeStore`] (on disk) and [`InMemoryModeStore`] (tests).
pub trait ModeStore: Debug + Send {
    /// # Errors
    ///
    /// Returns an error if the backing store can't be read.
    fn load(&self) -> miette::Result<Option<SyncMode>>;

    /// # Errors
    ///
    /// Returns an error if the backing store can't be written.
    fn save(&mut self, mode: SyncMode) -> miette::Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryModeStore {
    pub saved: Option<SyncMode>,
    /// Number of successful [`ModeStore::save()`] calls.
    pub save_count: usize,
}

impl ModeStore for InMemoryModeStore {
    fn load(&self) -> miette::Result<Option<SyncMode>> { Ok(self.saved) }

    fn save(&mut self, mode: SyncMode) -> miette::Result<()> {
        self.saved = Some(mode);
        self.save_count += 1;
        Ok(())
    }
}

pub const MODE_KEY: &str = "sync_mode";

/// Persists the mode in a [`StateDb`] on disk.
#[derive(Debug)]
pub struct KvModeStore {
    db: StateDb,
    bucket_name: String,
}

impl KvModeStore {
    /// Open (or create) the db in `maybe_db_folder_path`, or in
    /// [`crate::DEFAULT_STORE_FOLDER_NAME`] if `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the db folder can't be created or opened.
    pub fn try_new(maybe_db_folder_path: Option<&String>) -> miette::Result<Self> {
        Ok(Self {
            db: StateDb::try_open(maybe_db_folder_path)?,
            bucket_name: crate::DEFAULT_BUCKET_NAME.to_string(),
        })
    }

    fn bucket(&self) -> miette::Result<StateBucket<'_, String, SyncMode>> {
        self.db.typed_bucket(&self.bucket_name)
    }
}

impl ModeStore for KvModeStore {
    fn load(&self) -> miette::Result<Option<SyncMode>> {
        read_record(&self.bucket()?, MODE_KEY.to_string())
    }

    fn save(&mut self, mode: SyncMode) -> miette::Result<()> {
        write_record(&self.bucket()?, MODE_KEY.to_string(), mode)
    }
}

/// Tracks the active [`SyncMode`], restores it at startup and persists every change.
///
/// Storage failures are logged and otherwise ignored: the in memory mode is always the
/// source of truth for the running engine.
#[derive(Debug)]
pub struct ModeState {
    mode: SyncMode,
    store: Box<dyn ModeStore>,
}

impl ModeState {
    /// Restore the persisted mode, falling back to `default_mode` when nothing has been
    /// stored yet or the store can't be read.
    #[must_use]
    pub fn new(store: Box<dyn ModeStore>, default_mode: SyncMode) -> Self {
        let mode = match store.load() {
            Ok(Some(mode)) => mode,
            Ok(None) => default_mode,
            Err(error) => {
                // % is Display, ? is Debug.
                tracing::warn!(
                    message = "Could not restore sync mode, using default",
                    default_mode = %default_mode,
                    error = ?error
                );
                default_mode
            }
        };

        DEBUG_PANE_SYNC.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "🔁 Restored sync mode", mode = %mode);
        });

        Self { mode, store }
    }

    #[must_use]
    pub fn current(&self) -> SyncMode { self.mode }

    #[must_use]
    pub fn is_off(&self) -> bool { self.mode == SyncMode::Off }

    #[must_use]
    pub fn is_normal_mode(&self) -> bool { self.mode == SyncMode::Normal }

    #[must_use]
    pub fn is_offset_mode(&self) -> bool { self.mode == SyncMode::Offset }

    /// Move to the next mode in the cycle and persist it.
    pub fn advance(&mut self) -> SyncMode { self.set(self.mode.next()) }

    /// Move to `mode` and persist it.
    pub fn set(&mut self, mode: SyncMode) -> SyncMode {
        let previous = self.mode;
        self.mode = mode;

        if let Err(error) = self.store.save(mode) {
            // % is Display, ? is Debug.
            tracing::warn!(
                message = "Could not persist sync mode",
                mode = %mode,
                error = ?error
            );
        }

        DEBUG_PANE_SYNC.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "🔁 Sync mode changed",
                from = %previous,
                to = %mode
            );
        });

        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::try_create_temp_dir;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[derive(Debug)]
    struct BrokenModeStore;

    impl ModeStore for BrokenModeStore {
        fn load(&self) -> miette::Result<Option<SyncMode>> {
            Err(miette::miette!("disk on fire"))
        }

        fn save(&mut self, _mode: SyncMode) -> miette::Result<()> {
            Err(miette::miette!("disk on fire"))
        }
    }

    #[test]
    fn test_cycle_returns_to_start() {
        for mode in SyncMode::iter() {
            assert_eq!(mode.next().next().next(), mode);
            assert_ne!(mode.next(), mode);
        }
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(SyncMode::from_str("offset").unwrap(), SyncMode::Offset);
        assert_eq!(SyncMode::from_str("Normal").unwrap(), SyncMode::Normal);
        assert!(SyncMode::from_str("sideways").is_err());
        assert_eq!(SyncMode::Off.to_string(), "off");
    }

    #[test]
    fn test_default_is_normal_when_nothing_stored() {
        let state = ModeState::new(Box::new(InMemoryModeStore::default()), SyncMode::Normal);
        assert!(state.is_normal_mode());
    }

    #[test]
    fn test_restores_stored_mode() {
        let store = InMemoryModeStore {
            saved: Some(SyncMode::Offset),
            save_count: 0,
        };
        let state = ModeState::new(Box::new(store), SyncMode::Normal);
        assert!(state.is_offset_mode());
    }

    #[test]
    fn test_advance_cycles_and_persists() {
        let mut state =
            ModeState::new(Box::new(InMemoryModeStore::default()), SyncMode::Normal);
        assert_eq!(state.advance(), SyncMode::Offset);
        assert_eq!(state.advance(), SyncMode::Off);
        assert!(state.is_off());
        assert_eq!(state.advance(), SyncMode::Normal);
        assert_eq!(state.store.load().unwrap(), Some(SyncMode::Normal));
    }

    #[test]
    fn test_broken_store_falls_back_and_still_advances() {
        let mut state = ModeState::new(Box::new(BrokenModeStore), SyncMode::Offset);
        assert!(state.is_offset_mode());
        assert_eq!(state.advance(), SyncMode::Off);
        assert!(state.is_off());
    }

    #[test]
    #[serial]
    fn test_kv_mode_store_round_trip_across_reopen() {
        let root_temp_dir = try_create_temp_dir().unwrap();
        let path_str = root_temp_dir
            .join("mode_store")
            .to_string_lossy()
            .to_string();

        {
            let store = KvModeStore::try_new(Some(&path_str)).unwrap();
            assert_eq!(store.load().unwrap(), None);
            let mut state = ModeState::new(Box::new(store), SyncMode::Normal);
            state.advance();
            state.advance();
            assert!(state.is_off());
        }

        let store = KvModeStore::try_new(Some(&path_str)).unwrap();
        let state = ModeState::new(Box::new(store), SyncMode::Normal);
        assert!(state.is_off());
    }
}
