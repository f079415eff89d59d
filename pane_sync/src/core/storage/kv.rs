// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! On disk key/value state for the sync engine, backed by the [kv] crate.
//!
//! Only tiny records live here (today just the last [`crate::SyncMode`]), so the API is
//! deliberately narrow:
//! - [`StateDb::try_open`] opens the folder (creating it on first use).
//! - [`StateDb::typed_bucket`] hands out a [`StateBucket`] for one record type.
//! - [`write_record`] and [`read_record`] move a single value in and out as [Bincode].

use kv::{Bincode, Config, Store};
use miette::{Context, IntoDiagnostic};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// A named section of the [`StateDb`], typed on its key and on the record it holds.
/// Borrows the db it came from.
pub type StateBucket<'db, K, R> = kv::Bucket<'db, K, Bincode<R>>;

pub const DEFAULT_STORE_FOLDER_NAME: &str = "pane_sync_kv";
pub const DEFAULT_BUCKET_NAME: &str = "pane_sync";

/// Owns the open [Store]. Dropping it releases the folder lock.
pub struct StateDb {
    store: Store,
    folder: String,
}

impl Debug for StateDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateDb").field("folder", &self.folder).finish()
    }
}

impl StateDb {
    /// Opens the db in `maybe_folder`, or in [`DEFAULT_STORE_FOLDER_NAME`] (relative to
    /// the working directory) when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder can't be created, or if the store in it is locked
    /// by another process or unreadable.
    pub fn try_open(maybe_folder: Option<&String>) -> miette::Result<Self> {
        let folder = maybe_folder.map_or_else(
            || DEFAULT_STORE_FOLDER_NAME.to_string(),
            ToString::to_string,
        );

        let store = Store::new(Config::new(folder.as_str()))
            .into_diagnostic()
            .wrap_err(StateDbErrorCouldNot::OpenFolder {
                folder: folder.clone(),
            })?;

        // % is Display, ? is Debug.
        tracing::debug!(message = "📑 Opened state db", folder = %folder);

        Ok(Self { store, folder })
    }

    #[must_use]
    pub fn folder(&self) -> &str { &self.folder }

    /// # Errors
    ///
    /// Returns an error if the bucket can't be created inside the store.
    pub fn typed_bucket<K, R>(&self, name: &str) -> miette::Result<StateBucket<'_, K, R>>
    where
        K: for<'k> kv::Key<'k>,
        R: Serialize + for<'de> Deserialize<'de>,
    {
        self.store
            .bucket(Some(name))
            .into_diagnostic()
            .wrap_err(StateDbErrorCouldNot::OpenBucket {
                name: name.to_string(),
            })
    }
}

/// Stores `record` under `key`, then flushes so it survives an abrupt exit.
///
/// # Errors
///
/// Returns an error if the record can't be encoded, written, or flushed.
pub fn write_record<K, R>(bucket: &StateBucket<'_, K, R>, key: K, record: R) -> miette::Result<()>
where
    K: Display + for<'k> kv::Key<'k>,
    R: Debug + Serialize + for<'de> Deserialize<'de>,
{
    let record_dbg = format!("{record:?}");

    bucket
        .set(&key, &Bincode(record))
        .and_then(|_| bucket.flush().map(|_| ()))
        .into_diagnostic()
        .wrap_err(StateDbErrorCouldNot::WriteRecord {
            key: key.to_string(),
        })?;

    // % is Display, ? is Debug.
    tracing::debug!(message = "🔽 Wrote record", key = %key, record = %record_dbg);

    Ok(())
}

/// Returns the record stored under `key`, or `None` if there isn't one yet.
///
/// # Errors
///
/// Returns an error if the bucket can't be read or the bytes don't decode as `R`.
pub fn read_record<K, R>(bucket: &StateBucket<'_, K, R>, key: K) -> miette::Result<Option<R>>
where
    K: Display + for<'k> kv::Key<'k>,
    R: Debug + Serialize + for<'de> Deserialize<'de>,
{
    let maybe_record = bucket
        .get(&key)
        .into_diagnostic()
        .wrap_err(StateDbErrorCouldNot::ReadRecord {
            key: key.to_string(),
        })?
        .map(|Bincode(record)| record);

    // % is Display, ? is Debug.
    tracing::debug!(message = "🔼 Read record", key = %key, record = ?maybe_record);

    Ok(maybe_record)
}

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum StateDbErrorCouldNot {
    #[error("📑 Could not open state db folder: '{folder}'")]
    #[diagnostic(help("Is another psync process holding the lock on this folder?"))]
    OpenFolder { folder: String },

    #[error("📦 Could not open bucket: '{name}'")]
    OpenBucket { name: String },

    #[error("🔽 Could not write record for key: '{key}'")]
    WriteRecord { key: String },

    #[error("🔼 Could not read record for key: '{key}'")]
    ReadRecord { key: String },
}
