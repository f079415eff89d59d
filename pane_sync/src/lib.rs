// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Why pane sync?
//!
//! When you have the same (or a similar) document open in several panes side by side,
//! e.g. a translation next to its source, or two revisions of a config file, you want the
//! panes to move together. Scroll one, and the others follow. Select some text in one,
//! and the corresponding region lights up in the others.
//!
//! This crate is the engine that makes that happen. It does not draw anything and it does
//! not own any text. Your editor (the "host") tells it what happened via [`SyncEvent`]s,
//! and it calls back into the host through the [`PaneHost`] trait to reveal ranges and
//! draw highlights.
//!
//! # Table of contents
//!
//! <!-- TOC -->
//! - [Correspondence models](#correspondence-models)
//! - [Life of a scroll burst](#life-of-a-scroll-burst)
//! - [Echo suppression](#echo-suppression)
//! - [Selection mirroring](#selection-mirroring)
//! - [Commands](#commands)
//! - [Running the engine](#running-the-engine)
//! <!-- /TOC -->
//!
//! # Correspondence models
//!
//! The [`SyncMode`] decides how a line in one pane corresponds to a line in another.
//!
//! | Mode                 | Corresponding line                                 |
//! | -------------------- | -------------------------------------------------- |
//! | [`SyncMode::Off`]    | none, nothing is mirrored                          |
//! | [`SyncMode::Normal`] | same line number in every pane                     |
//! | [`SyncMode::Offset`] | driver line + per pane offset captured at takeover |
//!
//! The mode cycles `Off -> Normal -> Offset -> Off` via [`SyncEngine::toggle_mode()`]
//! and is persisted through a [`ModeStore`] (see [`KvModeStore`]).
//!
//! # Life of a scroll burst
//!
//! ```text
//! host: pane A scrolled ──▶ SyncEngine::apply_event()
//!                              │
//!                              ├─ A in echo queue? ──yes──▶ swallow, done
//!                              │
//!                              ├─ A != driver? ──▶ driver = A, rebuild offset table
//!                              │
//!                              └─ reset debounce deadline (coalesces the burst)
//!
//! deadline fires ──▶ SyncEngine::on_debounce_elapsed()
//!                              │
//!                              └─ for each other pane B:
//!                                   echo queue += B
//!                                   host.reveal_range(B, mapped range, AtTop)
//! ```
//!
//! # Echo suppression
//!
//! Revealing a range in pane B makes the host fire a "visible ranges changed" event for
//! B. Without the [`EchoSuppressionQueue`] that event would make B the driver, which
//! would mirror B back into A, and so on. Each queued pane swallows exactly one event.
//!
//! # Selection mirroring
//!
//! Every selection change disposes the previous highlight decoration and draws a fresh
//! one in every other pane. There is never more than one live highlight.
//!
//! # Commands
//!
//! - [`SyncEngine::jump_to_corresponding_position()`]
//! - [`SyncEngine::copy_selections()`] with a [`CopyScope`]
//! - [`SyncEngine::toggle_mode()`]
//!
//! # Running the engine
//!
//! The handlers on [`SyncEngine`] are synchronous. [`run_event_loop()`] wraps them in a
//! single tokio task that owns the engine and fires the debounce deadline.
//!
//! ```no_run
//! use r3bl_pane_sync::{InMemoryModeStore, InMemoryPaneHost, SyncConfig, SyncEngine,
//!                      SyncEvent, RecordingClipboard, run_event_loop};
//!
//! # async fn example() {
//! let (sender, receiver) = tokio::sync::mpsc::channel(1_000);
//! let mut host = InMemoryPaneHost::default();
//! host.attach_sender(sender.clone());
//! let engine = SyncEngine::new(SyncConfig::default(), Box::new(InMemoryModeStore::default()));
//! let handle = tokio::spawn(async move {
//!     let mut clipboard = RecordingClipboard::default();
//!     run_event_loop(engine, &mut host, &mut clipboard, receiver).await
//! });
//! sender.send(SyncEvent::PaneSetChanged).await.ok();
//! sender.send(SyncEvent::Shutdown).await.ok();
//! let _engine = handle.await;
//! # }
//! ```

// Enforce strict error handling in production library code only. Tests and examples are
// allowed to use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod core;
pub mod sync;

// Re-export.
pub use crate::core::*;
pub use sync::*;
