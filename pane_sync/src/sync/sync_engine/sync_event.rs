// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{PaneId, Range, SyncMode};
use serde::{Deserialize, Serialize};

/// Everything the engine reacts to. Host notifications, user commands, and the shutdown
/// signal for [`crate::run_event_loop()`] all go through
/// [`crate::SyncEngine::apply_event()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// Panes were opened, closed, split or rearranged.
    PaneSetChanged,
    /// A pane's viewport moved. Fired for user scrolls and for programmatic reveals
    /// alike; the engine tells them apart.
    VisibleRangesChanged {
        pane: PaneId,
        visible_ranges: Vec<Range>,
    },
    /// A pane's cursor or selections changed.
    SelectionChanged { pane: PaneId, selections: Vec<Range> },
    Command(SyncCommand),
    Shutdown,
}

/// User facing commands. These are thin wrappers over engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncCommand {
    /// Cycle `Off -> Normal -> Offset -> Off`.
    ToggleMode,
    SetMode(SyncMode),
    /// Move focus to the next pane, at the position corresponding to `pane`'s cursor.
    JumpToCorrespondingPosition { pane: PaneId },
    CopySelections { scope: CopyScope, pane: PaneId },
}

/// Which selections the copy command collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyScope {
    /// The active pane's own selections.
    CurrentPane,
    /// Every eligible pane's own selections, left to right.
    AllPanes,
    /// The active pane's selections, mapped into every other eligible pane, text taken
    /// from those panes.
    CorrespondingPanes,
}

/// What the engine did with an event. Useful for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDisposition {
    /// Sync is inactive, or the event came from a pane that doesn't take part.
    Ignored,
    /// The event was the echo of one of the engine's own reveals.
    EchoSwallowed,
    /// A mirrored reveal is pending on the debounce deadline.
    RevealScheduled { driver_changed: bool },
    /// A fresh highlight was drawn in this many panes.
    HighlightDrawn { target_count: usize },
    /// All transient state was cleared.
    Reset,
    /// The jump command moved focus to this pane.
    Jumped { pane: PaneId, selection: Range },
    /// The copy command produced this payload.
    Copied { payload: String },
    ModeChanged { mode: SyncMode },
    Shutdown,
}
