// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{EventDisposition, SyncCommand, SyncConfig, SyncEvent};
use crate::{ClipboardService, Correspondence, DEBUG_PANE_SYNC, DebounceTimer,
            DecorationId, EchoSuppressionQueue, ModeState, ModeStore, OffsetTable, PaneHost,
            PaneId, PaneInfo, Range, SyncMode};

/// Counters that make the engine's behavior observable without a host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncStats {
    pub driver_changes: usize,
    pub reveals_issued: usize,
    pub echoes_swallowed: usize,
    pub highlights_drawn: usize,
    pub resets: usize,
}

/// The reveal that fires when the debounce deadline elapses. It captures the driver and
/// the driver's first visible range at the time of the last event of the burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReveal {
    pub driver: PaneId,
    pub visible_range: Range,
}

/// Owns every piece of mutable sync state. There are no globals; two engines never
/// share anything.
///
/// Host notifications and user commands go in through [`Self::apply_event()`]. The
/// debounce deadline is driven from outside, either by [`crate::run_event_loop()`], or by
/// calling [`Self::on_debounce_elapsed()`] directly.
///
/// The handlers live in their own modules:
/// - [`super::scroll_synchronizer`]
/// - [`super::selection_mirror`]
/// - [`super::pane_set_monitor`]
/// - [`super::commands`]
#[derive(Debug)]
pub struct SyncEngine {
    pub(crate) mode_state: ModeState,
    pub(crate) offset_table: OffsetTable,
    pub(crate) echo_queue: EchoSuppressionQueue,
    pub(crate) driver: Option<PaneId>,
    /// Are at least two eligible panes on screen?
    pub(crate) panes_visible: bool,
    pub(crate) debounce: DebounceTimer,
    pub(crate) pending_reveal: Option<PendingReveal>,
    pub(crate) active_highlight: Option<DecorationId>,
    pub(crate) stats: SyncStats,
}

impl SyncEngine {
    /// The mode is restored from `store`. Call [`Self::activate()`] once the host is
    /// ready, so the engine knows how many panes are on screen.
    #[must_use]
    pub fn new(config: SyncConfig, store: Box<dyn ModeStore>) -> Self {
        Self {
            mode_state: ModeState::new(store, config.default_mode),
            offset_table: OffsetTable::default(),
            echo_queue: EchoSuppressionQueue::default(),
            driver: None,
            panes_visible: false,
            debounce: DebounceTimer::new(config.debounce_delay),
            pending_reveal: None,
            active_highlight: None,
            stats: SyncStats::default(),
        }
    }

    /// Take a first look at the pane set.
    pub fn activate(&mut self, host: &mut impl PaneHost) {
        self.on_pane_set_changed(host);
    }

    /// The single dispatcher for everything the engine reacts to.
    pub fn apply_event(
        &mut self,
        event: SyncEvent,
        host: &mut impl PaneHost,
        clipboard: &mut impl ClipboardService,
    ) -> EventDisposition {
        let disposition = match event {
            SyncEvent::PaneSetChanged => self.on_pane_set_changed(host),
            SyncEvent::VisibleRangesChanged {
                pane,
                visible_ranges,
            } => self.on_visible_ranges_changed(pane, &visible_ranges, host),
            SyncEvent::SelectionChanged { pane, selections } => {
                self.on_selection_changed(pane, &selections, host)
            }
            SyncEvent::Command(command) => self.apply_command(command, host, clipboard),
            SyncEvent::Shutdown => {
                self.reset(host);
                EventDisposition::Shutdown
            }
        };

        DEBUG_PANE_SYNC.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "⚙️ Applied sync event",
                disposition = ?disposition,
                mode = %self.mode(),
            );
        });

        disposition
    }

    fn apply_command(
        &mut self,
        command: SyncCommand,
        host: &mut impl PaneHost,
        clipboard: &mut impl ClipboardService,
    ) -> EventDisposition {
        match command {
            SyncCommand::ToggleMode => EventDisposition::ModeChanged {
                mode: self.toggle_mode(host),
            },
            SyncCommand::SetMode(mode) => EventDisposition::ModeChanged {
                mode: self.set_mode(mode, host),
            },
            SyncCommand::JumpToCorrespondingPosition { pane } => {
                match self.jump_to_corresponding_position(pane, host) {
                    Some((pane, selection)) => EventDisposition::Jumped { pane, selection },
                    None => EventDisposition::Ignored,
                }
            }
            SyncCommand::CopySelections { scope, pane } => EventDisposition::Copied {
                payload: self.copy_selections(scope, pane, host, clipboard),
            },
        }
    }

    #[must_use]
    pub fn mode(&self) -> SyncMode { self.mode_state.current() }

    #[must_use]
    pub fn driver(&self) -> Option<PaneId> { self.driver }

    #[must_use]
    pub fn offset_table(&self) -> &OffsetTable { &self.offset_table }

    #[must_use]
    pub fn echo_queue(&self) -> &EchoSuppressionQueue { &self.echo_queue }

    #[must_use]
    pub fn debounce(&self) -> &DebounceTimer { &self.debounce }

    #[must_use]
    pub fn pending_reveal(&self) -> Option<PendingReveal> { self.pending_reveal }

    #[must_use]
    pub fn has_pending_reveal(&self) -> bool { self.pending_reveal.is_some() }

    #[must_use]
    pub fn active_highlight(&self) -> Option<DecorationId> { self.active_highlight }

    #[must_use]
    pub fn panes_visible(&self) -> bool { self.panes_visible }

    #[must_use]
    pub fn stats(&self) -> SyncStats { self.stats }

    /// Sync is on, and there's something to sync with.
    pub(crate) fn is_sync_active(&self) -> bool {
        !self.mode_state.is_off() && self.panes_visible
    }

    /// Correspondence from the driver to `target`, for the current mode.
    pub(crate) fn correspondence_for(&self, target: PaneId) -> Correspondence {
        if self.mode_state.is_offset_mode() {
            Correspondence::Offset(self.offset_table.get(target))
        } else {
            Correspondence::LineLocked
        }
    }
}

/// Eligible panes, left to right. Panes without a view column go last.
pub(crate) fn ordered_eligible_panes(panes: Vec<PaneInfo>) -> Vec<PaneInfo> {
    let mut acc: Vec<PaneInfo> = panes.into_iter().filter(PaneInfo::is_eligible).collect();
    acc.sort_by_key(|pane| (pane.view_column.is_none(), pane.view_column, pane.id));
    acc
}
