// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mirror the driver pane's viewport into every other eligible pane.
//!
//! A scroll burst looks like this:
//!
//! ```text
//! user scrolls A     A: VisibleRangesChanged ─┐
//!                    A: VisibleRangesChanged ─┤ reset deadline each time
//!                    A: VisibleRangesChanged ─┘
//!                                  ... debounce delay ...
//! deadline elapses   reveal B, reveal C       (B, C marked in echo queue)
//!                    B: VisibleRangesChanged  (echo, swallowed)
//!                    C: VisibleRangesChanged  (echo, swallowed)
//! ```

use super::{EventDisposition, PendingReveal, SyncEngine};
use crate::{DEBUG_PANE_SYNC, PaneHost, PaneId, PaneInfo, Range, RevealType, map_range};

impl SyncEngine {
    /// A pane's viewport moved.
    ///
    /// 1. Ignore the event when sync is inactive, or the pane isn't a real editor.
    /// 2. Swallow it if it is the echo of a reveal the engine issued.
    /// 3. Otherwise `pane` is the driver. When the driver changes, the offset table is
    ///    rebuilt (in offset mode) or cleared (in normal mode).
    /// 4. Schedule a reveal of the driver's first visible range, and restart the
    ///    debounce deadline.
    pub fn on_visible_ranges_changed(
        &mut self,
        pane: PaneId,
        visible_ranges: &[Range],
        host: &mut impl PaneHost,
    ) -> EventDisposition {
        if !self.is_sync_active() {
            return EventDisposition::Ignored;
        }

        let panes = host.visible_panes();
        let Some(source) = panes.iter().find(|it| it.id == pane) else {
            return EventDisposition::Ignored;
        };
        if !source.is_real_editor() {
            return EventDisposition::Ignored;
        }

        if self.echo_queue.take(pane) {
            self.stats.echoes_swallowed += 1;
            DEBUG_PANE_SYNC.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(message = "🔇 Swallowed reveal echo", pane = %pane);
            });
            return EventDisposition::EchoSwallowed;
        }

        // The event payload is fresher than the snapshot.
        let driver_info = PaneInfo {
            visible_ranges: if visible_ranges.is_empty() {
                source.visible_ranges.clone()
            } else {
                visible_ranges.to_vec()
            },
            ..source.clone()
        };

        let driver_changed = self.driver != Some(pane);
        if driver_changed {
            self.driver = Some(pane);
            self.stats.driver_changes += 1;
            if self.mode_state.is_offset_mode() {
                self.offset_table.rebuild_for_driver(
                    &driver_info,
                    panes.iter().filter(|it| it.is_eligible()),
                );
            } else {
                self.offset_table.clear();
            }

            DEBUG_PANE_SYNC.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(
                    message = "🚗 New scroll driver",
                    driver = %pane,
                    offsets = ?self.offset_table,
                );
            });
        }

        let Some(visible_range) = driver_info.visible_ranges.first().copied() else {
            return EventDisposition::Ignored;
        };

        self.pending_reveal = Some(PendingReveal {
            driver: pane,
            visible_range,
        });
        self.debounce.restart();

        EventDisposition::RevealScheduled { driver_changed }
    }

    /// The debounce deadline elapsed: reveal the captured range in every eligible pane
    /// other than the driver. Returns how many reveals were issued.
    ///
    /// A target whose top line already equals the mapped line is skipped. It gets no
    /// reveal, and no echo queue entry, since the host wouldn't fire an event for it.
    /// A target without a view column is revealed but not queued: its events are
    /// ignored before the echo check, so an entry would never be taken.
    pub fn on_debounce_elapsed(&mut self, host: &mut impl PaneHost) -> usize {
        self.debounce.cancel();
        let Some(request) = self.pending_reveal.take() else {
            return 0;
        };

        let panes = host.visible_panes();
        let eligible_pane_count = panes.iter().filter(|it| it.is_eligible()).count();

        let plans: Vec<(PaneId, Range, bool)> = {
            let Some(source_doc) = host.document(request.driver) else {
                return 0;
            };
            panes
                .iter()
                .filter(|it| it.is_eligible() && it.id != request.driver)
                .filter_map(|target| {
                    let target_doc = host.document(target.id)?;
                    let mapped = map_range(
                        request.visible_range,
                        self.correspondence_for(target.id),
                        source_doc,
                        target_doc,
                    );
                    (target.visible_start_line() != mapped.start().line)
                        .then_some((target.id, mapped, target.is_real_editor()))
                })
                .collect()
        };

        for (target, range, expects_echo) in &plans {
            if *expects_echo {
                self.echo_queue.mark(*target, eligible_pane_count);
            }
            host.reveal_range(*target, *range, RevealType::AtTop);
            self.stats.reveals_issued += 1;
        }

        DEBUG_PANE_SYNC.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "📜 Mirrored driver viewport",
                driver = %request.driver,
                visible_range = %request.visible_range,
                reveals = ?plans,
            );
        });

        plans.len()
    }
}
