// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{EventDisposition, SyncEngine};
use crate::{DEBUG_PANE_SYNC, PaneHost, has_split_panes};

impl SyncEngine {
    /// Panes were opened, closed or rearranged. Offsets and the driver only make sense
    /// relative to a given pane set, so everything transient is dropped.
    pub fn on_pane_set_changed(&mut self, host: &mut impl PaneHost) -> EventDisposition {
        self.panes_visible = has_split_panes(&host.visible_panes());
        self.reset(host)
    }

    /// Clear the offset table, echo queue and driver, cancel the pending reveal, and
    /// dispose the active highlight.
    pub fn reset(&mut self, host: &mut impl PaneHost) -> EventDisposition {
        self.offset_table.clear();
        self.echo_queue.clear();
        self.driver = None;
        self.debounce.cancel();
        self.pending_reveal = None;
        if let Some(decoration) = self.active_highlight.take() {
            host.dispose_decoration(decoration);
        }
        self.stats.resets += 1;

        DEBUG_PANE_SYNC.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "🧹 Reset sync state",
                panes_visible = %self.panes_visible,
            );
        });

        EventDisposition::Reset
    }
}
