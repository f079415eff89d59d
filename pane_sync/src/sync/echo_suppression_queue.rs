// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::PaneId;
use std::collections::HashSet;

/// Panes whose next "visible ranges changed" event was caused by the engine's own
/// mirrored reveal, and must be swallowed instead of being treated as user input.
///
/// ```text
/// engine: queue += B; host.reveal_range(B, ..)
/// host:   B visible ranges changed  ──▶ queue has B? yes ──▶ queue -= B, ignore
/// user:   B scrolled                ──▶ queue has B? no  ──▶ B becomes the driver
/// ```
///
/// Entries are single use. A pane is in the queue at most once, so the queue can never
/// hold more entries than there are eligible panes; [`Self::mark()`] checks this against
/// the bound it is given.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EchoSuppressionQueue {
    panes: HashSet<PaneId>,
}

impl EchoSuppressionQueue {
    /// Mark `pane` as about to receive a programmatic reveal. Call this immediately
    /// before the reveal is issued. `eligible_pane_count` is the number of eligible
    /// panes currently visible, which bounds the size of the queue.
    pub fn mark(&mut self, pane: PaneId, eligible_pane_count: usize) {
        self.panes.insert(pane);
        debug_assert!(
            self.panes.len() <= eligible_pane_count,
            "echo queue holds {} panes but only {} are eligible",
            self.panes.len(),
            eligible_pane_count
        );
    }

    /// If `pane` is queued, remove it and return `true`: the caller should swallow the
    /// event.
    pub fn take(&mut self, pane: PaneId) -> bool { self.panes.remove(&pane) }

    #[must_use]
    pub fn contains(&self, pane: PaneId) -> bool { self.panes.contains(&pane) }

    #[must_use]
    pub fn len(&self) -> usize { self.panes.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.panes.is_empty() }

    pub fn clear(&mut self) { self.panes.clear(); }
}
