// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{EventDisposition, SyncEngine};
use crate::{DEBUG_PANE_SYNC, DecorationStyle, PaneHost, PaneId, Range, map_range};

impl SyncEngine {
    /// Highlight the lines corresponding to `pane`'s selections in every other eligible
    /// pane. Only one highlight is ever live: the previous one is disposed before the
    /// new one is created.
    pub fn on_selection_changed(
        &mut self,
        pane: PaneId,
        selections: &[Range],
        host: &mut impl PaneHost,
    ) -> EventDisposition {
        if !self.is_sync_active() {
            return EventDisposition::Ignored;
        }

        let panes = host.visible_panes();
        if !panes.iter().any(|it| it.id == pane && it.is_real_editor()) {
            return EventDisposition::Ignored;
        }

        if let Some(previous) = self.active_highlight.take() {
            host.dispose_decoration(previous);
        }

        let plans: Vec<(PaneId, Vec<Range>)> = {
            let Some(source_doc) = host.document(pane) else {
                return EventDisposition::Ignored;
            };
            panes
                .iter()
                .filter(|it| it.is_eligible() && it.id != pane)
                .filter_map(|target| {
                    let target_doc = host.document(target.id)?;
                    let correspondence = self.correspondence_for(target.id);
                    let ranges = selections
                        .iter()
                        .map(|selection| {
                            map_range(*selection, correspondence, source_doc, target_doc)
                        })
                        .collect();
                    Some((target.id, ranges))
                })
                .collect()
        };

        let decoration = host.create_decoration(DecorationStyle::InactiveSelection);
        self.active_highlight = Some(decoration);
        let target_count = plans.len();
        for (target, ranges) in plans {
            host.set_decorations(target, decoration, ranges);
        }
        self.stats.highlights_drawn += 1;

        DEBUG_PANE_SYNC.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "🖍️ Mirrored selections",
                pane = %pane,
                selections = ?selections,
                target_count = %target_count,
            );
        });

        EventDisposition::HighlightDrawn { target_count }
    }
}
