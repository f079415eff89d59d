// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! User facing commands. Unlike the event handlers these run whatever the mode is.

use super::{CopyScope, SyncEngine, sync_engine_struct::ordered_eligible_panes};
use crate::{CLIPBOARD_FRAGMENT_SEPARATOR, ClipboardService, Correspondence,
            DEBUG_PANE_SYNC, PaneHost, PaneId, Range, SyncMode, map_position,
            map_range_exact};

impl SyncEngine {
    /// Cycle `Off -> Normal -> Offset -> Off`, persist the new mode, and reset.
    pub fn toggle_mode(&mut self, host: &mut impl PaneHost) -> SyncMode {
        let mode = self.mode_state.advance();
        self.reset(host);
        mode
    }

    pub fn set_mode(&mut self, mode: SyncMode, host: &mut impl PaneHost) -> SyncMode {
        let mode = self.mode_state.set(mode);
        self.reset(host);
        mode
    }

    /// Focus the pane to the right of `active` (wrapping around), with the cursor or
    /// selection at the position corresponding to `active`'s primary selection.
    ///
    /// Returns the pane that was shown and its new selection, or `None` when there's
    /// nowhere to jump to.
    pub fn jump_to_corresponding_position(
        &mut self,
        active: PaneId,
        host: &mut impl PaneHost,
    ) -> Option<(PaneId, Range)> {
        let panes = ordered_eligible_panes(host.visible_panes());
        if panes.len() < 2 {
            DEBUG_PANE_SYNC.then(|| {
                tracing::debug!(message = "🦘 Nothing to jump to", active = %active);
            });
            return None;
        }

        let index = panes.iter().position(|it| it.id == active)?;
        let selection = panes[index].primary_selection()?;
        let next = panes[(index + 1) % panes.len()].id;

        let target_selection = {
            let source_doc = host.document(active)?;
            let target_doc = host.document(next)?;
            let correspondence = Correspondence::Offset(self.offset_table.get(next));
            if selection.is_empty() {
                Range::empty(map_position(
                    selection.start(),
                    correspondence,
                    source_doc,
                    target_doc,
                ))
            } else {
                map_range_exact(selection, correspondence, source_doc, target_doc)
            }
        };

        host.show_pane(next, target_selection);

        DEBUG_PANE_SYNC.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "🦘 Jumped to corresponding position",
                from = %active,
                to = %next,
                selection = %target_selection,
            );
        });

        Some((next, target_selection))
    }

    /// Collect selected text per `scope`, join the fragments with
    /// [`CLIPBOARD_FRAGMENT_SEPARATOR`] and put the result on the clipboard.
    ///
    /// A clipboard failure is logged, and the payload is still returned.
    pub fn copy_selections(
        &mut self,
        scope: CopyScope,
        active: PaneId,
        host: &mut impl PaneHost,
        clipboard: &mut impl ClipboardService,
    ) -> String {
        let fragments = self.collect_fragments(scope, active, &*host);
        let payload = fragments.join(CLIPBOARD_FRAGMENT_SEPARATOR);

        match clipboard.try_write_text(&payload) {
            Ok(()) => {
                DEBUG_PANE_SYNC.then(|| {
                    // % is Display, ? is Debug.
                    tracing::debug!(
                        message = "📋 Copied selections",
                        scope = ?scope,
                        fragment_count = %fragments.len(),
                    );
                });
            }
            Err(error) => {
                tracing::error!(
                    message = "📋 Could not copy selections to clipboard",
                    scope = ?scope,
                    error = ?error,
                );
            }
        }

        payload
    }

    fn collect_fragments(
        &self,
        scope: CopyScope,
        active: PaneId,
        host: &impl PaneHost,
    ) -> Vec<String> {
        let text_of = |pane: PaneId, ranges: &[Range]| -> Vec<String> {
            host.document(pane).map_or_else(Vec::new, |doc| {
                ranges.iter().map(|range| doc.text_in_range(*range)).collect()
            })
        };

        match scope {
            CopyScope::CurrentPane => host
                .pane_info(active)
                .map(|pane| text_of(pane.id, &pane.selections))
                .unwrap_or_default(),
            CopyScope::AllPanes => ordered_eligible_panes(host.visible_panes())
                .iter()
                .flat_map(|pane| text_of(pane.id, &pane.selections))
                .collect(),
            CopyScope::CorrespondingPanes => {
                let Some(source) = host.pane_info(active) else {
                    return vec![];
                };
                let Some(source_doc) = host.document(active) else {
                    return vec![];
                };
                ordered_eligible_panes(host.visible_panes())
                    .iter()
                    .filter(|it| it.id != active)
                    .flat_map(|target| {
                        let Some(target_doc) = host.document(target.id) else {
                            return vec![];
                        };
                        let correspondence =
                            Correspondence::Offset(self.offset_table.get(target.id));
                        source
                            .selections
                            .iter()
                            .map(|selection| {
                                let mapped = map_range_exact(
                                    *selection,
                                    correspondence,
                                    source_doc,
                                    target_doc,
                                );
                                target_doc.text_in_range(mapped)
                            })
                            .collect::<Vec<_>>()
                    })
                    .collect()
            }
        }
    }
}
