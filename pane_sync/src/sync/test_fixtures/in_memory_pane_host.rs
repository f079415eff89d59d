// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A [`PaneHost`] that keeps everything in memory. It behaves like a real editor host in
//! the ways that matter to the engine: reveals move the viewport and fire an echo event,
//! decorations are tracked per id, and stale pane ids are ignored.
//!
//! Events the host fires on its own (pane set changes and reveal echoes) go to an outbox,
//! or to an mpsc channel once one is attached with
//! [`InMemoryPaneHost::attach_sender()`]. Events caused by the "user" are returned from
//! [`InMemoryPaneHost::user_scroll()`] and [`InMemoryPaneHost::user_select()`], so the
//! caller decides how they are delivered.

use crate::{ClipboardService, DecorationId, DecorationStyle, LinesDocument, PaneDocument,
            PaneHost, PaneId, PaneInfo, PaneKind, Range, RevealType, SyncEngine, SyncEvent,
            ViewColumn, pos};
use std::collections::HashMap;
use tokio::sync::mpsc;

pub const DEFAULT_VIEWPORT_HEIGHT: usize = 20;

/// Upper bound on the number of steps [`InMemoryPaneHost::settle()`] takes. Hitting it
/// means events keep producing events.
pub const MAX_SETTLE_STEPS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryPane {
    pub id: PaneId,
    pub view_column: Option<ViewColumn>,
    pub kind: PaneKind,
    pub document: LinesDocument,
    pub top_line: usize,
    pub viewport_height: usize,
    pub selections: Vec<Range>,
}

impl InMemoryPane {
    /// From the top line down to the start of the first line below the viewport.
    #[must_use]
    pub fn visible_range(&self) -> Range {
        let bottom = (self.top_line + self.viewport_height).min(self.document.line_count());
        Range::new(pos(self.top_line, 0), pos(bottom, 0))
    }

    #[must_use]
    pub fn info(&self) -> PaneInfo {
        PaneInfo {
            id: self.id,
            view_column: self.view_column,
            kind: self.kind,
            visible_ranges: vec![self.visible_range()],
            selections: self.selections.clone(),
        }
    }

    fn clamp_top_line(&self, line: usize) -> usize {
        line.min(self.document.line_count().saturating_sub(1))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPaneHost {
    panes: Vec<InMemoryPane>,
    next_pane_id: usize,
    next_decoration_id: u64,
    /// Live decorations only. Disposing one removes it from here.
    decorations: HashMap<DecorationId, HashMap<PaneId, Vec<Range>>>,
    focused: Option<PaneId>,
    reveal_log: Vec<(PaneId, Range, RevealType)>,
    outbox: Vec<SyncEvent>,
    maybe_sender: Option<mpsc::Sender<SyncEvent>>,
}

impl InMemoryPaneHost {
    /// Add an editor pane showing `text`. Fires [`SyncEvent::PaneSetChanged`].
    pub fn add_pane(&mut self, text: &str, view_column: ViewColumn) -> PaneId {
        self.add_pane_with(PaneKind::Editor, Some(view_column), text)
    }

    /// Add an auxiliary pane (think build output). Fires [`SyncEvent::PaneSetChanged`].
    pub fn add_output_pane(&mut self, text: &str, view_column: ViewColumn) -> PaneId {
        self.add_pane_with(PaneKind::Output, Some(view_column), text)
    }

    pub fn add_pane_with(
        &mut self,
        kind: PaneKind,
        view_column: Option<ViewColumn>,
        text: &str,
    ) -> PaneId {
        let id = PaneId(self.next_pane_id);
        self.next_pane_id += 1;
        self.panes.push(InMemoryPane {
            id,
            view_column,
            kind,
            document: LinesDocument::from_text(text),
            top_line: 0,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            selections: vec![Range::empty(pos(0, 0))],
        });
        self.emit(SyncEvent::PaneSetChanged);
        id
    }

    /// Remove a pane, and whatever decorations it showed. Fires
    /// [`SyncEvent::PaneSetChanged`] if the pane existed.
    pub fn close_pane(&mut self, pane: PaneId) -> bool {
        let count_before = self.panes.len();
        self.panes.retain(|it| it.id != pane);
        if self.panes.len() == count_before {
            return false;
        }
        for ranges_by_pane in self.decorations.values_mut() {
            ranges_by_pane.remove(&pane);
        }
        if self.focused == Some(pane) {
            self.focused = None;
        }
        self.emit(SyncEvent::PaneSetChanged);
        true
    }

    #[must_use]
    pub fn pane(&self, pane: PaneId) -> Option<&InMemoryPane> {
        self.panes.iter().find(|it| it.id == pane)
    }

    fn pane_mut(&mut self, pane: PaneId) -> Option<&mut InMemoryPane> {
        self.panes.iter_mut().find(|it| it.id == pane)
    }

    #[must_use]
    pub fn panes(&self) -> &[InMemoryPane] { &self.panes }

    #[must_use]
    pub fn top_line(&self, pane: PaneId) -> Option<usize> {
        self.pane(pane).map(|it| it.top_line)
    }

    /// Move the viewport without firing anything.
    pub fn set_top_line(&mut self, pane: PaneId, line: usize) {
        if let Some(it) = self.pane_mut(pane) {
            it.top_line = it.clamp_top_line(line);
        }
    }

    pub fn set_viewport_height(&mut self, pane: PaneId, viewport_height: usize) {
        if let Some(it) = self.pane_mut(pane) {
            it.viewport_height = viewport_height;
        }
    }

    /// Change selections without firing anything.
    pub fn set_selections(&mut self, pane: PaneId, selections: Vec<Range>) {
        if let Some(it) = self.pane_mut(pane) {
            it.selections = selections;
        }
    }

    /// The user scrolled `pane` so that `line` is at the top. Returns the viewport event,
    /// or `None` if the pane is unknown or didn't move.
    pub fn user_scroll(&mut self, pane: PaneId, line: usize) -> Option<SyncEvent> {
        let it = self.pane_mut(pane)?;
        let line = it.clamp_top_line(line);
        if it.top_line == line {
            return None;
        }
        it.top_line = line;
        Some(SyncEvent::VisibleRangesChanged {
            pane,
            visible_ranges: vec![it.visible_range()],
        })
    }

    /// The user changed the selections in `pane`. Returns the selection event, or `None`
    /// if the pane is unknown.
    pub fn user_select(&mut self, pane: PaneId, selections: Vec<Range>) -> Option<SyncEvent> {
        let it = self.pane_mut(pane)?;
        it.selections.clone_from(&selections);
        Some(SyncEvent::SelectionChanged { pane, selections })
    }

    #[must_use]
    pub fn focused(&self) -> Option<PaneId> { self.focused }

    #[must_use]
    pub fn reveal_log(&self) -> &[(PaneId, Range, RevealType)] { &self.reveal_log }

    #[must_use]
    pub fn live_decoration_count(&self) -> usize { self.decorations.len() }

    /// Every range any live decoration shows in `pane`, sorted.
    #[must_use]
    pub fn live_decorations_in(&self, pane: PaneId) -> Vec<Range> {
        let mut acc: Vec<Range> = self
            .decorations
            .values()
            .filter_map(|ranges_by_pane| ranges_by_pane.get(&pane))
            .flatten()
            .copied()
            .collect();
        acc.sort();
        acc
    }

    /// Send host fired events to `sender` from now on, instead of the outbox.
    pub fn attach_sender(&mut self, sender: mpsc::Sender<SyncEvent>) {
        self.maybe_sender = Some(sender);
    }

    /// Take everything in the outbox.
    pub fn drain_events(&mut self) -> Vec<SyncEvent> { std::mem::take(&mut self.outbox) }

    /// Feed outbox events to `engine`, and fire the debounce deadline whenever the outbox
    /// runs dry and a reveal is pending, until nothing is left to do. Returns the number
    /// of steps taken, which is capped at [`MAX_SETTLE_STEPS`].
    pub fn settle(
        &mut self,
        engine: &mut SyncEngine,
        clipboard: &mut impl ClipboardService,
    ) -> usize {
        let mut steps = 0;
        while steps < MAX_SETTLE_STEPS {
            let events = self.drain_events();
            if !events.is_empty() {
                for event in events {
                    engine.apply_event(event, self, clipboard);
                    steps += 1;
                }
            } else if engine.has_pending_reveal() {
                engine.on_debounce_elapsed(self);
                steps += 1;
            } else {
                break;
            }
        }
        steps
    }

    fn emit(&mut self, event: SyncEvent) {
        match &self.maybe_sender {
            Some(sender) => {
                if let Err(error) = sender.try_send(event) {
                    tracing::warn!(
                        message = "Could not deliver host event",
                        error = %error,
                    );
                }
            }
            None => self.outbox.push(event),
        }
    }
}

impl PaneHost for InMemoryPaneHost {
    fn visible_panes(&self) -> Vec<PaneInfo> {
        self.panes.iter().map(InMemoryPane::info).collect()
    }

    fn document(&self, pane: PaneId) -> Option<&dyn PaneDocument> {
        self.pane(pane).map(|it| -> &dyn PaneDocument { &it.document })
    }

    fn reveal_range(&mut self, pane: PaneId, range: Range, reveal_type: RevealType) {
        let Some(it) = self.pane_mut(pane) else {
            return;
        };
        let line = range.start().line;
        let new_top_line = match reveal_type {
            RevealType::AtTop => it.clamp_top_line(line),
            RevealType::Default if line < it.top_line => line,
            RevealType::Default if line >= it.top_line + it.viewport_height => {
                it.clamp_top_line(line + 1 - it.viewport_height.max(1))
            }
            RevealType::Default => it.top_line,
        };
        let maybe_echo = (new_top_line != it.top_line).then(|| {
            it.top_line = new_top_line;
            SyncEvent::VisibleRangesChanged {
                pane,
                visible_ranges: vec![it.visible_range()],
            }
        });

        self.reveal_log.push((pane, range, reveal_type));
        if let Some(echo) = maybe_echo {
            self.emit(echo);
        }
    }

    fn create_decoration(&mut self, _style: DecorationStyle) -> DecorationId {
        let id = DecorationId(self.next_decoration_id);
        self.next_decoration_id += 1;
        self.decorations.insert(id, HashMap::new());
        id
    }

    fn set_decorations(&mut self, pane: PaneId, decoration: DecorationId, ranges: Vec<Range>) {
        if self.pane(pane).is_none() {
            return;
        }
        if let Some(ranges_by_pane) = self.decorations.get_mut(&decoration) {
            ranges_by_pane.insert(pane, ranges);
        }
    }

    fn dispose_decoration(&mut self, decoration: DecorationId) {
        self.decorations.remove(&decoration);
    }

    fn show_pane(&mut self, pane: PaneId, selection: Range) {
        if let Some(it) = self.pane_mut(pane) {
            it.selections = vec![selection];
            self.focused = Some(pane);
        }
    }
}
