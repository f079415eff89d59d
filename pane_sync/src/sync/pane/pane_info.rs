// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::Range;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

/// Stable identity of a pane, for as long as the host keeps it visible. The engine only
/// ever holds panes by this id, never by reference.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PaneId(pub usize);

impl Display for PaneId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { write!(f, "pane#{}", self.0) }
}

/// The column a pane occupies in the host's split layout, left to right, starting at 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ViewColumn(pub u16);

/// `Output` panes (logs, terminals, build output) are auxiliary. They are never a
/// driver, never a target, and don't count towards the "two or more panes" rule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaneKind {
    #[default]
    Editor,
    Output,
}

/// Snapshot of one visible pane, as reported by [`crate::PaneHost::visible_panes()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneInfo {
    pub id: PaneId,
    /// `None` means the host doesn't consider this a real editor pane (e.g. an inline
    /// diff peek). Events from such panes are ignored.
    pub view_column: Option<ViewColumn>,
    pub kind: PaneKind,
    /// The first entry is the viewport that matters. Hosts that fold code report more
    /// than one.
    pub visible_ranges: Vec<Range>,
    /// The first entry is the primary selection.
    pub selections: Vec<Range>,
}

impl PaneInfo {
    /// Can this pane take part in sync at all (as a driver or a target)?
    #[must_use]
    pub fn is_eligible(&self) -> bool { self.kind != PaneKind::Output }

    /// Can events from this pane start a sync burst?
    #[must_use]
    pub fn is_real_editor(&self) -> bool { self.is_eligible() && self.view_column.is_some() }

    /// First visible line, or `0` if the host reported no visible range.
    #[must_use]
    pub fn visible_start_line(&self) -> usize {
        self.visible_ranges
            .first()
            .map_or(0, |range| range.start().line)
    }

    #[must_use]
    pub fn primary_selection(&self) -> Option<Range> { self.selections.first().copied() }
}

/// Are there enough eligible panes on screen for sync to make sense?
#[must_use]
pub fn has_split_panes(panes: &[PaneInfo]) -> bool {
    panes.iter().filter(|pane| pane.is_eligible()).count() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range;

    fn pane(id: usize, kind: PaneKind, view_column: Option<u16>) -> PaneInfo {
        PaneInfo {
            id: PaneId(id),
            view_column: view_column.map(ViewColumn),
            kind,
            visible_ranges: vec![range((7, 0), (30, 0))],
            selections: vec![],
        }
    }

    #[test]
    fn test_eligibility() {
        assert!(pane(0, PaneKind::Editor, Some(1)).is_real_editor());
        assert!(pane(0, PaneKind::Editor, None).is_eligible());
        assert!(!pane(0, PaneKind::Editor, None).is_real_editor());
        assert!(!pane(0, PaneKind::Output, Some(2)).is_eligible());
    }

    #[test]
    fn test_has_split_panes_ignores_output() {
        let panes = vec![
            pane(0, PaneKind::Editor, Some(1)),
            pane(1, PaneKind::Output, Some(2)),
        ];
        assert!(!has_split_panes(&panes));

        let panes = vec![
            pane(0, PaneKind::Editor, Some(1)),
            pane(1, PaneKind::Editor, Some(2)),
        ];
        assert!(has_split_panes(&panes));
    }

    #[test]
    fn test_visible_start_line() {
        assert_eq!(pane(0, PaneKind::Editor, Some(1)).visible_start_line(), 7);
        let mut it = pane(0, PaneKind::Editor, Some(1));
        it.visible_ranges.clear();
        assert_eq!(it.visible_start_line(), 0);
    }
}
