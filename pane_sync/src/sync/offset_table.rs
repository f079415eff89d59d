// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{PaneId, PaneInfo};
use std::collections::HashMap;

/// Per pane line offsets, relative to the current driver, captured the moment a new
/// driver takes over in [`crate::SyncMode::Offset`].
///
/// ```text
/// driver A (top 5)   B (top 0)    C (top 12)
/// ┌──────┐           ┌──────┐     ┌──────┐
/// │  5   │           │  0   │     │ 12   │
/// └──────┘           └──────┘     └──────┘
/// offsets:           B: -5        C: +7
/// ```
///
/// The table is only ever rebuilt as a whole ([`Self::rebuild_for_driver()`]) or cleared
/// as a whole ([`Self::clear()`]). Reading a pane that has no entry yields `0`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OffsetTable {
    offsets: HashMap<PaneId, i64>,
}

impl OffsetTable {
    /// Offset for `pane`, `0` when there's no entry.
    #[must_use]
    pub fn get(&self, pane: PaneId) -> i64 { self.offsets.get(&pane).copied().unwrap_or(0) }

    #[must_use]
    pub fn contains(&self, pane: PaneId) -> bool { self.offsets.contains_key(&pane) }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.offsets.is_empty() }

    #[must_use]
    pub fn len(&self) -> usize { self.offsets.len() }

    pub fn clear(&mut self) { self.offsets.clear(); }

    /// Replace the whole table with `other.visible_start_line - driver.visible_start_line`
    /// for every `other` in `targets`. The driver itself is skipped if present.
    pub fn rebuild_for_driver<'a>(
        &mut self,
        driver: &PaneInfo,
        targets: impl IntoIterator<Item = &'a PaneInfo>,
    ) {
        let driver_top = line_as_i64(driver.visible_start_line());
        self.offsets = targets
            .into_iter()
            .filter(|pane| pane.id != driver.id)
            .map(|pane| (pane.id, line_as_i64(pane.visible_start_line()) - driver_top))
            .collect();
    }

    pub fn iter(&self) -> impl Iterator<Item = (PaneId, i64)> + '_ {
        self.offsets.iter().map(|(pane, offset)| (*pane, *offset))
    }
}

fn line_as_i64(line: usize) -> i64 { i64::try_from(line).unwrap_or(i64::MAX) }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PaneKind, ViewColumn, range};
    use pretty_assertions::assert_eq;

    fn pane_at(id: usize, top: usize) -> PaneInfo {
        PaneInfo {
            id: PaneId(id),
            view_column: Some(ViewColumn(u16::try_from(id + 1).unwrap())),
            kind: PaneKind::Editor,
            visible_ranges: vec![range((top, 0), (top + 20, 0))],
            selections: vec![],
        }
    }

    #[test]
    fn test_missing_entry_reads_as_zero() {
        let table = OffsetTable::default();
        assert_eq!(table.get(PaneId(42)), 0);
        assert!(!table.contains(PaneId(42)));
    }

    #[test]
    fn test_rebuild_for_driver() {
        let panes = vec![pane_at(0, 5), pane_at(1, 0), pane_at(2, 12)];
        let mut table = OffsetTable::default();
        table.rebuild_for_driver(&panes[0], &panes);

        assert_eq!(table.len(), 2);
        assert!(!table.contains(PaneId(0)));
        assert_eq!(table.get(PaneId(1)), -5);
        assert_eq!(table.get(PaneId(2)), 7);
    }

    #[test]
    fn test_rebuild_replaces_previous_entries() {
        let panes = vec![pane_at(0, 5), pane_at(1, 0), pane_at(2, 12)];
        let mut table = OffsetTable::default();
        table.rebuild_for_driver(&panes[0], &panes);
        table.rebuild_for_driver(&panes[1], &panes[..2]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(PaneId(0)), 5);
        assert!(!table.contains(PaneId(2)));
    }

    #[test]
    fn test_clear() {
        let panes = vec![pane_at(0, 5), pane_at(1, 0)];
        let mut table = OffsetTable::default();
        table.rebuild_for_driver(&panes[0], &panes);
        table.clear();
        assert!(table.is_empty());
    }
}
