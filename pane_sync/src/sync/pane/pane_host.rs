// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{PaneDocument, PaneId, PaneInfo};
use crate::Range;
use serde::{Deserialize, Serialize};

/// Where a revealed range should end up in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealType {
    /// Scroll so the start of the range is the first visible line.
    AtTop,
    /// Scroll the minimum amount to make the range visible.
    Default,
}

/// Handle to a decoration style created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecorationId(pub u64);

/// The look of a decoration. The host maps this to its own theme.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecorationStyle {
    /// Same background as an unfocused selection.
    #[default]
    InactiveSelection,
}

/// Abstraction for the editor host, for dependency injection. The engine reads pane
/// snapshots and documents through it, and pushes reveals, highlights and focus changes
/// back into it.
///
/// Implementations must tolerate calls with stale [`PaneId`]s (a pane that closed
/// between an event and the engine reacting to it) by ignoring them.
///
/// A host that implements [`reveal_range()`](Self::reveal_range) will usually fire a
/// "visible ranges changed" event for the target pane afterwards. That's expected; see
/// [`crate::EchoSuppressionQueue`].
pub trait PaneHost {
    /// Currently visible panes, in no particular order.
    fn visible_panes(&self) -> Vec<PaneInfo>;

    /// The document shown in `pane`, or `None` if the pane is gone.
    fn document(&self, pane: PaneId) -> Option<&dyn PaneDocument>;

    fn reveal_range(&mut self, pane: PaneId, range: Range, reveal_type: RevealType);

    fn create_decoration(&mut self, style: DecorationStyle) -> DecorationId;

    /// Replace the set of ranges `decoration` covers in `pane`.
    fn set_decorations(&mut self, pane: PaneId, decoration: DecorationId, ranges: Vec<Range>);

    /// Remove `decoration` from every pane and forget it.
    fn dispose_decoration(&mut self, decoration: DecorationId);

    /// Focus `pane` and set its selection.
    fn show_pane(&mut self, pane: PaneId, selection: Range);

    /// Snapshot of a single pane.
    fn pane_info(&self, pane: PaneId) -> Option<PaneInfo> {
        self.visible_panes().into_iter().find(|it| it.id == pane)
    }
}
