// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Translate positions and ranges from a source pane into a target pane.
//!
//! There are two correspondence models (see [Correspondence]):
//!
//! ```text
//! LineLocked                         Offset(-3)
//! source     target                  source     target
//! ┌──────┐   ┌──────┐                ┌──────┐   ┌──────┐
//! │ 10 ▸ │──▶│ 10 ▸ │                │ 10 ▸ │─┐ │  7 ▸ │
//! │ 11   │   │ 11   │                │ 11   │ └▶│  8   │
//! └──────┘   └──────┘                └──────┘   └──────┘
//! ```
//!
//! Every function here is pure. Nothing panics on out of range input: lines clamp to the
//! target document, and characters scale proportionally to the target line length.

use crate::{PaneDocument, Position, Range, pos};

/// How a line in one pane corresponds to a line in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correspondence {
    /// Line `n` maps to line `n`. Only line level, the character is always `0`.
    LineLocked,
    /// Line `n` maps to line `n + offset`, and the character is scaled proportionally to
    /// the line lengths.
    Offset(i64),
}

/// `floor(character / source_line_len * target_line_len)`, in integer arithmetic so
/// there's no float rounding. A zero length source line maps to `0`. The result never
/// exceeds `target_line_len`.
#[must_use]
pub fn proportional_character(
    character: usize,
    source_line_len: usize,
    target_line_len: usize,
) -> usize {
    if source_line_len == 0 {
        return 0;
    }
    let scaled = (character as u128 * target_line_len as u128) / source_line_len as u128;
    usize::try_from(scaled)
        .unwrap_or(usize::MAX)
        .min(target_line_len)
}

/// `line + offset`, clamped to `[0, line_count - 1]`. An empty document clamps to `0`.
#[must_use]
pub fn clamp_line(line: usize, offset: i64, line_count: usize) -> usize {
    let last_line = line_count.saturating_sub(1);
    let shifted = i64::try_from(line)
        .unwrap_or(i64::MAX)
        .saturating_add(offset);
    if shifted <= 0 {
        0
    } else {
        usize::try_from(shifted)
            .unwrap_or(usize::MAX)
            .min(last_line)
    }
}

/// Map a single position.
#[must_use]
pub fn map_position(
    position: Position,
    correspondence: Correspondence,
    source: &dyn PaneDocument,
    target: &dyn PaneDocument,
) -> Position {
    match correspondence {
        Correspondence::LineLocked => {
            pos(clamp_line(position.line, 0, target.line_count()), 0)
        }
        Correspondence::Offset(offset) => {
            let line = clamp_line(position.line, offset, target.line_count());
            let character = proportional_character(
                position.character,
                source.line_len(position.line),
                target.line_len(line),
            );
            pos(line, character)
        }
    }
}

/// Map a range as a line anchored block: the start is mapped with [`map_position()`],
/// the end is the start of the line after it. When the mapped line is the last line of
/// the target, the end is the end of that line instead, so the range stays inside the
/// document.
///
/// Used for scroll reveals and mirrored highlights.
#[must_use]
pub fn map_range(
    range: Range,
    correspondence: Correspondence,
    source: &dyn PaneDocument,
    target: &dyn PaneDocument,
) -> Range {
    let start = map_position(range.start(), correspondence, source, target);
    let end = if start.line + 1 < target.line_count() {
        pos(start.line + 1, 0)
    } else {
        pos(start.line, target.line_len(start.line))
    };
    Range::new(start, end)
}

/// Map both ends of a range independently, so a selection keeps its shape across panes
/// with different content. Used by the jump and copy commands.
#[must_use]
pub fn map_range_exact(
    range: Range,
    correspondence: Correspondence,
    source: &dyn PaneDocument,
    target: &dyn PaneDocument,
) -> Range {
    Range::new(
        map_position(range.start(), correspondence, source, target),
        map_position(range.end(), correspondence, source, target),
    )
}
