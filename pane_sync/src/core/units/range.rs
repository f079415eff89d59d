// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Position, pos};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

/// An ordered pair of [Position]s, `start <= end` in document order. The end is
/// exclusive. A range where `start == end` is empty, and represents a cursor rather than
/// a selection.
///
/// The only way to get a [Range] is via [`Range::new()`] (or [`range()`]), which
/// normalizes the order of the two positions, so the invariant always holds.
///
/// ```text
/// R ┌──────────┐
/// 0 │ab▓▓▓▓▓▓▓▓│  <- start = 0:2
/// 1 │▓▓▓▓c     │  <- end   = 1:4
///   └──────────┘
///   C0123456789
/// ```
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
pub struct Range {
    start: Position,
    end: Position,
}

/// Short constructor for a [Range]. The arguments may be in any order.
#[must_use]
pub fn range(start: impl Into<Position>, end: impl Into<Position>) -> Range {
    Range::new(start.into(), end.into())
}

impl Range {
    #[must_use]
    pub fn new(one: Position, other: Position) -> Self {
        if one <= other {
            Self {
                start: one,
                end: other,
            }
        } else {
            Self {
                start: other,
                end: one,
            }
        }
    }

    /// A cursor at the given position.
    #[must_use]
    pub fn empty(at: Position) -> Self { Self { start: at, end: at } }

    /// The whole of `line`, expressed as "start of `line`" up to "start of the next
    /// line".
    #[must_use]
    pub fn whole_line(line: usize) -> Self {
        Self {
            start: pos(line, 0),
            end: pos(line + 1, 0),
        }
    }

    #[must_use]
    pub fn start(&self) -> Position { self.start }

    #[must_use]
    pub fn end(&self) -> Position { self.end }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.start == self.end }

    #[must_use]
    pub fn is_single_line(&self) -> bool { self.start.line == self.end.line }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }
}

/// Deserialization goes through [`Range::new()`] so that a `start` that comes after
/// `end` on the wire is still normalized.
impl<'de> Deserialize<'de> for Range {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            start: Position,
            end: Position,
        }
        let Raw { start, end } = Raw::deserialize(deserializer)?;
        Ok(Range::new(start, end))
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "[{}..{})", self.start, self.end)
    }
}
