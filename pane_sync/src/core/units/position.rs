// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

/// A location in a document, addressed by line and by character within that line. Both
/// are zero based.
///
/// Positions are ordered in document order: first by `line`, then by `character`. This
/// is the derived [Ord] since the fields are declared in that order.
///
/// ```text
/// R ┌──────────┐
/// 0 │abc       │
/// 1 │ab▾       │  <- pos(1, 2)
/// 2 │a         │
///   └──────────┘
///   C0123456789
/// ```
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

/// Short constructor for a [Position].
#[must_use]
pub const fn pos(line: usize, character: usize) -> Position { Position { line, character } }

impl Position {
    /// The start of the given line.
    #[must_use]
    pub const fn line_start(line: usize) -> Self { pos(line, 0) }
}

impl From<(usize, usize)> for Position {
    fn from((line, character): (usize, usize)) -> Self { pos(line, character) }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}
