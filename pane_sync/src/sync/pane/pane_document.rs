// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::Range;

/// Read only view of the text shown in a pane. The engine needs line metrics for the
/// position mapper, and text for the copy commands. It never owns the content.
pub trait PaneDocument {
    fn line_count(&self) -> usize;

    /// Length of `line` in characters. Lines past the end have length `0`.
    fn line_len(&self, line: usize) -> usize;

    /// Text covered by `range`. Out of bounds parts of the range are clipped.
    fn text_in_range(&self, range: Range) -> String;
}

/// Lines of text held in memory. This is what [`crate::InMemoryPaneHost`] uses, and it
/// is handy for any host that already has the document split into lines.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinesDocument {
    lines: Vec<String>,
}

impl LinesDocument {
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self { Self { lines } }

    /// Splits on `\n`. A trailing `\r` on each line is dropped.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
                .collect(),
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] { &self.lines }
}

impl PaneDocument for LinesDocument {
    fn line_count(&self) -> usize { self.lines.len() }

    fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |it| it.chars().count())
    }

    fn text_in_range(&self, range: Range) -> String {
        let (start, end) = (range.start(), range.end());
        let mut acc: Vec<String> = vec![];
        for line_index in start.line..=end.line {
            let Some(line) = self.lines.get(line_index) else {
                break;
            };
            let from = if line_index == start.line { start.character } else { 0 };
            let to = if line_index == end.line { end.character } else { usize::MAX };
            acc.push(line.chars().skip(from).take(to.saturating_sub(from)).collect());
        }
        acc.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range;
    use pretty_assertions::assert_eq;

    fn doc() -> LinesDocument { LinesDocument::from_text("hello world\nfoo\r\nbar baz") }

    #[test]
    fn test_line_metrics() {
        let it = doc();
        assert_eq!(it.line_count(), 3);
        assert_eq!(it.line_len(0), 11);
        assert_eq!(it.line_len(1), 3);
        assert_eq!(it.line_len(99), 0);
    }

    #[test]
    fn test_text_in_single_line_range() {
        assert_eq!(doc().text_in_range(range((0, 6), (0, 11))), "world");
    }

    #[test]
    fn test_text_in_multi_line_range() {
        assert_eq!(doc().text_in_range(range((0, 6), (2, 3))), "world\nfoo\nbar");
    }

    #[test]
    fn test_text_in_range_is_clipped() {
        assert_eq!(doc().text_in_range(range((2, 4), (9, 0))), "baz");
        assert_eq!(doc().text_in_range(range((1, 1), (1, 50))), "oo");
    }

    #[test]
    fn test_whole_line_range_ends_at_next_line_start() {
        assert_eq!(doc().text_in_range(range((1, 0), (2, 0))), "foo\n");
    }
}
