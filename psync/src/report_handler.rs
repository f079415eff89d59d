// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! How `main() -> miette::Result<()>` renders a failure: fancy graphical report, wrapped
//! to the terminal, with a footer pointing at the issue tracker.

use miette::MietteHandlerOpts;

pub const ISSUES_URL: &str = "https://github.com/r3bl-org/r3bl-open-core/issues/new";

/// Used when stdout isn't a terminal (piped into a file, CI).
pub const FALLBACK_REPORT_WIDTH: usize = 100;
/// Narrower than this and the source snippets become unreadable.
pub const MIN_REPORT_WIDTH: usize = 40;

/// Width to wrap reports at, given the terminal's column count if there is one.
#[must_use]
pub fn report_width(maybe_columns: Option<u16>) -> usize {
    maybe_columns.map_or(FALLBACK_REPORT_WIDTH, |columns| {
        usize::from(columns).max(MIN_REPORT_WIDTH)
    })
}

/// Installs the hook once per process. The terminal is measured each time a report is
/// rendered, so a resize between startup and the failure is honored. Later calls are
/// ignored.
pub fn install_report_handler(footer: &'static str) {
    let result = miette::set_hook(Box::new(move |_diagnostic| {
        let maybe_columns = crossterm::terminal::size().ok().map(|(columns, _rows)| columns);
        Box::new(
            MietteHandlerOpts::new()
                .width(report_width(maybe_columns))
                .wrap_lines(true)
                .break_words(false)
                .context_lines(2)
                .with_cause_chain()
                .footer(footer.to_string())
                .build(),
        )
    }));

    if result.is_err() {
        tracing::debug!(message = "miette report handler was already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(None, FALLBACK_REPORT_WIDTH ; "not a terminal")]
    #[test_case(Some(20), MIN_REPORT_WIDTH ; "tiny terminal is clamped")]
    #[test_case(Some(132), 132 ; "wide terminal is used as is")]
    fn test_report_width(maybe_columns: Option<u16>, expected: usize) {
        assert_eq!(report_width(maybe_columns), expected);
    }
}
