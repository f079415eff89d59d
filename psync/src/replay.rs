// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CLIArg, DEBUG_PSYNC_MOD, PaneSyncErrorCouldNot, ScriptStep, try_read_script,
            try_resolve_mode_store_path};
use miette::{Context, IntoDiagnostic};
use r3bl_pane_sync::{ClipboardService, EventDisposition, InMemoryPaneHost, KvModeStore,
                     PaneId, Range, SyncCommand, SyncConfig, SyncEngine, SyncEvent,
                     SyncMode, SyncStats, SystemClipboard, ViewColumn};
use std::{fmt::{Display, Formatter},
          time::Duration};

/// Where one pane ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneReport {
    pub file_path: String,
    pub top_line: usize,
    pub selections: Vec<Range>,
    pub highlights: Vec<Range>,
    pub focused: bool,
}

/// The outcome of a replay. Closed panes are left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub mode: SyncMode,
    pub panes: Vec<PaneReport>,
    pub copied: Vec<String>,
    pub stats: SyncStats,
}

impl Display for ReplayReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "mode: {}", self.mode)?;
        for pane in &self.panes {
            let fmt_ranges = |ranges: &[Range]| {
                ranges
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            };
            writeln!(
                f,
                "{marker} {path}: top {top}, selections [{selections}], highlights [{highlights}]",
                marker = if pane.focused { "▸" } else { " " },
                path = pane.file_path,
                top = pane.top_line,
                selections = fmt_ranges(&pane.selections),
                highlights = fmt_ranges(&pane.highlights),
            )?;
        }
        for (index, payload) in self.copied.iter().enumerate() {
            writeln!(f, "copy #{index}: {payload:?}")?;
        }
        write!(
            f,
            "driver changes: {}, reveals: {}, echoes swallowed: {}, highlights: {}, resets: {}",
            self.stats.driver_changes,
            self.stats.reveals_issued,
            self.stats.echoes_swallowed,
            self.stats.highlights_drawn,
            self.stats.resets,
        )
    }
}

/// Plays [`ScriptStep`]s against an engine and an [`InMemoryPaneHost`].
///
/// Time is real: a scroll schedules a reveal on the engine's debounce deadline, and
/// the reveal only happens once a later step (usually [`ScriptStep::WaitMs`]) finds the
/// deadline elapsed. Whatever is still pending when the script ends is flushed by
/// [`Replayer::finish()`].
#[derive(Debug)]
pub struct Replayer<C: ClipboardService> {
    engine: SyncEngine,
    host: InMemoryPaneHost,
    clipboard: C,
    panes: Vec<(PaneId, String)>,
    copied: Vec<String>,
}

impl<C: ClipboardService> Replayer<C> {
    /// Open each `(file_path, text)` in its own view column, left to right.
    pub fn new(files: Vec<(String, String)>, mut engine: SyncEngine, clipboard: C) -> Self {
        let mut host = InMemoryPaneHost::default();
        let mut panes = vec![];
        for (index, (file_path, text)) in files.into_iter().enumerate() {
            let view_column = ViewColumn(u16::try_from(index + 1).unwrap_or(u16::MAX));
            panes.push((host.add_pane(&text, view_column), file_path));
        }
        host.drain_events();
        engine.activate(&mut host);

        Self {
            engine,
            host,
            clipboard,
            panes,
            copied: vec![],
        }
    }

    pub fn set_mode(&mut self, mode: SyncMode) {
        self.apply(SyncEvent::Command(SyncCommand::SetMode(mode)));
    }

    #[must_use]
    pub fn engine(&self) -> &SyncEngine { &self.engine }

    #[must_use]
    pub fn host(&self) -> &InMemoryPaneHost { &self.host }

    /// # Errors
    ///
    /// Returns an error if the step names a pane index that was never opened.
    pub async fn try_run_step(&mut self, step: ScriptStep) -> miette::Result<()> {
        DEBUG_PSYNC_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "▶️ Replaying step", step = ?step);
        });

        match step {
            ScriptStep::Scroll { pane, top } => {
                let pane = self.try_pane_id(pane)?;
                if let Some(event) = self.host.user_scroll(pane, top) {
                    self.apply(event);
                }
            }
            ScriptStep::Select { pane, selections } => {
                let pane = self.try_pane_id(pane)?;
                if let Some(event) = self.host.user_select(pane, selections) {
                    self.apply(event);
                }
            }
            ScriptStep::ToggleMode => {
                self.apply(SyncEvent::Command(SyncCommand::ToggleMode));
            }
            ScriptStep::Jump { pane } => {
                let pane = self.try_pane_id(pane)?;
                self.apply(SyncEvent::Command(
                    SyncCommand::JumpToCorrespondingPosition { pane },
                ));
            }
            ScriptStep::Copy { pane, scope } => {
                let pane = self.try_pane_id(pane)?;
                if let EventDisposition::Copied { payload } =
                    self.apply(SyncEvent::Command(SyncCommand::CopySelections { scope, pane }))
                {
                    self.copied.push(payload);
                }
            }
            ScriptStep::ClosePane { pane } => {
                let pane = self.try_pane_id(pane)?;
                self.host.close_pane(pane);
            }
            ScriptStep::WaitMs { ms } => {
                tokio::time::sleep(Duration::from_millis(ms)).await;
            }
        }

        self.pump();
        Ok(())
    }

    /// Flush anything pending and report.
    pub fn finish(mut self) -> ReplayReport {
        self.host.settle(&mut self.engine, &mut self.clipboard);

        let focused = self.host.focused();
        let panes = self
            .panes
            .iter()
            .filter_map(|(id, file_path)| {
                let pane = self.host.pane(*id)?;
                Some(PaneReport {
                    file_path: file_path.clone(),
                    top_line: pane.top_line,
                    selections: pane.selections.clone(),
                    highlights: self.host.live_decorations_in(*id),
                    focused: focused == Some(*id),
                })
            })
            .collect();

        ReplayReport {
            mode: self.engine.mode(),
            panes,
            copied: self.copied,
            stats: self.engine.stats(),
        }
    }

    fn apply(&mut self, event: SyncEvent) -> EventDisposition {
        self.engine
            .apply_event(event, &mut self.host, &mut self.clipboard)
    }

    /// Deliver host fired events, and fire the debounce deadline if it has elapsed.
    fn pump(&mut self) {
        loop {
            let events = self.host.drain_events();
            if !events.is_empty() {
                for event in events {
                    self.apply(event);
                }
            } else if self
                .engine
                .debounce()
                .has_elapsed_at(tokio::time::Instant::now())
            {
                self.engine.on_debounce_elapsed(&mut self.host);
            } else {
                break;
            }
        }
    }

    fn try_pane_id(&self, pane_index: usize) -> miette::Result<PaneId> {
        self.panes.get(pane_index).map(|(id, _)| *id).ok_or_else(|| {
            PaneSyncErrorCouldNot::FindPane {
                pane_index,
                pane_count: self.panes.len(),
            }
            .into()
        })
    }
}

/// Read the files and the script named in `cli_arg`, restore the saved mode, and replay.
///
/// # Errors
///
/// Returns an error if a file or the script can't be read, the script doesn't parse, the
/// mode store can't be opened, or a step names a pane that doesn't exist.
pub async fn try_replay(cli_arg: &CLIArg) -> miette::Result<ReplayReport> {
    let files = cli_arg
        .file_paths
        .iter()
        .map(|file_path| {
            std::fs::read_to_string(file_path)
                .into_diagnostic()
                .wrap_err(PaneSyncErrorCouldNot::ReadPaneFile {
                    file_path: file_path.clone(),
                })
                .map(|text| (file_path.clone(), text))
        })
        .collect::<miette::Result<Vec<_>>>()?;

    let steps = try_read_script(&cli_arg.script)?;

    let mode_store_path =
        try_resolve_mode_store_path(cli_arg.global_options.maybe_state_dir.as_ref())?;
    let store = KvModeStore::try_new(Some(&mode_store_path.to_string_lossy().to_string()))?;

    let config = SyncConfig::default()
        .with_debounce_delay(Duration::from_millis(cli_arg.global_options.debounce_ms));
    let engine = SyncEngine::new(config, Box::new(store));

    let mut replayer = Replayer::new(files, engine, SystemClipboard::default());
    if let Some(mode) = cli_arg.global_options.maybe_mode {
        replayer.set_mode(mode);
    }
    for step in steps {
        replayer.try_run_step(step).await?;
    }

    Ok(replayer.finish())
}
