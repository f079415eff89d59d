// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end properties of the engine, driven through [`InMemoryPaneHost`].
//!
//! - **Line lock**: in normal mode every pane settles on the driver's top line.
//! - **Offset stability**: in offset mode panes move by exactly as much as the driver.
//! - **No feedback amplification**: echoes never establish a driver.
//! - **Reset completeness** and **highlight replacement**.
//! - The two worked scenarios (proportional cursor mapping, clamping a short pane).

use pretty_assertions::assert_eq;
use r3bl_pane_sync::{EventDisposition, InMemoryModeStore, InMemoryPaneHost, KvModeStore,
                     MAX_SETTLE_STEPS, PaneId, SyncCommand, SyncConfig, SyncEngine,
                     SyncEvent, SyncMode, RecordingClipboard, ViewColumn, range,
                     try_create_temp_dir};
use serial_test::serial;

fn lines(count: usize, line_len: usize) -> String {
    vec!["x".repeat(line_len); count].join("\n")
}

fn engine(mode: SyncMode) -> SyncEngine {
    SyncEngine::new(
        SyncConfig::default().with_default_mode(mode),
        Box::new(InMemoryModeStore::default()),
    )
}

/// Apply a user scroll, then let the engine and host settle.
fn scroll_and_settle(
    engine: &mut SyncEngine,
    host: &mut InMemoryPaneHost,
    pane: PaneId,
    top: usize,
) {
    let mut clipboard = RecordingClipboard::default();
    if let Some(event) = host.user_scroll(pane, top) {
        engine.apply_event(event, host, &mut clipboard);
    }
    let steps = host.settle(engine, &mut clipboard);
    assert!(steps < MAX_SETTLE_STEPS, "engine never settled");
}

fn activated(mode: SyncMode, host: &mut InMemoryPaneHost) -> SyncEngine {
    let mut engine = engine(mode);
    host.drain_events();
    engine.activate(host);
    engine
}

#[test]
fn test_line_lock_invariant_across_drivers() {
    let mut host = InMemoryPaneHost::default();
    let panes = [
        host.add_pane(&lines(200, 10), ViewColumn(1)),
        host.add_pane(&lines(150, 40), ViewColumn(2)),
        host.add_pane(&lines(300, 5), ViewColumn(3)),
    ];
    let mut engine = activated(SyncMode::Normal, &mut host);

    let script = [(0, 10), (0, 120), (1, 40), (2, 280), (1, 3), (2, 149), (0, 199)];
    for (index, top) in script {
        let driver = panes[index];
        scroll_and_settle(&mut engine, &mut host, driver, top);

        let driver_top = host.top_line(driver).unwrap();
        for pane in panes {
            let last_line = host.pane(pane).unwrap().document.lines().len() - 1;
            assert_eq!(
                host.top_line(pane),
                Some(driver_top.min(last_line)),
                "{pane} after {driver} scrolled to {top}"
            );
        }
    }
}

#[test]
fn test_offset_stability() {
    let mut host = InMemoryPaneHost::default();
    let a = host.add_pane(&lines(100, 10), ViewColumn(1));
    let b = host.add_pane(&lines(100, 10), ViewColumn(2));
    let c = host.add_pane(&lines(50, 10), ViewColumn(3));
    host.set_top_line(b, 10);
    host.set_top_line(c, 30);
    let mut engine = activated(SyncMode::Offset, &mut host);

    scroll_and_settle(&mut engine, &mut host, a, 5);
    assert_eq!(engine.offset_table().get(b), 5);
    assert_eq!(engine.offset_table().get(c), 25);
    assert_eq!((host.top_line(b), host.top_line(c)), (Some(10), Some(30)));

    for k in [7, 3, 1] {
        let before = (host.top_line(b).unwrap(), host.top_line(c).unwrap());
        let top = host.top_line(a).unwrap() + k;
        scroll_and_settle(&mut engine, &mut host, a, top);
        assert_eq!(host.top_line(b), Some(before.0 + k));
        assert_eq!(host.top_line(c), Some(before.1 + k));
    }

    // C only has 50 lines.
    scroll_and_settle(&mut engine, &mut host, a, 40);
    assert_eq!(host.top_line(b), Some(45));
    assert_eq!(host.top_line(c), Some(49));
    assert_eq!(engine.stats().driver_changes, 1);
}

#[test]
fn test_no_feedback_amplification() {
    let mut host = InMemoryPaneHost::default();
    let panes = [
        host.add_pane(&lines(500, 10), ViewColumn(1)),
        host.add_pane(&lines(500, 10), ViewColumn(2)),
        host.add_pane(&lines(500, 10), ViewColumn(3)),
        host.add_pane(&lines(500, 10), ViewColumn(4)),
    ];
    let mut engine = activated(SyncMode::Normal, &mut host);

    let mut user_scrolls = 0;
    for step in 0..40_usize {
        let pane = panes[step % 3];
        scroll_and_settle(&mut engine, &mut host, pane, (step * 37) % 480);
        user_scrolls += 1;
    }

    let stats = engine.stats();
    assert!(stats.driver_changes <= user_scrolls);
    assert_eq!(stats.echoes_swallowed, stats.reveals_issued);
    assert!(engine.echo_queue().is_empty());
    assert!(panes[..3].contains(&engine.driver().unwrap()));
}

#[test]
fn test_echo_never_becomes_driver() {
    let mut host = InMemoryPaneHost::default();
    let a = host.add_pane(&lines(100, 10), ViewColumn(1));
    let b = host.add_pane(&lines(100, 10), ViewColumn(2));
    let mut engine = activated(SyncMode::Normal, &mut host);
    let mut clipboard = RecordingClipboard::default();

    let event = host.user_scroll(a, 30).unwrap();
    engine.apply_event(event, &mut host, &mut clipboard);
    engine.on_debounce_elapsed(&mut host);

    let echoes = host.drain_events();
    assert_eq!(echoes.len(), 1);
    for echo in echoes {
        assert_eq!(
            engine.apply_event(echo, &mut host, &mut clipboard),
            EventDisposition::EchoSwallowed
        );
    }
    assert_eq!(engine.driver(), Some(a));
    assert_eq!(host.top_line(b), Some(30));
}

#[test]
fn test_reset_completeness_on_pane_close() {
    let mut host = InMemoryPaneHost::default();
    let a = host.add_pane(&lines(100, 10), ViewColumn(1));
    let b = host.add_pane(&lines(100, 10), ViewColumn(2));
    let c = host.add_pane(&lines(100, 10), ViewColumn(3));
    host.set_top_line(c, 12);
    let mut engine = activated(SyncMode::Offset, &mut host);
    let mut clipboard = RecordingClipboard::default();

    let event = host.user_scroll(a, 20).unwrap();
    engine.apply_event(event, &mut host, &mut clipboard);
    let event = host.user_select(a, vec![range((21, 0), (22, 3))]).unwrap();
    engine.apply_event(event, &mut host, &mut clipboard);
    assert!(host.live_decoration_count() > 0);

    host.close_pane(b);
    host.settle(&mut engine, &mut clipboard);

    assert!(engine.offset_table().is_empty());
    assert_eq!(engine.driver(), None);
    assert!(engine.echo_queue().is_empty());
    assert!(!engine.debounce().is_armed());
    assert_eq!(host.live_decoration_count(), 0);
    // The pending reveal was dropped, so C never moved.
    assert_eq!(host.top_line(c), Some(12));
}

#[test]
fn test_highlight_replacement() {
    let mut host = InMemoryPaneHost::default();
    let a = host.add_pane(&lines(30, 10), ViewColumn(1));
    let b = host.add_pane(&lines(30, 10), ViewColumn(2));
    let c = host.add_pane(&lines(30, 10), ViewColumn(3));
    let mut engine = activated(SyncMode::Normal, &mut host);
    let mut clipboard = RecordingClipboard::default();

    for line in [2, 9, 17] {
        let event = host.user_select(a, vec![range((line, 1), (line, 4))]).unwrap();
        engine.apply_event(event, &mut host, &mut clipboard);
        assert_eq!(host.live_decoration_count(), 1);
        for target in [b, c] {
            assert_eq!(
                host.live_decorations_in(target),
                vec![range((line, 0), (line + 1, 0))]
            );
        }
    }
}

#[test]
fn test_scenario_proportional_cursor_in_offset_mode() {
    let mut host = InMemoryPaneHost::default();
    let a = host.add_pane(&lines(20, 10), ViewColumn(1));
    let b = host.add_pane(&lines(20, 20), ViewColumn(2));
    let mut engine = activated(SyncMode::Offset, &mut host);
    let mut clipboard = RecordingClipboard::default();

    // Before any scroll B has no offset recorded, which reads as 0.
    let event = host.user_select(a, vec![range((5, 5), (5, 5))]).unwrap();
    engine.apply_event(event, &mut host, &mut clipboard);
    assert_eq!(host.live_decorations_in(b), vec![range((5, 10), (6, 0))]);

    // Scrolling A to 5 records B's offset as 0 - 5, so B's mapped top is 5 - 5 = 0 and
    // B is left where it is.
    scroll_and_settle(&mut engine, &mut host, a, 5);
    assert_eq!(engine.offset_table().get(b), -5);
    assert_eq!(host.top_line(b), Some(0));
    assert_eq!(engine.stats().reveals_issued, 0);
}

#[test]
fn test_scenario_short_pane_clamps() {
    let mut host = InMemoryPaneHost::default();
    let a = host.add_pane(&lines(200, 10), ViewColumn(1));
    let b = host.add_pane(&lines(50, 10), ViewColumn(2));
    let mut engine = activated(SyncMode::Normal, &mut host);

    scroll_and_settle(&mut engine, &mut host, a, 100);
    assert_eq!(host.top_line(b), Some(49));
}

#[test]
fn test_mode_off_mirrors_nothing() {
    let mut host = InMemoryPaneHost::default();
    let a = host.add_pane(&lines(100, 10), ViewColumn(1));
    let b = host.add_pane(&lines(100, 10), ViewColumn(2));
    let mut engine = activated(SyncMode::Normal, &mut host);
    let mut clipboard = RecordingClipboard::default();

    let disposition = engine.apply_event(
        SyncEvent::Command(SyncCommand::ToggleMode),
        &mut host,
        &mut clipboard,
    );
    assert_eq!(disposition, EventDisposition::ModeChanged { mode: SyncMode::Offset });
    engine.apply_event(SyncEvent::Command(SyncCommand::ToggleMode), &mut host, &mut clipboard);
    assert_eq!(engine.mode(), SyncMode::Off);

    scroll_and_settle(&mut engine, &mut host, a, 60);
    assert_eq!(host.top_line(b), Some(0));
    assert_eq!(engine.stats().driver_changes, 0);
}

#[test]
fn test_output_pane_is_left_alone() {
    let mut host = InMemoryPaneHost::default();
    let a = host.add_pane(&lines(100, 10), ViewColumn(1));
    let b = host.add_pane(&lines(100, 10), ViewColumn(2));
    let log = host.add_output_pane(&lines(100, 10), ViewColumn(3));
    let mut engine = activated(SyncMode::Normal, &mut host);

    scroll_and_settle(&mut engine, &mut host, a, 25);
    assert_eq!(host.top_line(b), Some(25));
    assert_eq!(host.top_line(log), Some(0));

    scroll_and_settle(&mut engine, &mut host, log, 80);
    assert_eq!(host.top_line(a), Some(25));
    assert_eq!(engine.driver(), Some(a));
}

#[test]
#[serial]
fn test_mode_survives_engine_restart() {
    let root_temp_dir = try_create_temp_dir().unwrap();
    let path_str = root_temp_dir.join("state").to_string_lossy().to_string();
    let mut host = InMemoryPaneHost::default();

    {
        let store = KvModeStore::try_new(Some(&path_str)).unwrap();
        let mut engine = SyncEngine::new(SyncConfig::default(), Box::new(store));
        assert_eq!(engine.mode(), SyncMode::Normal);
        assert_eq!(engine.toggle_mode(&mut host), SyncMode::Offset);
    }

    let store = KvModeStore::try_new(Some(&path_str)).unwrap();
    let engine = SyncEngine::new(SyncConfig::default(), Box::new(store));
    assert_eq!(engine.mode(), SyncMode::Offset);
}
