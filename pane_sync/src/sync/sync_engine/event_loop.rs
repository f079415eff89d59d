// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{EventDisposition, SyncEngine, SyncEvent};
use crate::{ClipboardService, DEBUG_PANE_SYNC, PaneHost};
use tokio::sync::mpsc;

/// Drive `engine` from `receiver` until the channel closes or a
/// [`SyncEvent::Shutdown`] arrives. The engine is reset and handed back at the end.
///
/// The `select!` is `biased` towards the receiver: any event already sitting in the
/// channel is applied before the debounce deadline gets a chance to fire. A host that
/// emits reveal echoes through the same channel relies on this, since an echo that
/// arrives after a new burst started would look like a user scroll.
pub async fn run_event_loop<H: PaneHost, C: ClipboardService>(
    mut engine: SyncEngine,
    host: &mut H,
    clipboard: &mut C,
    mut receiver: mpsc::Receiver<SyncEvent>,
) -> SyncEngine {
    engine.activate(host);

    loop {
        let debounce = *engine.debounce();
        tokio::select! {
            biased;

            maybe_event = receiver.recv() => {
                let Some(event) = maybe_event else {
                    break;
                };
                if engine.apply_event(event, host, clipboard) == EventDisposition::Shutdown {
                    break;
                }
            }

            () = debounce.sleep_until(), if debounce.is_armed() => {
                engine.on_debounce_elapsed(host);
            }
        }
    }

    engine.reset(host);

    DEBUG_PANE_SYNC.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(message = "🛑 Sync event loop stopped", stats = ?engine.stats());
    });

    engine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryModeStore, InMemoryPaneHost, SyncConfig, RecordingClipboard, ViewColumn};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[tokio::test]
    async fn test_loop_exits_on_shutdown() {
        let mut host = InMemoryPaneHost::default();
        let (sender, receiver) = mpsc::channel(16);
        let engine =
            SyncEngine::new(SyncConfig::default(), Box::new(InMemoryModeStore::default()));

        sender.send(SyncEvent::Shutdown).await.unwrap();
        let engine =
            run_event_loop(engine, &mut host, &mut RecordingClipboard::default(), receiver).await;
        assert_eq!(engine.driver(), None);
    }

    #[tokio::test]
    async fn test_loop_exits_when_channel_closes() {
        let mut host = InMemoryPaneHost::default();
        let (sender, receiver) = mpsc::channel::<SyncEvent>(16);
        drop(sender);
        let engine =
            SyncEngine::new(SyncConfig::default(), Box::new(InMemoryModeStore::default()));

        let engine =
            run_event_loop(engine, &mut host, &mut RecordingClipboard::default(), receiver).await;
        assert!(!engine.has_pending_reveal());
    }

    #[tokio::test]
    async fn test_burst_is_coalesced_into_one_reveal() {
        let mut host = InMemoryPaneHost::default();
        let a = host.add_pane(&"text\n".repeat(200), ViewColumn(1));
        let b = host.add_pane(&"text\n".repeat(200), ViewColumn(2));
        host.drain_events();

        let (sender, receiver) = mpsc::channel(64);
        host.attach_sender(sender.clone());

        for top in 1..=20 {
            let event = host.user_scroll(a, top).unwrap();
            sender.send(event).await.unwrap();
        }

        let engine = SyncEngine::new(
            SyncConfig::default().with_debounce_delay(Duration::from_millis(5)),
            Box::new(InMemoryModeStore::default()),
        );
        let shutdown = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            sender.send(SyncEvent::Shutdown).await.unwrap();
        });

        let engine =
            run_event_loop(engine, &mut host, &mut RecordingClipboard::default(), receiver).await;
        shutdown.await.unwrap();

        assert_eq!(host.top_line(b), Some(20));
        assert_eq!(engine.stats().reveals_issued, 1);
        assert_eq!(engine.stats().echoes_swallowed, 1);
        assert_eq!(engine.stats().driver_changes, 1);
    }
}
