// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;
use tokio::time::Instant;

/// Quiet period tracker: fires once `delay` has passed since the most recent
/// [`restart()`](Self::restart).
///
/// A single scroll gesture makes the host report many visible range changes. Each one
/// restarts the timer, so the follower panes are revealed once, when the gesture
/// settles, instead of chasing every intermediate viewport.
///
/// This is a plain [`Copy`] value with no task behind it. An event loop copies it out of
/// its owner before `tokio::select!`, waits on [`sleep_until()`](Self::sleep_until), and
/// can never be woken by a timer that has since been cancelled:
///
/// ```rust
/// use std::time::Duration;
/// use r3bl_pane_sync::DebounceTimer;
/// use tokio::sync::mpsc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (sender, mut receiver) = mpsc::channel::<u16>(8);
/// let mut timer = DebounceTimer::new(Duration::from_millis(5));
/// let mut latest_top = None;
///
/// for top in [3, 9, 14] {
///     sender.send(top).await.unwrap();
/// }
/// drop(sender);
///
/// loop {
///     let snapshot = timer;
///     tokio::select! {
///         biased;
///         maybe_top = receiver.recv() => match maybe_top {
///             Some(top) => { latest_top = Some(top); timer.restart(); }
///             None if !timer.is_armed() => break,
///             None => { snapshot.sleep_until().await; timer.cancel(); break; }
///         },
///         () = snapshot.sleep_until(), if snapshot.is_armed() => timer.cancel(),
///     }
/// }
/// assert_eq!(latest_top, Some(14));
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTimer {
    maybe_fire_at: Option<Instant>,
    delay: Duration,
}

impl DebounceTimer {
    /// Starts disarmed.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            maybe_fire_at: None,
            delay,
        }
    }

    /// Arm (or re-arm) the timer to fire `delay` from now.
    pub fn restart(&mut self) { self.maybe_fire_at = Some(Instant::now() + self.delay); }

    pub fn cancel(&mut self) { self.maybe_fire_at = None; }

    #[must_use]
    pub fn is_armed(&self) -> bool { self.maybe_fire_at.is_some() }

    #[must_use]
    pub fn fire_at(&self) -> Option<Instant> { self.maybe_fire_at }

    #[must_use]
    pub fn delay(&self) -> Duration { self.delay }

    /// Armed, and the quiet period is over at `now`.
    #[must_use]
    pub fn has_elapsed_at(&self, now: Instant) -> bool {
        matches!(self.maybe_fire_at, Some(fire_at) if fire_at <= now)
    }

    /// Resolves when the timer fires. Never resolves while disarmed, so always guard
    /// the `select!` branch with [`is_armed()`](Self::is_armed).
    pub async fn sleep_until(self) {
        if let Some(fire_at) = self.maybe_fire_at {
            tokio::time::sleep_until(fire_at).await;
        } else {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_disarmed_never_elapses() {
        let mut timer = DebounceTimer::new(Duration::ZERO);
        assert!(!timer.is_armed());
        assert!(!timer.has_elapsed_at(Instant::now()));

        timer.restart();
        timer.cancel();
        assert_eq!(timer.fire_at(), None);
        assert!(!timer.has_elapsed_at(Instant::now()));
    }

    #[test]
    fn test_restart_moves_fire_time_later() {
        let mut timer = DebounceTimer::new(Duration::from_millis(10));
        timer.restart();
        let first = timer.fire_at();

        std::thread::sleep(Duration::from_millis(3));
        timer.restart();

        assert!(timer.fire_at() > first);
        assert_eq!(timer.delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_elapsed_only_after_delay() {
        let mut timer = DebounceTimer::new(Duration::from_millis(50));
        timer.restart();
        let now = Instant::now();
        assert!(!timer.has_elapsed_at(now));
        assert!(timer.has_elapsed_at(now + Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn test_sleep_until_waits_for_the_delay() {
        let mut timer = DebounceTimer::new(Duration::from_millis(25));
        timer.restart();

        let start = Instant::now();
        timer.sleep_until().await;

        assert!(start.elapsed() >= Duration::from_millis(25));
    }
}
