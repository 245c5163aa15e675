use std::time::Instant;

use crate::clock::{Clock, SystemClock};
use crate::controls::{Action, Controls};
use crate::format::ZERO_DISPLAY;
use crate::model::{TimerModel, TimerState};
use crate::ticker::Ticker;

/// Controller owned by the presentation layer.
///
/// Couples the [`TimerModel`] to its refresh [`Ticker`] and keeps the string
/// currently shown in the display label. The window loop calls
/// [`poll`](Self::poll) once per frame and sleeps until
/// [`next_wakeup`](Self::next_wakeup).
#[derive(Debug)]
pub struct Stopwatch<C: Clock = SystemClock> {
    model: TimerModel<C>,
    ticker: Ticker,
    display: String,
}

impl Stopwatch<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Stopwatch<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Stopwatch<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::with_ticker(clock, Ticker::default())
    }

    pub fn with_ticker(clock: C, ticker: Ticker) -> Self {
        Self {
            model: TimerModel::with_clock(clock),
            ticker,
            display: ZERO_DISPLAY.to_string(),
        }
    }

    #[inline]
    pub fn display(&self) -> &str {
        &self.display
    }

    #[inline]
    pub fn state(&self) -> TimerState {
        self.model.state()
    }

    #[inline]
    pub fn controls(&self) -> Controls {
        Controls::for_state(self.model.state())
    }

    /// When the event loop should next wake to refresh the display.
    #[inline]
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.ticker.next_due()
    }

    pub fn start(&mut self) {
        if self.model.is_running() {
            return;
        }
        self.model.start();
        self.ticker.arm(self.model.clock().now());
    }

    pub fn stop(&mut self) {
        if !self.model.is_running() {
            return;
        }
        self.model.stop();
        self.ticker.disarm();
        self.display = self.model.display();
    }

    pub fn reset(&mut self) {
        self.ticker.disarm();
        self.display = self.model.reset();
    }

    /// Applies a user action, ignoring it if its control is disabled.
    ///
    /// Returns `true` when the action was accepted.
    pub fn apply(&mut self, action: Action) -> bool {
        if !self.controls().allows(action) {
            log::debug!("ignoring {action:?} while {:?}", self.state());
            return false;
        }

        match action {
            Action::Start => self.start(),
            Action::Stop => self.stop(),
            Action::Reset => self.reset(),
            Action::Toggle if self.model.is_running() => self.stop(),
            Action::Toggle => self.start(),
        }
        true
    }

    /// Fires the refresh tick if one is due. Returns whether the display changed.
    pub fn poll(&mut self) -> bool {
        let now = self.model.clock().now();
        if !self.ticker.poll(now, self.model.is_running()) {
            return false;
        }

        let text = self.model.tick();
        if text == self.display {
            return false;
        }
        log::trace!("tick {text}");
        self.display = text;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::clock::ManualClock;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn stopwatch() -> (Stopwatch<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (Stopwatch::with_clock(clock.clone()), clock)
    }

    #[test]
    fn initial_display_and_controls() {
        let (sw, _) = stopwatch();
        assert_eq!(sw.display(), "00:00:00");
        assert_eq!(sw.state(), TimerState::Idle);
        assert_eq!(sw.controls(), Controls::for_state(TimerState::Idle));
        assert!(sw.next_wakeup().is_none());
    }

    #[test]
    fn start_schedules_an_immediate_refresh() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        assert_eq!(sw.next_wakeup(), Some(clock.now()));
    }

    #[test]
    fn poll_refreshes_once_per_second() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        assert!(!sw.poll()); // fires, but "00:00:00" is unchanged

        clock.advance(Duration::from_millis(500));
        assert!(!sw.poll());
        assert_eq!(sw.display(), "00:00:00");

        clock.advance(Duration::from_millis(500));
        assert!(sw.poll());
        assert_eq!(sw.display(), "00:00:01");
    }

    #[test]
    fn stop_cancels_refresh_and_freezes_display() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance(secs(3));
        sw.poll();
        sw.stop();
        assert!(sw.next_wakeup().is_none());

        clock.advance(secs(10));
        assert!(!sw.poll());
        assert_eq!(sw.display(), "00:00:03");
    }

    #[test]
    fn stop_shows_the_folded_reading() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        sw.poll();
        clock.advance(Duration::from_millis(2_700));
        sw.stop();
        assert_eq!(sw.display(), "00:00:02");
    }

    #[test]
    fn reset_while_running_shows_zero_and_stays_idle() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance(secs(6));
        sw.poll();
        assert_eq!(sw.display(), "00:00:06");

        sw.reset();
        assert_eq!(sw.display(), "00:00:00");
        assert_eq!(sw.state(), TimerState::Idle);

        clock.advance(secs(2));
        assert!(!sw.poll());
        assert_eq!(sw.display(), "00:00:00");
        assert!(sw.next_wakeup().is_none());
    }

    #[test]
    fn resume_excludes_pause() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance(secs(5));
        sw.poll();
        assert_eq!(sw.display(), "00:00:05");
        sw.stop();

        clock.advance(secs(3));
        sw.start();
        clock.advance(secs(2));
        sw.poll();
        assert_eq!(sw.display(), "00:00:07");
    }

    #[test]
    fn disabled_actions_are_ignored() {
        let (mut sw, clock) = stopwatch();
        assert!(!sw.apply(Action::Stop));
        assert!(!sw.apply(Action::Reset));
        assert_eq!(sw.state(), TimerState::Idle);

        assert!(sw.apply(Action::Start));
        assert!(!sw.apply(Action::Start));
        clock.advance(secs(1));
        assert!(sw.apply(Action::Stop));
        assert_eq!(sw.state(), TimerState::Paused);
        assert!(sw.apply(Action::Reset));
        assert_eq!(sw.state(), TimerState::Idle);
    }

    #[test]
    fn toggle_alternates_start_and_stop() {
        let (mut sw, clock) = stopwatch();
        assert!(sw.apply(Action::Toggle));
        assert_eq!(sw.state(), TimerState::Running);
        clock.advance(secs(4));
        assert!(sw.apply(Action::Toggle));
        assert_eq!(sw.state(), TimerState::Paused);
        assert_eq!(sw.display(), "00:00:04");
        assert!(sw.apply(Action::Toggle));
        assert_eq!(sw.state(), TimerState::Running);
    }
}
