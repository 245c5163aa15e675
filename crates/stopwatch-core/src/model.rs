use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::format::{format_hms, ZERO_DISPLAY};

/// Lifecycle state of a [`TimerModel`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum TimerState {
    /// Fresh or just reset; elapsed is zero.
    #[default]
    Idle,
    /// Counting.
    Running,
    /// Stopped after running; elapsed is frozen.
    Paused,
}

/// The instant at which elapsed time would have been zero for the current run.
///
/// Stored as `anchor - carried` instead of a single back-dated `Instant`, since
/// `Instant` cannot portably represent points before the platform epoch.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct ReferenceStart {
    anchor: Instant,
    carried: Duration,
}

impl ReferenceStart {
    fn elapsed_at(self, now: Instant) -> Duration {
        now.saturating_duration_since(self.anchor) + self.carried
    }
}

/// Elapsed-time tracker with pause/resume.
///
/// While running, the elapsed time is `now - reference_start`, where
/// `reference_start` is back-dated on every start by whatever had already
/// accumulated. Paused intervals therefore never count.
///
/// All operations are total: calls that make no sense in the current state
/// (starting twice, stopping while idle) are silently ignored.
#[derive(Debug)]
pub struct TimerModel<C: Clock = SystemClock> {
    clock: C,
    state: TimerState,
    reference_start: Option<ReferenceStart>,
    elapsed: Duration,
}

impl TimerModel<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TimerModel<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimerModel<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: TimerState::Idle,
            reference_start: None,
            elapsed: Duration::ZERO,
        }
    }

    #[inline]
    pub fn state(&self) -> TimerState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Last computed elapsed time. Not refreshed until the next `tick`/`stop`.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Formatted form of [`elapsed`](Self::elapsed).
    pub fn display(&self) -> String {
        format_hms(self.elapsed)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Begins (or resumes) counting. No-op while already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        self.reference_start = Some(ReferenceStart {
            anchor: self.clock.now(),
            carried: self.elapsed,
        });
        self.state = TimerState::Running;

        log::debug!("timer started (resuming from {})", format_hms(self.elapsed));
    }

    /// Recomputes elapsed time while running and returns the display string.
    ///
    /// When not running nothing is recomputed; the frozen reading is returned.
    pub fn tick(&mut self) -> String {
        if self.is_running() {
            self.elapsed = self.reading();
        }
        self.display()
    }

    /// Stops counting and freezes the elapsed time. No-op unless running.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }

        self.elapsed = self.reading();
        self.state = TimerState::Paused;

        log::debug!("timer stopped at {}", format_hms(self.elapsed));
    }

    /// Returns to idle with zero elapsed time, from any state.
    pub fn reset(&mut self) -> String {
        self.state = TimerState::Idle;
        self.reference_start = None;
        self.elapsed = Duration::ZERO;

        log::debug!("timer reset");
        ZERO_DISPLAY.to_string()
    }

    fn reading(&self) -> Duration {
        match self.reference_start {
            Some(reference) => reference.elapsed_at(self.clock.now()),
            None => self.elapsed,
        }
    }

    #[cfg(test)]
    fn reference_start(&self) -> Option<ReferenceStart> {
        self.reference_start
    }
}
