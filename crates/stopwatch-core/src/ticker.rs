use std::time::{Duration, Instant};

/// Refresh cadence of the elapsed-time display.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

/// Shortest accepted period; anything below is raised to this.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Cancellable repeating schedule polled from the event loop.
///
/// The caller passes the *current* running flag to every [`poll`](Self::poll);
/// a firing is only reported while that flag is true, and the first poll that
/// sees it false cancels the schedule. A deadline armed before a stop can
/// therefore never produce a stale tick.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Ticker firing every `period`, clamped to at least [`MIN_PERIOD`].
    pub fn new(period: Duration) -> Self {
        if period < MIN_PERIOD {
            log::warn!("ticker period {period:?} too short; using {MIN_PERIOD:?}");
        }
        Self { period: period.max(MIN_PERIOD), next_due: None }
    }

    /// Deadline of the next firing, if armed.
    #[inline]
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Schedules firings starting immediately at `now`.
    ///
    /// Re-arming an armed ticker restarts its phase.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now);
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    /// Returns `true` when a tick is due at `now` and `running` still holds.
    ///
    /// After a firing the next deadline is the first period boundary strictly
    /// after `now`, so a loop that stalled for several periods fires once
    /// rather than in a burst.
    pub fn poll(&mut self, now: Instant, running: bool) -> bool {
        let Some(due) = self.next_due else { return false };

        if !running {
            self.next_due = None;
            return false;
        }

        if now < due {
            return false;
        }

        let late = now.saturating_duration_since(due);
        let missed = u32::try_from(late.as_nanos() / self.period.as_nanos()).unwrap_or(u32::MAX);
        let next = self
            .period
            .checked_mul(missed.saturating_add(1))
            .and_then(|step| due.checked_add(step))
            .filter(|next| *next > now);
        self.next_due = Some(next.unwrap_or(now + self.period));
        true
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn unarmed_never_fires() {
        let mut t = Ticker::default();
        let now = Instant::now();
        assert!(!t.poll(now, true));
        assert!(t.next_due().is_none());
    }

    #[test]
    fn fires_immediately_after_arm() {
        let mut t = Ticker::default();
        let t0 = Instant::now();
        t.arm(t0);
        assert!(t.poll(t0, true));
        assert_eq!(t.next_due(), Some(t0 + DEFAULT_PERIOD));
    }

    #[test]
    fn fires_once_per_period() {
        let mut t = Ticker::new(ms(1000));
        let t0 = Instant::now();
        t.arm(t0);
        assert!(t.poll(t0, true));
        assert!(!t.poll(t0 + ms(400), true));
        assert!(!t.poll(t0 + ms(999), true));
        assert!(t.poll(t0 + ms(1000), true));
        assert!(!t.poll(t0 + ms(1500), true));
        assert!(t.poll(t0 + ms(2001), true));
        assert_eq!(t.next_due(), Some(t0 + ms(3000)));
    }

    #[test]
    fn stall_skips_missed_periods() {
        let mut t = Ticker::new(ms(1000));
        let t0 = Instant::now();
        t.arm(t0);
        assert!(t.poll(t0, true));
        assert!(t.poll(t0 + ms(4500), true));
        assert_eq!(t.next_due(), Some(t0 + ms(5000)));
        assert!(!t.poll(t0 + ms(4600), true));
    }

    #[test]
    fn not_running_cancels_on_the_next_poll() {
        let mut t = Ticker::new(ms(1000));
        let t0 = Instant::now();
        t.arm(t0);
        assert!(t.poll(t0, true));

        // Due, but the flag went false in between: no tick and no reschedule.
        assert!(!t.poll(t0 + ms(1000), false));
        assert!(t.next_due().is_none());
        assert!(!t.poll(t0 + ms(2000), true));
    }

    #[test]
    fn not_running_cancels_before_deadline_too() {
        let mut t = Ticker::new(ms(1000));
        let t0 = Instant::now();
        t.arm(t0);
        assert!(!t.poll(t0, false));
        assert!(t.next_due().is_none());
    }

    #[test]
    fn disarm_cancels() {
        let mut t = Ticker::default();
        let t0 = Instant::now();
        t.arm(t0);
        t.disarm();
        assert!(!t.poll(t0 + ms(5000), true));
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut t = Ticker::new(Duration::ZERO);
        let t0 = Instant::now();
        t.arm(t0);
        assert!(t.poll(t0, true));
        assert_eq!(t.next_due(), Some(t0 + MIN_PERIOD));
        assert!(t.poll(t0 + ms(10), true));
        assert_eq!(t.next_due(), Some(t0 + ms(11)));
    }

    #[test]
    fn very_long_stall_still_reschedules() {
        let mut t = Ticker::new(MIN_PERIOD);
        let t0 = Instant::now();
        t.arm(t0);
        // More missed periods than fit in a u32.
        let late = t0 + Duration::from_secs(5_000_000);
        assert!(t.poll(late, true));
        let next = t.next_due().unwrap();
        assert!(next > late);
        assert!(!t.poll(late, true));
    }

    #[test]
    fn rearm_restarts_phase() {
        let mut t = Ticker::new(ms(1000));
        let t0 = Instant::now();
        t.arm(t0);
        assert!(t.poll(t0, true));
        t.arm(t0 + ms(300));
        assert!(t.poll(t0 + ms(300), true));
        assert_eq!(t.next_due(), Some(t0 + ms(1300)));
    }
}
