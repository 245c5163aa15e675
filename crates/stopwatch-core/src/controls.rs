use crate::model::TimerState;

/// User-facing commands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Action {
    Start,
    Stop,
    Reset,
    /// Start when not running, stop when running (keyboard shortcut).
    Toggle,
}

/// Which controls are enabled for a given state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Controls {
    pub start: bool,
    pub stop: bool,
    pub reset: bool,
}

impl Controls {
    pub const fn for_state(state: TimerState) -> Self {
        match state {
            TimerState::Idle => Self { start: true, stop: false, reset: false },
            TimerState::Running => Self { start: false, stop: true, reset: true },
            TimerState::Paused => Self { start: true, stop: false, reset: true },
        }
    }

    /// Whether `action` is currently allowed. `Toggle` is allowed whenever
    /// either of the actions it may resolve to is.
    pub const fn allows(self, action: Action) -> bool {
        match action {
            Action::Start => self.start,
            Action::Stop => self.stop,
            Action::Reset => self.reset,
            Action::Toggle => self.start || self.stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_only_allows_start() {
        let c = Controls::for_state(TimerState::Idle);
        assert_eq!(c, Controls { start: true, stop: false, reset: false });
    }

    #[test]
    fn running_disables_start() {
        let c = Controls::for_state(TimerState::Running);
        assert_eq!(c, Controls { start: false, stop: true, reset: true });
    }

    #[test]
    fn paused_keeps_reset_enabled() {
        let c = Controls::for_state(TimerState::Paused);
        assert_eq!(c, Controls { start: true, stop: false, reset: true });
    }

    #[test]
    fn toggle_is_always_available() {
        for s in [TimerState::Idle, TimerState::Running, TimerState::Paused] {
            assert!(Controls::for_state(s).allows(Action::Toggle));
        }
    }
}
