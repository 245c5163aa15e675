//! Elapsed-time tracking for the stopwatch.
//!
//! This crate holds every piece of logic the window layer drives. It does not
//! depend on winit / wgpu, so everything here is exercised by plain unit tests
//! with a simulated clock.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`clock`] | `Clock`, `SystemClock`, `ManualClock` |
//! | [`format`] | `Hms`, `format_hms` |
//! | [`model`] | `TimerModel`, `TimerState` |
//! | [`ticker`] | `Ticker` (cancellable 1 s refresh schedule) |
//! | [`controls`] | `Controls`, `Action` |
//! | [`stopwatch`] | `Stopwatch` controller tying the above together |
//!
//! # Quick start
//!
//! ```rust
//! use std::time::Duration;
//! use stopwatch_core::{ManualClock, TimerModel};
//!
//! let clock = ManualClock::new();
//! let mut timer = TimerModel::with_clock(clock.clone());
//!
//! timer.start();
//! clock.advance(Duration::from_secs(3723));
//! assert_eq!(timer.tick(), "01:02:03");
//! ```

pub mod clock;
pub mod controls;
pub mod format;
pub mod model;
pub mod stopwatch;
pub mod ticker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controls::{Action, Controls};
pub use format::{format_hms, Hms, ZERO_DISPLAY};
pub use model::{TimerModel, TimerState};
pub use stopwatch::Stopwatch;
pub use ticker::{Ticker, DEFAULT_PERIOD, MIN_PERIOD};
