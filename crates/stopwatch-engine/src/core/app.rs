use std::time::Instant;

use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application driven by [`Runtime`](crate::window::Runtime).
///
/// The runtime only renders when something changed: an input event, a resize,
/// or the deadline returned by [`App::next_wakeup`].
pub trait App {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called for each frame the runtime decides to draw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Earliest instant at which the app wants another frame, if any.
    ///
    /// Queried after every frame; `None` lets the loop sleep until input.
    fn next_wakeup(&self) -> Option<Instant> {
        None
    }
}
