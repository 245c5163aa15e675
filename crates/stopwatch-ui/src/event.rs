use stopwatch_engine::coords::Vec2;

/// Pointer events routed through the widget tree.
///
/// Keyboard input does not go through widgets; components map keys to
/// messages directly in [`Component::on_key`](crate::app::Component::on_key).
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Primary button released at `pos`.
    Click { pos: Vec2 },
    /// Cursor is over the window at `pos`.
    Hover { pos: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Stop routing to siblings and parents.
    Consumed,
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
