use stopwatch_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;

/// Behaviour every UI element implements.
///
/// `M` is the message type of the owning component. Widgets never mutate
/// application state themselves; they push messages into `out`.
pub trait Widget<M> {
    /// Size this widget wants within `constraints`. Must be deterministic.
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2;

    /// Draws into `painter` inside `rect`, the space allocated by the parent.
    fn paint(&self, painter: &mut Painter, rect: Rect);

    /// Routes `event`. Return [`EventResult::Consumed`] to stop propagation.
    fn on_event(
        &self,
        event: &UiEvent,
        rect: Rect,
        ctx: &LayoutCtx,
        out: &mut Vec<M>,
    ) -> EventResult {
        let _ = (event, rect, ctx, out);
        EventResult::Ignored
    }
}

/// Type-erased widget; the child type of every container.
pub struct Element<M>(Box<dyn Widget<M>>);

impl<M> Element<M> {
    pub fn new<W: Widget<M> + 'static>(w: W) -> Self {
        Self(Box::new(w))
    }

    #[inline]
    pub fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        self.0.measure(constraints, ctx)
    }

    #[inline]
    pub fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.0.paint(painter, rect)
    }

    #[inline]
    pub fn on_event(
        &self,
        event: &UiEvent,
        rect: Rect,
        ctx: &LayoutCtx,
        out: &mut Vec<M>,
    ) -> EventResult {
        self.0.on_event(event, rect, ctx, out)
    }
}

// `Element<M>` is generic, so a blanket `From<W: Widget<M>>` would overlap
// `From<T> for T`. Each widget provides its own conversion instead.
