use stopwatch_engine::coords::{Rect, Vec2};

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Main axis of a [`Flex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Children left to right.
    Horizontal,
    /// Children top to bottom.
    Vertical,
}

impl Axis {
    #[inline]
    fn main(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }
}

struct FlexChild<M> {
    element: Element<M>,
    /// Share of the leftover main-axis space. Zero means "natural size".
    weight: f32,
}

/// Row or column that divides its rect between children by weight.
///
/// Children with weight zero keep their measured main-axis size; the rest of
/// the space (after padding and spacing) is split between weighted children in
/// proportion to their weights. Every child fills the cross axis.
///
/// ```rust,ignore
/// Flex::row()
///     .spacing(20.0)
///     .child(start_button)
///     .child(stop_button)
///     .child(reset_button)
/// ```
pub struct Flex<M> {
    axis: Axis,
    children: Vec<FlexChild<M>>,
    spacing: f32,
    padding: Edges,
}

impl<M> Flex<M> {
    pub fn new(axis: Axis) -> Self {
        Self { axis, children: Vec::new(), spacing: 0.0, padding: Edges::default() }
    }

    pub fn row() -> Self {
        Self::new(Axis::Horizontal)
    }

    pub fn column() -> Self {
        Self::new(Axis::Vertical)
    }

    pub fn spacing(mut self, v: f32) -> Self {
        self.spacing = v;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn padding_all(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    /// Adds a child with weight 1.
    pub fn child(self, child: impl Into<Element<M>>) -> Self {
        self.weighted(child, 1.0)
    }

    pub fn weighted(mut self, child: impl Into<Element<M>>, weight: f32) -> Self {
        self.children.push(FlexChild { element: child.into(), weight: weight.max(0.0) });
        self
    }

    /// Child rects for `rect`, in child order.
    fn layout(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let n = self.children.len();
        if n == 0 {
            return Vec::new();
        }

        let main_total = self.axis.main(inner.size);
        let gaps = self.spacing * (n - 1) as f32;

        let natural: Vec<f32> = self
            .children
            .iter()
            .map(|c| {
                if c.weight > 0.0 {
                    0.0
                } else {
                    self.axis.main(c.element.measure(Constraints::loose(inner.size), ctx))
                }
            })
            .collect();
        let fixed: f32 = natural.iter().sum();
        let weight_sum: f32 = self.children.iter().map(|c| c.weight).sum();
        let flexible = (main_total - gaps - fixed).max(0.0);

        let mut cursor = 0.0;
        self.children
            .iter()
            .zip(natural)
            .map(|(c, nat)| {
                let len = if c.weight > 0.0 { flexible * c.weight / weight_sum } else { nat };
                let r = match self.axis {
                    Axis::Horizontal => {
                        Rect::new(inner.origin.x + cursor, inner.origin.y, len, inner.size.y)
                    }
                    Axis::Vertical => {
                        Rect::new(inner.origin.x, inner.origin.y + cursor, inner.size.x, len)
                    }
                };
                cursor += len + self.spacing;
                r
            })
            .collect()
    }
}

impl<M: 'static> From<Flex<M>> for Element<M> {
    fn from(flex: Flex<M>) -> Self {
        Element::new(flex)
    }
}

impl<M> Widget<M> for Flex<M> {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner = constraints.shrink(self.padding);
        let mut main: f32 = 0.0;
        let mut cross: f32 = 0.0;
        for c in &self.children {
            let s = c.element.measure(inner, ctx);
            let (m, x) = match self.axis {
                Axis::Horizontal => (s.x, s.y),
                Axis::Vertical => (s.y, s.x),
            };
            main += m;
            cross = cross.max(x);
        }
        main += self.spacing * self.children.len().saturating_sub(1) as f32;

        let size = match self.axis {
            Axis::Horizontal => Vec2::new(main + self.padding.h(), cross + self.padding.v()),
            Axis::Vertical => Vec2::new(cross + self.padding.h(), main + self.padding.v()),
        };
        constraints.constrain(size)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let ctx = painter.layout_ctx();
        for (child, r) in self.children.iter().zip(self.layout(rect, &ctx)) {
            child.element.paint(painter, r);
        }
    }

    fn on_event(
        &self,
        event: &UiEvent,
        rect: Rect,
        ctx: &LayoutCtx,
        out: &mut Vec<M>,
    ) -> EventResult {
        for (child, r) in self.children.iter().zip(self.layout(rect, ctx)) {
            if child.element.on_event(event, r, ctx, out).is_consumed() {
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stopwatch_engine::text::FontSystem;

    /// Fixed-size box that reports clicks as its id.
    struct Tile {
        size: Vec2,
        id: u32,
    }

    impl Widget<u32> for Tile {
        fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            constraints.constrain(self.size)
        }

        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}

        fn on_event(&self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx, out: &mut Vec<u32>) -> EventResult {
            match event {
                UiEvent::Click { pos } if rect.contains(*pos) => {
                    out.push(self.id);
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            }
        }
    }

    impl From<Tile> for Element<u32> {
        fn from(tile: Tile) -> Self {
            Element::new(tile)
        }
    }

    fn tile(id: u32) -> Tile {
        Tile { size: Vec2::new(10.0, 10.0), id }
    }

    #[test]
    fn equal_weights_split_row_evenly() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let row = Flex::<u32>::row().child(tile(0)).child(tile(1)).child(tile(2));
        let rects = row.layout(Rect::new(0.0, 0.0, 300.0, 100.0), &ctx);
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(rects[1], Rect::new(100.0, 0.0, 100.0, 100.0));
        assert_eq!(rects[2], Rect::new(200.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn padding_and_spacing_come_off_the_top() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let row = Flex::<u32>::row().padding_all(20.0).spacing(20.0).child(tile(0)).child(tile(1));
        let rects = row.layout(Rect::new(0.0, 0.0, 200.0, 100.0), &ctx);
        // 200 - 2*20 padding - 20 spacing = 140, split in two.
        assert_eq!(rects[0], Rect::new(20.0, 20.0, 70.0, 60.0));
        assert_eq!(rects[1], Rect::new(110.0, 20.0, 70.0, 60.0));
    }

    #[test]
    fn weights_are_proportional() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let col = Flex::<u32>::column().weighted(tile(0), 1.0).weighted(tile(1), 3.0);
        let rects = col.layout(Rect::new(0.0, 0.0, 50.0, 200.0), &ctx);
        assert_eq!(rects[0].size.y, 50.0);
        assert_eq!(rects[1], Rect::new(0.0, 50.0, 50.0, 150.0));
    }

    #[test]
    fn zero_weight_keeps_natural_size() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let col = Flex::<u32>::column().weighted(tile(0), 0.0).child(tile(1));
        let rects = col.layout(Rect::new(0.0, 0.0, 50.0, 100.0), &ctx);
        assert_eq!(rects[0].size.y, 10.0);
        assert_eq!(rects[1], Rect::new(0.0, 10.0, 50.0, 90.0));
    }

    #[test]
    fn click_reaches_the_child_under_the_pointer() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let row = Flex::<u32>::row().child(tile(0)).child(tile(1)).child(tile(2));
        let mut out = Vec::new();
        let r = row.on_event(
            &UiEvent::Click { pos: Vec2::new(150.0, 50.0) },
            Rect::new(0.0, 0.0, 300.0, 100.0),
            &ctx,
            &mut out,
        );
        assert!(r.is_consumed());
        assert_eq!(out, vec![1]);
    }

    #[test]
    fn click_in_padding_hits_nothing() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let row = Flex::<u32>::row().padding_all(20.0).child(tile(0));
        let mut out = Vec::new();
        let r = row.on_event(
            &UiEvent::Click { pos: Vec2::new(5.0, 5.0) },
            Rect::new(0.0, 0.0, 300.0, 100.0),
            &ctx,
            &mut out,
        );
        assert_eq!(r, EventResult::Ignored);
        assert!(out.is_empty());
    }

    #[test]
    fn measure_sums_main_axis() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let row = Flex::<u32>::row().spacing(5.0).padding_all(1.0).child(tile(0)).child(tile(1));
        let size = row.measure(Constraints::loose(Vec2::new(500.0, 500.0)), &ctx);
        assert_eq!(size, Vec2::new(27.0, 12.0));
    }

    #[test]
    fn empty_flex_lays_out_nothing() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let row: Flex<u32> = Flex::row();
        assert!(row.layout(Rect::new(0.0, 0.0, 10.0, 10.0), &ctx).is_empty());
    }
}
