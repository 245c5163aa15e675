use stopwatch_engine::coords::{Rect, Vec2};
use stopwatch_engine::paint::Color;
use stopwatch_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Single line of text, centred in whatever rect its parent gives it.
pub struct Label {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
}

impl Label {
    pub fn new(text: impl Into<String>, font: FontId, size: f32, color: Color) -> Self {
        Self { text: text.into(), font, size, color }
    }
}

impl<M> From<Label> for Element<M> {
    fn from(label: Label) -> Self {
        Element::new(label)
    }
}

impl<M> Widget<M> for Label {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let m = ctx.fonts.measure(&self.text, self.font, self.size);
        constraints.constrain(m.size())
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        painter.text_centered(&self.text, self.font, self.size, self.color, rect);
    }
}
