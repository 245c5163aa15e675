use stopwatch_engine::coords::{Rect, Vec2};
use stopwatch_engine::paint::Color;
use stopwatch_engine::scene::{Border, DrawList, ZIndex};
use stopwatch_engine::text::{FontId, FontSystem, TextMetrics};

use crate::constraints::LayoutCtx;

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList`, applies the window opacity to every color,
/// and exposes pointer state for hover / pressed visuals.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    fonts: &'a FontSystem,
    z: i32,
    opacity: f32,
    /// Cursor position in logical pixels; `None` while outside the window.
    pub mouse_pos: Option<Vec2>,
    /// True while the primary button is held.
    pub mouse_pressed: bool,
    over_interactive: bool,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(
        draw_list: &'a mut DrawList,
        fonts: &'a FontSystem,
        opacity: f32,
        mouse_pos: Option<Vec2>,
        mouse_pressed: bool,
    ) -> Self {
        Self {
            draw_list,
            fonts,
            z: 0,
            opacity,
            mouse_pos,
            mouse_pressed,
            over_interactive: false,
        }
    }

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.mouse_pos.is_some_and(|p| rect.contains(p))
    }

    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.mouse_pressed && self.is_hovered(rect)
    }

    /// Marks the cursor as resting on something clickable this frame.
    pub fn mark_interactive(&mut self) {
        self.over_interactive = true;
    }

    pub(crate) fn over_interactive(&self) -> bool {
        self.over_interactive
    }

    pub fn measure_text(&self, text: &str, font: FontId, size: f32) -> TextMetrics {
        self.fonts.measure(text, font, size)
    }

    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'a> {
        LayoutCtx { fonts: self.fonts }
    }

    /// Rounded rectangle; `radius = 0.0` gives sharp corners.
    pub fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        color: Color,
        border: Option<Border>,
    ) {
        let z = self.next_z();
        let border = border.map(|b| Border::new(b.width, b.color.with_opacity(self.opacity)));
        self.draw_list
            .push_rounded_rect(z, rect, radius, color.with_opacity(self.opacity), border);
    }

    /// Single line of text with its line box's top-left at `origin`.
    ///
    /// Text in a font that never loaded is dropped here rather than per frame
    /// in the renderer.
    pub fn text(&mut self, text: impl Into<String>, font: FontId, size: f32, color: Color, origin: Vec2) {
        if !self.fonts.contains(font) {
            return;
        }
        let z = self.next_z();
        self.draw_list
            .push_text(z, text, font, size, color.with_opacity(self.opacity), origin);
    }

    /// Text centred on both axes of `rect`.
    pub fn text_centered(&mut self, text: &str, font: FontId, size: f32, color: Color, rect: Rect) {
        let m = self.measure_text(text, font, size);
        let origin = rect.centered(m.size()).origin;
        self.text(text, font, size, color, origin);
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stopwatch_engine::scene::DrawCmd;

    #[test]
    fn later_draws_paint_on_top() {
        let mut dl = DrawList::new();
        let fonts = FontSystem::new();
        let mut p = Painter::new(&mut dl, &fonts, 1.0, None, false);
        p.fill_rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, Color::WHITE, None);
        p.fill_rounded_rect(Rect::new(0.0, 0.0, 5.0, 5.0), 0.0, Color::BLACK, None);

        let order: Vec<_> = dl.iter_in_paint_order().map(|i| i.key.z).collect();
        assert!(order[0] < order[1]);
    }

    #[test]
    fn opacity_scales_colors() {
        let mut dl = DrawList::new();
        let fonts = FontSystem::new();
        let mut p = Painter::new(&mut dl, &fonts, 0.5, None, false);
        p.fill_rounded_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0, Color::WHITE, None);

        let DrawCmd::RoundedRect(cmd) = &dl.items()[0].cmd else { panic!("expected a rect") };
        assert_eq!(cmd.fill.a, 0.5);
        assert_eq!(cmd.fill.r, 0.5);
    }

    #[test]
    fn text_in_unloaded_font_is_skipped() {
        let mut dl = DrawList::new();
        let fonts = FontSystem::new();
        let mut p = Painter::new(&mut dl, &fonts, 1.0, None, false);
        p.text("00:00:00", FontId::default(), 72.0, Color::WHITE, Vec2::zero());
        assert!(dl.is_empty());
    }

    #[test]
    fn hover_requires_a_pointer() {
        let mut dl = DrawList::new();
        let fonts = FontSystem::new();
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);

        let p = Painter::new(&mut dl, &fonts, 1.0, None, true);
        assert!(!p.is_hovered(r));
        assert!(!p.is_pressed(r));

        let p = Painter::new(&mut dl, &fonts, 1.0, Some(Vec2::new(5.0, 5.0)), true);
        assert!(p.is_hovered(r));
        assert!(p.is_pressed(r));
    }
}
