use stopwatch_engine::coords::{Rect, Vec2, Viewport};
use stopwatch_engine::scene::DrawList;
use stopwatch_engine::text::{FontId, FontLoadError, FontSystem};

use crate::constraints::LayoutCtx;
use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::Element;

/// Pointer snapshot for one UI frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UiInput {
    /// Cursor position in logical pixels; `None` while outside the window.
    pub mouse_pos: Option<Vec2>,
    /// Primary button held.
    pub mouse_pressed: bool,
    /// Primary button released this frame.
    pub mouse_clicked: bool,
}

/// Fonts and draw list shared across frames.
///
/// Each frame the application first [`route`](Self::route)s input through the
/// current widget tree, applies the resulting messages, then
/// [`frame`](Self::frame)s the updated tree into the draw list.
pub struct UiScene {
    /// Public so the text renderer can borrow it next to `draw_list`.
    pub font_system: FontSystem,
    /// Filled by the most recent [`frame`](Self::frame).
    pub draw_list: DrawList,
    /// Multiplies the alpha of everything painted.
    pub opacity: f32,
    over_interactive: bool,
}

impl UiScene {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            draw_list: DrawList::new(),
            opacity: 1.0,
            over_interactive: false,
        }
    }

    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        self.font_system.load_font(data)
    }

    /// Routes this frame's pointer input through `root`, collecting messages.
    pub fn route<M>(&self, root: &Element<M>, viewport: Viewport, input: &UiInput, out: &mut Vec<M>) {
        let ctx = LayoutCtx { fonts: &self.font_system };
        let rect = Rect::new(0.0, 0.0, viewport.width, viewport.height);
        let Some(pos) = input.mouse_pos else { return };

        root.on_event(&UiEvent::Hover { pos }, rect, &ctx, out);
        if input.mouse_clicked {
            root.on_event(&UiEvent::Click { pos }, rect, &ctx, out);
        }
    }

    /// Lays out and paints `root` over the whole viewport.
    ///
    /// The returned list stays valid until the next call.
    pub fn frame<M>(&mut self, root: &Element<M>, viewport: Viewport, input: &UiInput) -> &mut DrawList {
        self.draw_list.clear();
        let rect = Rect::new(0.0, 0.0, viewport.width, viewport.height);
        let mut painter = Painter::new(
            &mut self.draw_list,
            &self.font_system,
            self.opacity,
            input.mouse_pos,
            input.mouse_pressed,
        );
        root.paint(&mut painter, rect);
        self.over_interactive = painter.over_interactive();
        &mut self.draw_list
    }

    /// Whether the last painted frame had the cursor over an enabled control.
    pub fn pointer_over_interactive(&self) -> bool {
        self.over_interactive
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stopwatch_engine::paint::Color;

    use crate::widgets::button::{Button, ButtonStyle};
    use crate::widgets::flex::Flex;

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        A,
        B,
    }

    fn tree(b_enabled: bool) -> Element<Msg> {
        let style = ButtonStyle::filled(Color::from_hex(0x808080));
        Flex::<Msg>::row()
            .child(Button::new("a", FontId::default(), 15.0, style).on_click(Msg::A))
            .child(Button::new("b", FontId::default(), 15.0, style).on_click(Msg::B).enabled(b_enabled))
            .into()
    }

    fn click_at(x: f32, y: f32) -> UiInput {
        UiInput { mouse_pos: Some(Vec2::new(x, y)), mouse_pressed: false, mouse_clicked: true }
    }

    #[test]
    fn click_routes_to_one_button() {
        let scene = UiScene::new();
        let mut out = Vec::new();
        scene.route(&tree(true), Viewport::new(200.0, 100.0), &click_at(150.0, 50.0), &mut out);
        assert_eq!(out, vec![Msg::B]);
    }

    #[test]
    fn hover_alone_emits_nothing() {
        let scene = UiScene::new();
        let mut out = Vec::new();
        let input = UiInput { mouse_clicked: false, ..click_at(50.0, 50.0) };
        scene.route(&tree(true), Viewport::new(200.0, 100.0), &input, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn disabled_button_emits_nothing() {
        let scene = UiScene::new();
        let mut out = Vec::new();
        scene.route(&tree(false), Viewport::new(200.0, 100.0), &click_at(150.0, 50.0), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn no_pointer_no_events() {
        let scene = UiScene::new();
        let mut out = Vec::new();
        let input = UiInput { mouse_pos: None, mouse_pressed: false, mouse_clicked: true };
        scene.route(&tree(true), Viewport::new(200.0, 100.0), &input, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn frame_repaints_from_scratch_and_tracks_hover() {
        let mut scene = UiScene::new();
        let vp = Viewport::new(200.0, 100.0);
        let hovering = UiInput { mouse_clicked: false, ..click_at(50.0, 50.0) };

        let n = scene.frame(&tree(true), vp, &hovering).len();
        assert_eq!(n, 2); // two backgrounds; no font loaded, so no text
        assert!(scene.pointer_over_interactive());

        let n = scene.frame(&tree(false), vp, &UiInput::default()).len();
        assert_eq!(n, 2);
        assert!(!scene.pointer_over_interactive());
    }

    #[test]
    fn hovering_disabled_button_is_not_interactive() {
        let mut scene = UiScene::new();
        let hovering = UiInput { mouse_clicked: false, ..click_at(150.0, 50.0) };
        let _ = scene.frame(&tree(false), Viewport::new(200.0, 100.0), &hovering);
        assert!(!scene.pointer_over_interactive());
    }
}
