use stopwatch_engine::coords::{Rect, Vec2};
use stopwatch_engine::paint::Color;
use stopwatch_engine::scene::Border;
use stopwatch_engine::text::FontId;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Colors for each visual state of a [`Button`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    pub background: Color,
    pub hover: Color,
    pub pressed: Color,
    pub disabled: Color,
    pub text: Color,
    pub disabled_text: Color,
    pub border: Option<Border>,
    pub corner_radius: f32,
}

impl ButtonStyle {
    /// Solid button in `base`, lighter on hover and darker while pressed.
    /// Disabled buttons fade out.
    pub fn filled(base: Color) -> Self {
        Self {
            background: base,
            hover: base.lerp(Color::WHITE, 0.15),
            pressed: base.lerp(Color::BLACK, 0.25),
            disabled: base.with_opacity(0.35),
            text: Color::WHITE,
            disabled_text: Color::WHITE.with_opacity(0.45),
            border: None,
            corner_radius: 4.0,
        }
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text = color;
        self.disabled_text = color.with_opacity(0.45);
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }
}

/// Clickable text button.
///
/// Emits a clone of its `on_click` message when clicked while enabled.
/// Visual state is read from the [`Painter`] during paint, so the button can be
/// rebuilt every frame without retained state.
pub struct Button<M> {
    label: String,
    font: FontId,
    size: f32,
    style: ButtonStyle,
    padding: Edges,
    enabled: bool,
    on_click: Option<M>,
}

impl<M> Button<M> {
    pub fn new(label: impl Into<String>, font: FontId, size: f32, style: ButtonStyle) -> Self {
        Self {
            label: label.into(),
            font,
            size,
            style,
            padding: Edges::symmetric(6.0, 12.0),
            enabled: true,
            on_click: None,
        }
    }

    pub fn on_click(mut self, msg: M) -> Self {
        self.on_click = Some(msg);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    fn background(&self, painter: &Painter, rect: Rect) -> Color {
        if !self.enabled {
            self.style.disabled
        } else if painter.is_pressed(rect) {
            self.style.pressed
        } else if painter.is_hovered(rect) {
            self.style.hover
        } else {
            self.style.background
        }
    }
}

impl<M: Clone + 'static> From<Button<M>> for Element<M> {
    fn from(button: Button<M>) -> Self {
        Element::new(button)
    }
}

impl<M: Clone> Widget<M> for Button<M> {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let text = ctx.fonts.measure(&self.label, self.font, self.size).size();
        constraints.constrain(Vec2::new(text.x + self.padding.h(), text.y + self.padding.v()))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let bg = self.background(painter, rect);
        if self.enabled && painter.is_hovered(rect) {
            painter.mark_interactive();
        }
        painter.fill_rounded_rect(rect, self.style.corner_radius, bg, self.style.border);

        let fg = if self.enabled { self.style.text } else { self.style.disabled_text };
        painter.text_centered(&self.label, self.font, self.size, fg, inset_rect(rect, self.padding));
    }

    fn on_event(
        &self,
        event: &UiEvent,
        rect: Rect,
        _ctx: &LayoutCtx,
        out: &mut Vec<M>,
    ) -> EventResult {
        let UiEvent::Click { pos } = event else {
            return EventResult::Ignored;
        };
        if !rect.contains(*pos) {
            return EventResult::Ignored;
        }
        if !self.enabled {
            log::debug!("click on disabled button {:?} ignored", self.label);
            // Still swallow it; nothing underneath should see the click.
            return EventResult::Consumed;
        }
        if let Some(msg) = &self.on_click {
            out.push(msg.clone());
        }
        EventResult::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stopwatch_engine::scene::{DrawCmd, DrawList};
    use stopwatch_engine::text::FontSystem;

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Go,
    }

    fn button() -> Button<Msg> {
        Button::new("Start", FontId::default(), 15.0, ButtonStyle::filled(Color::from_hex(0x00aa00)))
            .on_click(Msg::Go)
    }

    fn click(b: &Button<Msg>, x: f32, y: f32) -> (EventResult, Vec<Msg>) {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let mut out = Vec::new();
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        let r = b.on_event(&UiEvent::Click { pos: Vec2::new(x, y) }, rect, &ctx, &mut out);
        (r, out)
    }

    #[test]
    fn click_inside_emits_message() {
        let (r, out) = click(&button(), 50.0, 20.0);
        assert_eq!(r, EventResult::Consumed);
        assert_eq!(out, vec![Msg::Go]);
    }

    #[test]
    fn click_outside_emits_nothing() {
        let (r, out) = click(&button(), 150.0, 20.0);
        assert_eq!(r, EventResult::Ignored);
        assert!(out.is_empty());
    }

    #[test]
    fn disabled_button_swallows_click_silently() {
        let (r, out) = click(&button().enabled(false), 50.0, 20.0);
        assert_eq!(r, EventResult::Consumed);
        assert!(out.is_empty());
    }

    #[test]
    fn hover_is_ignored() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let mut out = Vec::new();
        let r = button().on_event(
            &UiEvent::Hover { pos: Vec2::new(5.0, 5.0) },
            Rect::new(0.0, 0.0, 100.0, 40.0),
            &ctx,
            &mut out,
        );
        assert_eq!(r, EventResult::Ignored);
        assert!(out.is_empty());
    }

    fn painted_fill(b: &Button<Msg>, mouse: Option<Vec2>, pressed: bool) -> Color {
        let fonts = FontSystem::new();
        let mut dl = DrawList::new();
        let mut p = Painter::new(&mut dl, &fonts, 1.0, mouse, pressed);
        b.paint(&mut p, Rect::new(0.0, 0.0, 100.0, 40.0));
        match &dl.items()[0].cmd {
            DrawCmd::RoundedRect(cmd) => cmd.fill,
            other => panic!("expected background first, got {other:?}"),
        }
    }

    #[test]
    fn background_follows_pointer_state() {
        let b = button();
        let style = ButtonStyle::filled(Color::from_hex(0x00aa00));
        let inside = Some(Vec2::new(10.0, 10.0));
        assert_eq!(painted_fill(&b, None, false), style.background);
        assert_eq!(painted_fill(&b, inside, false), style.hover);
        assert_eq!(painted_fill(&b, inside, true), style.pressed);
    }

    #[test]
    fn disabled_button_ignores_hover() {
        let b = button().enabled(false);
        let style = ButtonStyle::filled(Color::from_hex(0x00aa00));
        assert_eq!(painted_fill(&b, Some(Vec2::new(10.0, 10.0)), true), style.disabled);
    }

    #[test]
    fn measure_adds_padding() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let b = button().padding(Edges::all(20.0));
        let size = b.measure(Constraints::loose(Vec2::new(500.0, 500.0)), &ctx);
        // No font loaded: zero-width text, 1.2 * 15 px line.
        assert_eq!(size.x, 40.0);
        assert!((size.y - 58.0).abs() < 1e-4);
    }
}
