use std::collections::HashMap;
use std::time::Instant;

use winit::dpi::LogicalSize;

use stopwatch_engine::coords::{Vec2, Viewport};
use stopwatch_engine::core::{App as EngineApp, AppControl, FrameCtx};
use stopwatch_engine::device::GpuInit;
use stopwatch_engine::input::{InputFrame, InputState, Key, MouseButton};
use stopwatch_engine::paint::Color;
use stopwatch_engine::render::shapes::rounded_rect::RoundedRectRenderer;
use stopwatch_engine::render::shapes::text::TextRenderer;
use stopwatch_engine::text::FontId;
use stopwatch_engine::window::{CursorIcon, Runtime, RuntimeConfig};

use crate::scene::{UiInput, UiScene};
use crate::widget::Element;

// ── Component ─────────────────────────────────────────────────────────────

/// Application logic driven by [`Application::run`].
///
/// Each frame the runtime calls `before_frame`, builds the tree with `view`,
/// routes pointer input through it and feeds the resulting messages (plus
/// whatever `on_key` maps key presses to) into `update`. If anything changed
/// the tree is rebuilt before painting.
pub trait Component: 'static {
    type Msg: Clone + 'static;

    fn view(&self, fonts: &FontMap) -> Element<Self::Msg>;

    /// Applies one message. Returning `Exit` closes the window.
    fn update(&mut self, msg: Self::Msg) -> AppControl;

    /// Maps a fresh key press to a message.
    fn on_key(&self, key: Key) -> Option<Self::Msg> {
        let _ = key;
        None
    }

    /// Called at the top of every frame, before input is routed.
    fn before_frame(&mut self) {}

    /// Next instant this component needs a frame without any input.
    fn next_wakeup(&self) -> Option<Instant> {
        None
    }
}

// ── FontMap ───────────────────────────────────────────────────────────────

/// Loaded fonts by registration name.
#[derive(Debug, Clone, Default)]
pub struct FontMap {
    by_name: HashMap<String, FontId>,
    first: Option<FontId>,
}

impl FontMap {
    pub(crate) fn insert(&mut self, name: impl Into<String>, id: FontId) {
        self.by_name.insert(name.into(), id);
        self.first.get_or_insert(id);
    }

    /// Font registered as `name`, if its bytes loaded.
    pub fn get(&self, name: &str) -> Option<FontId> {
        self.by_name.get(name).copied()
    }

    /// First font that loaded, or a handle that paints nothing if none did.
    pub fn first(&self) -> FontId {
        self.first.unwrap_or_default()
    }

    /// `name`, falling back to [`first`](Self::first).
    pub fn get_or_first(&self, name: &str) -> FontId {
        self.get(name).unwrap_or_else(|| self.first())
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

// ── Application ───────────────────────────────────────────────────────────

/// Window builder for a [`Component`].
///
/// ```rust,ignore
/// Application::new()
///     .title("Stopwatch")
///     .size(400.0, 200.0)
///     .always_on_top(true)
///     .opacity(0.9)
///     .font("mono", bytes)
///     .run(MyComponent::default())?;
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    min_size: Option<(f64, f64)>,
    always_on_top: bool,
    opacity: f32,
    background: Color,
    fonts: Vec<(String, Vec<u8>)>,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title: "stopwatch".to_string(),
            width: 400.0,
            height: 200.0,
            min_size: None,
            always_on_top: false,
            opacity: 1.0,
            background: Color::BLACK,
            fonts: Vec::new(),
        }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn min_size(mut self, width: f64, height: f64) -> Self {
        self.min_size = Some((width, height));
        self
    }

    pub fn always_on_top(mut self, on: bool) -> Self {
        self.always_on_top = on;
        self
    }

    /// Whole-window opacity in `[0, 1]`. Below 1 the window is created
    /// transparent and every color is faded by this factor.
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Registers font bytes under `name`. Bad or empty data is logged and
    /// skipped when the window starts.
    pub fn font(mut self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.fonts.push((name.into(), data));
        self
    }

    /// Opens the window and runs `component` until it exits or the window closes.
    pub fn run<C: Component>(self, component: C) -> anyhow::Result<()> {
        let transparent = self.opacity < 1.0;
        let config = RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            min_size: self.min_size.map(|(w, h)| LogicalSize::new(w, h)),
            resizable: true,
            always_on_top: self.always_on_top,
            transparent,
        };
        let gpu_init = if transparent { GpuInit::translucent() } else { GpuInit::default() };

        let state = UiAppState::new(self, component);
        Runtime::run(config, gpu_init, state)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── UiAppState ────────────────────────────────────────────────────────────

/// Engine-facing side of an [`Application`]. Owns the renderers.
struct UiAppState<C: Component> {
    component: C,
    fonts: FontMap,
    scene: UiScene,
    clear: Color,
    rounded_rect_renderer: RoundedRectRenderer,
    text_renderer: TextRenderer,
    messages: Vec<C::Msg>,
    pointer_cursor: bool,
}

impl<C: Component> UiAppState<C> {
    fn new(app: Application, component: C) -> Self {
        let mut scene = UiScene::new();
        scene.opacity = app.opacity;

        let mut fonts = FontMap::default();
        for (name, bytes) in &app.fonts {
            match scene.load_font(bytes) {
                Ok(id) => fonts.insert(name.as_str(), id),
                Err(e) => log::warn!("font '{name}' unavailable: {e}"),
            }
        }
        if fonts.is_empty() {
            log::warn!("no fonts loaded; text will not be drawn");
        }

        Self {
            component,
            fonts,
            scene,
            clear: app.background.with_opacity(app.opacity),
            rounded_rect_renderer: RoundedRectRenderer::new(),
            text_renderer: TextRenderer::new(),
            messages: Vec::new(),
            pointer_cursor: false,
        }
    }

    /// Runs one input/update cycle and returns the tree to paint, or `None`
    /// if the component asked to exit.
    fn step(&mut self, viewport: Viewport, input: &UiInput, keys: &[Key]) -> Option<Element<C::Msg>> {
        self.component.before_frame();

        let root = self.component.view(&self.fonts);
        self.scene.route(&root, viewport, input, &mut self.messages);
        self.messages.extend(keys.iter().filter_map(|k| self.component.on_key(*k)));
        if self.messages.is_empty() {
            return Some(root);
        }

        // Messages queued after an exit are dropped with the drain.
        let mut messages = std::mem::take(&mut self.messages);
        let exit = messages.drain(..).any(|msg| self.component.update(msg) == AppControl::Exit);
        self.messages = messages;
        if exit {
            return None;
        }
        self.component.before_frame();
        Some(self.component.view(&self.fonts))
    }
}

fn ui_input(state: &InputState, frame: &InputFrame) -> UiInput {
    UiInput {
        mouse_pos: state.pointer_pos.map(|(x, y)| Vec2::new(x, y)),
        mouse_pressed: state.button_down(MouseButton::Left),
        mouse_clicked: frame.buttons_released.contains(&MouseButton::Left),
    }
}

impl<C: Component> EngineApp for UiAppState<C> {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.logical_size();
        let input = ui_input(ctx.input, ctx.input_frame);

        let Some(root) = self.step(viewport, &input, &ctx.input_frame.keys_pressed) else {
            return AppControl::Exit;
        };
        self.scene.frame(&root, viewport, &input);

        let pointer = self.scene.pointer_over_interactive();
        if pointer != self.pointer_cursor {
            self.pointer_cursor = pointer;
            ctx.window
                .set_cursor(if pointer { CursorIcon::Pointer } else { CursorIcon::Default });
        }

        let dl = &mut self.scene.draw_list;
        let fs = &self.scene.font_system;
        let rects = &mut self.rounded_rect_renderer;
        let text = &mut self.text_renderer;
        ctx.render(self.clear, |rctx, target| {
            rects.render(rctx, target, dl);
            text.render(rctx, target, dl, fs);
        })
    }

    fn next_wakeup(&self) -> Option<Instant> {
        self.component.next_wakeup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stopwatch_engine::input::{InputEvent, MouseButtonState, PointerButtonEvent};

    use crate::widgets::button::{Button, ButtonStyle};
    use crate::widgets::flex::Flex;

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Inc,
        Quit,
    }

    #[derive(Default)]
    struct Counter {
        n: u32,
        frames: u32,
    }

    impl Component for Counter {
        type Msg = Msg;

        fn view(&self, fonts: &FontMap) -> Element<Msg> {
            let style = ButtonStyle::filled(Color::WHITE);
            Flex::<Msg>::row()
                .child(Button::new(self.n.to_string(), fonts.first(), 15.0, style).on_click(Msg::Inc))
                .into()
        }

        fn update(&mut self, msg: Msg) -> AppControl {
            match msg {
                Msg::Inc => {
                    self.n += 1;
                    AppControl::Continue
                }
                Msg::Quit => AppControl::Exit,
            }
        }

        fn on_key(&self, key: Key) -> Option<Msg> {
            match key {
                Key::Space => Some(Msg::Inc),
                Key::Escape => Some(Msg::Quit),
                _ => None,
            }
        }

        fn before_frame(&mut self) {
            self.frames += 1;
        }
    }

    fn state() -> UiAppState<Counter> {
        UiAppState::new(Application::new(), Counter::default())
    }

    const VP: Viewport = Viewport::new(100.0, 100.0);

    #[test]
    fn idle_frame_updates_nothing() {
        let mut s = state();
        assert!(s.step(VP, &UiInput::default(), &[]).is_some());
        assert_eq!(s.component.n, 0);
        assert_eq!(s.component.frames, 1);
    }

    #[test]
    fn click_and_key_both_reach_update() {
        let mut s = state();
        let input = UiInput {
            mouse_pos: Some(Vec2::new(50.0, 50.0)),
            mouse_pressed: false,
            mouse_clicked: true,
        };
        assert!(s.step(VP, &input, &[Key::Space]).is_some());
        assert_eq!(s.component.n, 2);
        // Updated state is polled again before the tree is rebuilt.
        assert_eq!(s.component.frames, 2);
    }

    #[test]
    fn exit_message_stops_the_frame() {
        let mut s = state();
        assert!(s.step(VP, &UiInput::default(), &[Key::Escape, Key::Space]).is_none());
        assert_eq!(s.component.n, 0);
        assert!(s.messages.is_empty());

        // Queue is reusable after an early exit.
        assert!(s.step(VP, &UiInput::default(), &[Key::Space]).is_some());
        assert_eq!(s.component.n, 1);
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        let mut s = state();
        assert!(s.step(VP, &UiInput::default(), &[Key::Tab]).is_some());
        assert_eq!(s.component.n, 0);
    }

    #[test]
    fn font_map_falls_back_to_first() {
        let mut fonts = FontMap::default();
        assert!(fonts.is_empty());
        assert_eq!(fonts.first(), FontId::default());

        let a = FontId::default();
        fonts.insert("mono", a);
        assert_eq!(fonts.get("mono"), Some(a));
        assert_eq!(fonts.get("sans"), None);
        assert_eq!(fonts.get_or_first("sans"), a);
    }

    #[test]
    fn bad_font_bytes_are_skipped() {
        let app = Application::new().font("mono", Vec::new()).font("sans", b"junk".to_vec());
        let s = UiAppState::new(app, Counter::default());
        assert!(s.fonts.is_empty());
        assert!(s.scene.font_system.is_empty());
    }

    #[test]
    fn opacity_fades_the_clear_color() {
        let app = Application::new().background(Color::WHITE).opacity(0.5);
        let s = UiAppState::new(app, Counter::default());
        assert_eq!(s.clear.a, 0.5);
        assert_eq!(s.scene.opacity, 0.5);
    }

    #[test]
    fn release_of_left_button_is_a_click() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        let press = |state| {
            InputEvent::PointerButton(PointerButtonEvent { button: MouseButton::Left, state, x: 3.0, y: 4.0 })
        };
        st.apply_event(&mut fr, press(MouseButtonState::Pressed));
        let held = ui_input(&st, &fr);
        assert!(held.mouse_pressed);
        assert!(!held.mouse_clicked);

        st.apply_event(&mut fr, press(MouseButtonState::Released));
        let released = ui_input(&st, &fr);
        assert!(released.mouse_clicked);
        assert_eq!(released.mouse_pos, Some(Vec2::new(3.0, 4.0)));
    }
}
