use std::time::Instant;

use stopwatch_core::{Action, Clock, Stopwatch, SystemClock};
use stopwatch_ui::prelude::*;

use crate::config::Theme;
use crate::fonts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Control(Action),
    Quit,
}

/// The stopwatch window: time display on top, Start / Stop / Reset below.
pub struct StopwatchView<C: Clock = SystemClock> {
    stopwatch: Stopwatch<C>,
    theme: Theme,
}

impl StopwatchView<SystemClock> {
    pub fn new(theme: Theme) -> Self {
        Self { stopwatch: Stopwatch::new(), theme }
    }
}

impl<C: Clock> StopwatchView<C> {
    #[cfg(test)]
    fn with_clock(clock: C) -> Self {
        Self { stopwatch: Stopwatch::with_clock(clock), theme: Theme::default() }
    }

    fn button(&self, label: &str, font: FontId, color: Color, enabled: bool, action: Action) -> Button<Msg> {
        let style = ButtonStyle::filled(color).text_color(self.theme.button_text);
        Button::new(label, font, self.theme.button_text_size, style)
            .enabled(enabled)
            .on_click(Msg::Control(action))
    }
}

impl<C: Clock + 'static> Component for StopwatchView<C> {
    type Msg = Msg;

    fn view(&self, font_map: &FontMap) -> Element<Msg> {
        let display_font = font_map.get_or_first(fonts::DISPLAY);
        let button_font = font_map.get_or_first(fonts::BUTTON);
        let controls = self.stopwatch.controls();
        let t = &self.theme;

        let display = Label::new(self.stopwatch.display(), display_font, t.display_size, t.display);
        let buttons = Flex::<Msg>::row()
            .padding_all(t.cell_padding)
            .spacing(t.cell_padding * 2.0)
            .child(self.button("Start", button_font, t.start, controls.start, Action::Start))
            .child(self.button("Stop", button_font, t.stop, controls.stop, Action::Stop))
            .child(self.button("Reset", button_font, t.reset, controls.reset, Action::Reset));

        Flex::<Msg>::column().child(display).child(buttons).into()
    }

    fn update(&mut self, msg: Msg) -> AppControl {
        match msg {
            Msg::Control(action) => {
                if self.stopwatch.apply(action) {
                    log::info!("{action:?} -> {:?} at {}", self.stopwatch.state(), self.stopwatch.display());
                }
                AppControl::Continue
            }
            Msg::Quit => AppControl::Exit,
        }
    }

    fn on_key(&self, key: Key) -> Option<Msg> {
        match key {
            Key::Space => Some(Msg::Control(Action::Toggle)),
            Key::R => Some(Msg::Control(Action::Reset)),
            Key::Escape => Some(Msg::Quit),
            _ => None,
        }
    }

    fn before_frame(&mut self) {
        self.stopwatch.poll();
    }

    fn next_wakeup(&self) -> Option<Instant> {
        self.stopwatch.next_wakeup()
    }
}
