//! Widget layer for the stopwatch window.
//!
//! Widgets are rebuilt from a [`Component`](app::Component) every frame.
//! Instead of callbacks they push the component's message type into an output
//! queue, which the application then feeds back to `Component::update`.
//!
//! ```rust,ignore
//! use stopwatch_ui::prelude::*;
//!
//! #[derive(Clone)]
//! enum Msg { Bump }
//!
//! struct Counter { n: u32 }
//!
//! impl Component for Counter {
//!     type Msg = Msg;
//!     fn view(&self, fonts: &FontMap) -> Element<Msg> {
//!         Flex::column()
//!             .child(Label::new(self.n.to_string(), fonts.first(), 32.0, Color::WHITE))
//!             .child(Button::new("+1", fonts.first(), 15.0, ButtonStyle::filled(Color::from_hex(0x2e7d32))).on_click(Msg::Bump))
//!             .into()
//!     }
//!     fn update(&mut self, msg: Msg) -> AppControl {
//!         match msg { Msg::Bump => self.n += 1 }
//!         AppControl::Continue
//!     }
//! }
//! ```

pub mod app;
pub mod constraints;
pub mod event;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

pub use app::{Application, Component, FontMap};

/// Everything needed to write a component.
pub mod prelude {
    pub use crate::app::{Application, Component, FontMap};
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::painter::Painter;
    pub use crate::scene::{UiInput, UiScene};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        button::{Button, ButtonStyle},
        flex::{Axis, Flex},
        label::Label,
    };

    pub use stopwatch_engine::coords::{Rect, Vec2};
    pub use stopwatch_engine::core::AppControl;
    pub use stopwatch_engine::input::Key;
    pub use stopwatch_engine::paint::Color;
    pub use stopwatch_engine::text::FontId;
}
