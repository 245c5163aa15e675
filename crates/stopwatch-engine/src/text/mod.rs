//! Font loading and text measurement.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem, TextMetrics};
pub(crate) use font_system::new_layout;
