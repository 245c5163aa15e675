//! Colors shared by the UI and renderers.

pub mod color;

pub use color::Color;
