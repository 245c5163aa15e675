//! Stopwatch engine crate.
//!
//! Platform window, GPU device, and the two renderers (rounded boxes, text)
//! the stopwatch UI is drawn with. Higher layers implement [`core::App`] and
//! hand it to [`window::Runtime::run`].

pub mod core;
pub mod device;
pub mod input;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
