//! Shape renderers.

mod common;

pub mod rounded_rect;
pub mod text;
