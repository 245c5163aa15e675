//! Renderer-agnostic draw stream.
//!
//! Widgets record [`DrawCmd`]s into a [`DrawList`]; each renderer picks out the
//! commands it understands and draws them in paint order (z-index, then
//! insertion order).

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use shapes::Border;
pub use shapes::rounded_rect::RoundedRectCmd;
pub use shapes::text::TextCmd;
pub use z_index::ZIndex;
