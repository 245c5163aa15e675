//! GPU rendering.
//!
//! Each renderer owns its pipeline and buffers, created lazily on first use and
//! rebuilt if the surface format changes. CPU geometry is in logical pixels;
//! vertex shaders convert to NDC with a viewport uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
