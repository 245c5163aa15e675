//! GPU device and surface management.
//!
//! Creates the wgpu instance, adapter, device and queue, configures the window
//! surface, and hands out one [`GpuFrame`] at a time for recording.

mod frame;
mod gpu;
mod init;
mod surface;

pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
