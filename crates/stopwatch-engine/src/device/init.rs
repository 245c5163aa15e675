/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when one is offered.
    pub prefer_srgb: bool,

    /// FIFO is supported everywhere and is plenty for a UI redrawn on demand.
    pub present_mode: wgpu::PresentMode,

    /// Composite alpha modes to try, in order. The first one the surface
    /// supports wins; otherwise the surface's own first mode is used.
    pub alpha_modes: Vec<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,

    /// Hint only; support depends on platform and backend.
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    /// Settings for a window whose clear color carries alpha.
    ///
    /// Asks for premultiplied composition, falling back to whatever the
    /// compositor offers.
    pub fn translucent() -> Self {
        Self {
            alpha_modes: vec![
                wgpu::CompositeAlphaMode::PreMultiplied,
                wgpu::CompositeAlphaMode::PostMultiplied,
            ],
            ..Self::default()
        }
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_modes: Vec::new(),
            // A stopwatch has no business waking the discrete GPU.
            power_preference: wgpu::PowerPreference::LowPower,
            desired_maximum_frame_latency: 2,
        }
    }
}
