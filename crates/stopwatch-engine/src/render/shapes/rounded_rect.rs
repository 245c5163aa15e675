use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::scene::shapes::rounded_rect::RoundedRectCmd;

use super::common::{
    create_quad_pipeline, create_viewport_ubo, viewport_layout_entry, write_viewport,
    InstanceBuffer, UnitQuad,
};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectInstance {
    rect_min: [f32; 2],
    rect_size: [f32; 2],
    fill: [f32; 4],
    border_color: [f32; 4],
    /// x = corner radius, y = border width.
    radius_border: [f32; 2],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x2,
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    fn from_cmd(cmd: &RoundedRectCmd) -> Self {
        let r = cmd.rect;
        // Radius cannot exceed half the shorter side.
        let max_radius = 0.5 * r.size.x.min(r.size.y);
        let radius = cmd.radius.clamp(0.0, max_radius.max(0.0));
        let (border_color, border_width) = match cmd.border {
            Some(b) if b.width > 0.0 => (b.color.to_array(), b.width),
            _ => ([0.0; 4], 0.0),
        };
        Self {
            rect_min: [r.origin.x, r.origin.y],
            rect_size: [r.size.x, r.size.y],
            fill: cmd.fill.to_array(),
            border_color,
            radius_border: [radius, border_width],
        }
    }
}

/// Format-dependent GPU objects, rebuilt when the surface format changes.
struct Pipeline {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    quad: UnitQuad,
}

/// Renderer for `DrawCmd::RoundedRect`.
///
/// Edges are anti-aliased with a signed-distance function in the fragment
/// shader; borders are painted inside the outer edge.
pub struct RoundedRectRenderer {
    pipeline: Option<Pipeline>,
    instances: InstanceBuffer<RectInstance>,
    scratch: Vec<RectInstance>,
}

impl Default for RoundedRectRenderer {
    fn default() -> Self {
        Self {
            pipeline: None,
            instances: InstanceBuffer::new("stopwatch rounded rect instances"),
            scratch: Vec::new(),
        }
    }
}

impl RoundedRectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws every `DrawCmd::RoundedRect` in `draw_list`, in paint order.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.scratch.clear();
        self.scratch.extend(draw_list.iter_in_paint_order().filter_map(|item| match &item.cmd {
            DrawCmd::RoundedRect(cmd) if !cmd.rect.is_empty() => Some(RectInstance::from_cmd(cmd)),
            _ => None,
        }));
        if self.scratch.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.instances.upload(ctx, &self.scratch);

        let (Some(pipe), Some(instance_vbo)) = (self.pipeline.as_ref(), self.instances.buffer())
        else {
            return;
        };
        write_viewport(ctx, &pipe.viewport_ubo);

        let mut rpass = target.overlay_pass("stopwatch rounded rect pass");
        rpass.set_pipeline(&pipe.pipeline);
        rpass.set_bind_group(0, &pipe.bind_group, &[]);
        pipe.quad.bind(&mut rpass);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.draw_indexed(0..UnitQuad::INDEX_COUNT, 0, 0..self.instances.len());
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline.as_ref().is_some_and(|p| p.format == ctx.surface_format) {
            return;
        }
        log::debug!("building rounded rect pipeline for {:?}", ctx.surface_format);
        self.pipeline = Some(Self::build_pipeline(ctx));
    }

    fn build_pipeline(ctx: &RenderCtx<'_>) -> Pipeline {
        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("stopwatch rounded rect bgl"),
            entries: &[viewport_layout_entry()],
        });

        let pipeline = create_quad_pipeline(
            ctx,
            "stopwatch rounded rect",
            include_str!("shaders/rounded_rect.wgsl"),
            &bgl,
            RectInstance::layout(),
        );

        let viewport_ubo = create_viewport_ubo(ctx, "stopwatch rounded rect viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("stopwatch rounded rect bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        Pipeline {
            format: ctx.surface_format,
            pipeline,
            bind_group,
            viewport_ubo,
            quad: UnitQuad::new(ctx, "stopwatch rounded rect"),
        }
    }
}
