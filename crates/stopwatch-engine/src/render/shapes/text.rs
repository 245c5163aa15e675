use std::collections::{HashMap, HashSet};

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{GlyphRasterConfig, Layout};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::text::{new_layout, FontId, FontSystem};

use super::common::{
    create_quad_pipeline, create_viewport_ubo, viewport_layout_entry, write_viewport,
    InstanceBuffer, UnitQuad,
};

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1;

/// Fonts already reported as missing, so each is logged once.
#[derive(Debug, Default)]
struct MissingFonts(HashSet<FontId>);

impl MissingFonts {
    fn first_miss(&mut self, id: FontId) -> bool {
        self.0.insert(id)
    }
}

// ── shelf packer ──────────────────────────────────────────────────────────

/// Row-by-row rectangle packer for the glyph atlas.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self { size, cursor_x: GLYPH_PADDING, cursor_y: GLYPH_PADDING, row_height: 0, full: false }
    }

    /// Reserves a `w` x `h` slot and returns its top-left corner.
    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full || w + 2 * GLYPH_PADDING > self.size {
            return None;
        }
        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }
        if self.cursor_x + w + GLYPH_PADDING > self.size
            || self.cursor_y + h + GLYPH_PADDING > self.size
        {
            self.full = true;
            return None;
        }

        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone)]
struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x2,
        5 => Float32x4,
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Atlas texture and its bindings. Independent of the surface format.
struct Atlas {
    texture: wgpu::Texture,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    quad: UnitQuad,
}

impl Atlas {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("stopwatch glyph atlas"),
            size: wgpu::Extent3d { width: ATLAS_SIZE, height: ATLAS_SIZE, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("stopwatch glyph sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("stopwatch text bgl"),
            entries: &[
                viewport_layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let viewport_ubo = create_viewport_ubo(ctx, "stopwatch text viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("stopwatch text bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: viewport_ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::TextureView(&view) },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(&sampler) },
            ],
        });

        Self {
            texture,
            bind_group_layout,
            bind_group,
            viewport_ubo,
            quad: UnitQuad::new(ctx, "stopwatch text"),
        }
    }

    fn upload(&self, ctx: &RenderCtx<'_>, (x, y): (u32, u32), w: u32, h: u32, bitmap: &[u8]) {
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout { offset: 0, bytes_per_row: Some(w), rows_per_image: Some(h) },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are rasterized with fontdue at `size * scale_factor` physical pixels
/// and cached in a single R8 atlas for the renderer's lifetime. Glyph origins
/// are snapped to the physical pixel grid so digits do not shimmer as the
/// display changes.
pub struct TextRenderer {
    atlas: Option<Atlas>,
    pipeline: Option<(wgpu::TextureFormat, wgpu::RenderPipeline)>,
    packer: ShelfPacker,
    cache: HashMap<GlyphRasterConfig, CachedGlyph>,
    layout: Layout<()>,
    instances: InstanceBuffer<GlyphInstance>,
    scratch: Vec<GlyphInstance>,
    missing_fonts: MissingFonts,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            atlas: None,
            pipeline: None,
            packer: ShelfPacker::new(ATLAS_SIZE),
            cache: HashMap::new(),
            layout: new_layout(),
            instances: InstanceBuffer::new("stopwatch text instances"),
            scratch: Vec::new(),
            missing_fonts: MissingFonts::default(),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws every `DrawCmd::Text` in `draw_list`, in paint order.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        let atlas = self.atlas.get_or_insert_with(|| Atlas::new(ctx));
        let scale = ctx.scale_factor.max(f32::EPSILON);

        self.scratch.clear();
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Text(cmd) = &item.cmd else { continue };
            let Some(font) = fonts.get(cmd.font) else {
                if self.missing_fonts.first_miss(cmd.font) {
                    log::warn!("TextRenderer: unknown {:?}, skipping its text", cmd.font);
                }
                continue;
            };
            if !fonts.layout_line(&mut self.layout, &cmd.text, cmd.font, cmd.size * scale) {
                continue;
            }

            let base_x = (cmd.origin.x * scale).round();
            let base_y = (cmd.origin.y * scale).round();
            let color = cmd.color.to_array();

            for g in self.layout.glyphs() {
                if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                    continue;
                }

                let cached = match self.cache.get(&g.key) {
                    Some(c) => *c,
                    None => {
                        let (metrics, bitmap) = font.rasterize_config(g.key);
                        let (w, h) = (metrics.width as u32, metrics.height as u32);
                        let Some(slot) = self.packer.allocate(w, h) else {
                            log::warn!(
                                "TextRenderer: glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); \
                                 some glyphs will not be rendered"
                            );
                            continue;
                        };
                        atlas.upload(ctx, slot, w, h, &bitmap);
                        let entry = uv_rect(slot, w, h);
                        self.cache.insert(g.key, entry);
                        entry
                    }
                };

                let x = base_x + g.x.round();
                let y = base_y + g.y.round();
                self.scratch.push(GlyphInstance {
                    dst_min: [x / scale, y / scale],
                    dst_max: [(x + g.width as f32) / scale, (y + g.height as f32) / scale],
                    uv_min: cached.uv_min,
                    uv_max: cached.uv_max,
                    color,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        if self.pipeline.as_ref().is_none_or(|(f, _)| *f != ctx.surface_format) {
            log::debug!("building text pipeline for {:?}", ctx.surface_format);
            let pipeline = create_quad_pipeline(
                ctx,
                "stopwatch text",
                include_str!("shaders/text.wgsl"),
                &atlas.bind_group_layout,
                GlyphInstance::layout(),
            );
            self.pipeline = Some((ctx.surface_format, pipeline));
        }

        write_viewport(ctx, &atlas.viewport_ubo);
        self.instances.upload(ctx, &self.scratch);

        let (Some((_, pipeline)), Some(instance_vbo)) =
            (self.pipeline.as_ref(), self.instances.buffer())
        else {
            return;
        };

        let mut rpass = target.overlay_pass("stopwatch text pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &atlas.bind_group, &[]);
        atlas.quad.bind(&mut rpass);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.draw_indexed(0..UnitQuad::INDEX_COUNT, 0, 0..self.instances.len());
    }
}

fn uv_rect((x, y): (u32, u32), w: u32, h: u32) -> CachedGlyph {
    let s = ATLAS_SIZE as f32;
    CachedGlyph {
        uv_min: [x as f32 / s, y as f32 / s],
        uv_max: [(x + w) as f32 / s, (y + h) as f32 / s],
    }
}
