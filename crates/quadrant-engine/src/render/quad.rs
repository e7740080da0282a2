use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::device::DEPTH_FORMAT;

use super::{RenderCtx, Texture};

// ── vertex ────────────────────────────────────────────────────────────────

/// Quad vertex: NDC position, texture coordinate, color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2, // uv
        2 => Float32x4  // color
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Two triangles covering vertices ordered top-left, top-right,
/// bottom-right, bottom-left.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── draw call ─────────────────────────────────────────────────────────────

/// Shape of an indexed draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCall {
    pub index_count: u32,
    pub instance_count: u32,
}

impl DrawCall {
    /// One quad, one instance.
    pub const QUAD: DrawCall = DrawCall {
        index_count: QUAD_INDICES.len() as u32,
        instance_count: 1,
    };
}

// ── style + bindings ──────────────────────────────────────────────────────

/// Which fragment path the quad pipeline uses.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum QuadStyle {
    /// Texture sampled and modulated by vertex color.
    Textured,
    /// Vertex color only; no texture bindings.
    Flat,
}

/// Resource bindings for a quad draw.
///
/// The texture bind group is absent until a texture has been attached;
/// textured draws issued before that are dropped.
#[derive(Default)]
pub struct QuadBindings {
    texture: Option<wgpu::BindGroup>,
}

impl QuadBindings {
    /// Returns `true` once a texture has been attached.
    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }
}

/// Returns whether a draw with `style` can be recorded given the current
/// bindings.
#[inline]
pub(crate) fn bindings_complete(style: QuadStyle, has_texture: bool) -> bool {
    match style {
        QuadStyle::Flat => true,
        QuadStyle::Textured => has_texture,
    }
}

/// What [`QuadRenderer::draw`] does for one call: the draw shape it reports,
/// and whether commands are actually recorded.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct DrawPlan {
    pub call: DrawCall,
    pub record: bool,
}

/// The reported call is the same whether or not the bindings are ready.
pub(crate) fn plan_draw(style: QuadStyle, has_texture: bool) -> DrawPlan {
    DrawPlan {
        call: DrawCall::QUAD,
        record: bindings_complete(style, has_texture),
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renders a single quad from a dynamic vertex buffer.
///
/// Pipeline state: no culling, depth test `LessEqual` with depth writes,
/// 16-bit indices, no blending.
pub struct QuadRenderer {
    style: QuadStyle,
    pipeline: wgpu::RenderPipeline,

    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,

    // textured style only
    texture_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,
}

impl QuadRenderer {
    /// Creates the pipeline and buffers, seeding the vertex buffer with
    /// `vertices`.
    pub fn new(ctx: &RenderCtx<'_>, style: QuadStyle, vertices: &[Vertex; 4]) -> Self {
        let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad-vertices"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let index_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad-indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let (texture_layout, sampler) = match style {
            QuadStyle::Textured => (
                Some(create_texture_layout(ctx.device)),
                Some(create_sampler(ctx.device)),
            ),
            QuadStyle::Flat => (None, None),
        };

        let pipeline = create_pipeline(ctx, style, texture_layout.as_ref());

        log::debug!("quad renderer created ({style:?}, {:?})", ctx.surface_format);

        Self {
            style,
            pipeline,
            vertex_buffer,
            index_buffer,
            texture_layout,
            sampler,
        }
    }

    /// Overwrites the vertex buffer.
    pub fn update_vertices(&self, queue: &wgpu::Queue, vertices: &[Vertex; 4]) {
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
    }

    /// Attaches `texture` to `bindings`, replacing any previous texture.
    ///
    /// Flat renderers have nothing to bind; the call is ignored.
    pub fn attach_texture(
        &self,
        ctx: &RenderCtx<'_>,
        bindings: &mut QuadBindings,
        texture: &Texture,
    ) {
        let (Some(layout), Some(sampler)) = (self.texture_layout.as_ref(), self.sampler.as_ref())
        else {
            log::debug!("attach_texture on a flat quad renderer; ignored");
            return;
        };

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quad texture bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        bindings.texture = Some(bind_group);
    }

    /// Issues the quad draw into `rpass`.
    ///
    /// Always returns [`DrawCall::QUAD`]. When the bindings are incomplete
    /// (textured style, no texture yet) nothing is recorded.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, bindings: &QuadBindings) -> DrawCall {
        let DrawPlan { call, record } = plan_draw(self.style, bindings.has_texture());
        if !record {
            return call;
        }

        rpass.set_pipeline(&self.pipeline);
        if let Some(bind_group) = bindings.texture.as_ref() {
            rpass.set_bind_group(0, bind_group, &[]);
        }
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..call.index_count, 0, 0..call.instance_count);
        call
    }
}

fn create_texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("quad texture bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("quad sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}

fn create_pipeline(
    ctx: &RenderCtx<'_>,
    style: QuadStyle,
    texture_layout: Option<&wgpu::BindGroupLayout>,
) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("quad shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/quad.wgsl").into()),
    });

    let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = texture_layout.into_iter().collect();
    let pipeline_layout = ctx
        .device
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("quad pipeline layout"),
            bind_group_layouts: &bind_group_layouts,
            immediate_size: 0,
        });

    let fs_entry = match style {
        QuadStyle::Textured => "fs_textured",
        QuadStyle::Flat => "fs_flat",
    };

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("quad-pipeline"),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(fs_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_nine_tightly_packed_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 9 * 4);
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 36);
        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 20]);
    }

    #[test]
    fn indices_cover_two_triangles() {
        assert_eq!(QUAD_INDICES, [0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn quad_draw_call_is_six_indices_one_instance() {
        assert_eq!(DrawCall::QUAD, DrawCall { index_count: 6, instance_count: 1 });
    }

    #[test]
    fn textured_draw_needs_a_texture() {
        assert!(!bindings_complete(QuadStyle::Textured, false));
        assert!(bindings_complete(QuadStyle::Textured, true));
    }

    #[test]
    fn flat_draw_never_waits() {
        assert!(bindings_complete(QuadStyle::Flat, false));
    }

    #[test]
    fn draw_shape_is_independent_of_texture_readiness() {
        for style in [QuadStyle::Textured, QuadStyle::Flat] {
            for has_texture in [false, true] {
                let plan = plan_draw(style, has_texture);
                assert_eq!(plan.call, DrawCall { index_count: 6, instance_count: 1 });
                assert_eq!(plan.record, bindings_complete(style, has_texture));
            }
        }
        assert!(!plan_draw(QuadStyle::Textured, false).record);
    }

    #[test]
    fn default_bindings_have_no_texture() {
        assert!(!QuadBindings::default().has_texture());
    }
}
