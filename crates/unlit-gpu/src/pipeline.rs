use unlit_core::binding;
use wgpu::util::DeviceExt;
use wgpu::{BindGroup, BindGroupLayout, Buffer, Device, Queue, RenderPipeline, TextureView};

use crate::shader::UNLIT_WGSL;

// ---------------------------------------------------------------------------
// UvWindow: the UV range the host quad feeds the fragment stage
// ---------------------------------------------------------------------------

/// Must match the `uv_window` uniform in [`UNLIT_WGSL`]:
/// (min u, min v, max u, max v), already vec4-sized so no padding needed.
/// `repr(C)` + `bytemuck` ensures safe casting to `&[u8]`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UvWindow {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl UvWindow {
    /// The whole texture once over: (0, 0) top-left to (1, 1) bottom-right.
    pub const IDENTITY: Self = Self {
        min: [0.0, 0.0],
        max: [1.0, 1.0],
    };

    /// Window collapsed onto a single coordinate; every fragment samples
    /// there. Out-of-range values exercise the sampler's address modes.
    pub fn pinned(u: f32, v: f32) -> Self {
        Self {
            min: [u, v],
            max: [u, v],
        }
    }

    /// Scale the window around its center. Factors above 1 push the corners
    /// outside [0, 1], so the sampler's address modes become visible.
    pub fn scaled(self, factor: f32) -> Self {
        let cx = (self.min[0] + self.max[0]) * 0.5;
        let cy = (self.min[1] + self.max[1]) * 0.5;
        let hx = (self.max[0] - self.min[0]) * 0.5 * factor;
        let hy = (self.max[1] - self.min[1]) * 0.5 * factor;
        Self {
            min: [cx - hx, cy - hy],
            max: [cx + hx, cy + hy],
        }
    }
}

// ---------------------------------------------------------------------------
// UnlitPipeline
// ---------------------------------------------------------------------------

/// The render pipeline around [`UNLIT_WGSL`] plus the resources it owns: the
/// UV-window uniform with its group-0 bind group, and the group-1 layout that
/// material bind groups are created against.
pub struct UnlitPipeline {
    pipeline: RenderPipeline,
    material_bgl: BindGroupLayout,
    window_buf: Buffer,
    window_bg: BindGroup,
}

impl UnlitPipeline {
    pub fn new(device: &Device, target_format: wgpu::TextureFormat) -> Self {
        // --- bind group layouts ------------------------------------------------
        // group 0, binding 0 : uv window uniform (vertex)
        // group 1, binding 0 : sampled 2D color texture (fragment)
        // group 1, binding 1 : filtering sampler (fragment)
        let window_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("unlit_window_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let material_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("unlit_material_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: binding::TEXTURE_BINDING,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: binding::SAMPLER_BINDING,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("unlit_pl"),
            bind_group_layouts: &[&window_bgl, &material_bgl],
            push_constant_ranges: &[],
        });

        // --- uv window uniform ---------------------------------------------------
        let window_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("unlit_uv_window"),
            contents: bytemuck::bytes_of(&UvWindow::IDENTITY),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let window_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("unlit_window_bg"),
            layout: &window_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: window_buf.as_entire_binding(),
            }],
        });

        // --- pipeline -------------------------------------------------------------
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("unlit"),
            source: wgpu::ShaderSource::Wgsl(UNLIT_WGSL.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("unlit_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            material_bgl,
            window_buf,
            window_bg,
        }
    }

    /// Upload a new UV window. Applies to passes encoded afterwards.
    pub fn set_uv_window(&self, queue: &Queue, window: UvWindow) {
        queue.write_buffer(&self.window_buf, 0, bytemuck::bytes_of(&window));
    }

    /// Bind a texture + sampler pair as the material group.
    pub fn bind_material(
        &self,
        device: &Device,
        view: &TextureView,
        sampler: &wgpu::Sampler,
    ) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("unlit_material_bg"),
            layout: &self.material_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: binding::TEXTURE_BINDING,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: binding::SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    /// Record one draw of the quad into `encoder`, clearing `target` first.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &TextureView,
        material: &BindGroup,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("unlit_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.window_bg, &[]);
        rpass.set_bind_group(binding::MATERIAL_GROUP, material, &[]);
        rpass.draw(0..6, 0..1); // two triangles, no vertex buffer
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
