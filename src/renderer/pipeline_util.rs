//! Pipeline boilerplate shared by the box and line passes.

use crate::gpu::texture::DEPTH_FORMAT;

/// Alpha-blended color target in the surface format.
pub fn color_target(
    format: wgpu::TextureFormat,
) -> [Option<wgpu::ColorTargetState>; 1] {
    [Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        write_mask: wgpu::ColorWrites::ALL,
    })]
}

/// Depth-tested, depth-writing state for scene geometry.
pub fn depth_stencil_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Depth state for screen-space overlays: always passes, never writes.
pub fn overlay_depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        depth_write_enabled: false,
        depth_compare: wgpu::CompareFunction::Always,
        ..depth_stencil_state()
    }
}

/// Vertex-visible uniform buffer binding.
pub fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Everything that varies between the crate's render pipelines.
pub struct PipelineSpec<'a> {
    /// Debug label.
    pub label: &'a str,
    /// Compiled WGSL module.
    pub shader: &'a wgpu::ShaderModule,
    /// Vertex entry point.
    pub vs_entry: &'a str,
    /// Vertex buffer layouts.
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
    /// Primitive topology.
    pub topology: wgpu::PrimitiveTopology,
    /// Depth behaviour.
    pub depth: wgpu::DepthStencilState,
}

/// Build a render pipeline with an `fs_main` fragment stage writing one
/// blended color target.
pub fn create_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    layout: &wgpu::PipelineLayout,
    spec: &PipelineSpec<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: spec.shader,
            entry_point: Some(spec.vs_entry),
            buffers: spec.buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: spec.shader,
            entry_point: Some("fs_main"),
            targets: &color_target(format),
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: spec.topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(spec.depth.clone()),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
