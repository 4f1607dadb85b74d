//! Instanced box pass: one unit cube mesh, one instance per part.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

use super::pipeline_util::{self, PipelineSpec};
use crate::gpu::dynamic_buffer::GrowableBuffer;
use crate::part::PickablePart;

/// Cube corner with its face normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
    /// Position on the cube spanning `-1..=1`.
    pub position: [f32; 3],
    /// Outward face normal.
    pub normal: [f32; 3],
}

impl CubeVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-part instance data.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BoxInstance {
    /// World-space center; `w` is 1.0 when highlighted.
    pub center: [f32; 4],
    /// Half extents; `w` unused.
    pub half_extents: [f32; 4],
    /// Linear RGBA.
    pub color: [f32; 4],
}

impl BoxInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        2 => Float32x4, 3 => Float32x4, 4 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Instance for a part; highlighted parts take `highlight` as their
    /// color and keep their own alpha.
    #[must_use]
    pub fn from_part(part: &PickablePart, highlight: [f32; 3]) -> Self {
        let bounds = part.bounds();
        let half = bounds.size() * 0.5;
        let base = part.base_color();
        let (rgb, emissive) = if part.is_highlighted() {
            (Vec3::from(highlight), 1.0)
        } else {
            (base.truncate(), 0.0)
        };
        let center = bounds.center();
        Self {
            center: [center.x, center.y, center.z, emissive],
            half_extents: [half.x, half.y, half.z, 0.0],
            color: [rgb.x, rgb.y, rgb.z, base.w],
        }
    }
}

/// Unit cube as 24 vertices (four per face, so normals stay flat) and 36
/// indices.
#[must_use]
pub fn cube_mesh() -> (Vec<CubeVertex>, Vec<u16>) {
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in FACES {
        let (n, u, v) = (Vec3::from(normal), Vec3::from(u), Vec3::from(v));
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            vertices.push(CubeVertex {
                position: (n + u * su + v * sv).to_array(),
                normal,
            });
        }
        indices.extend_from_slice(&[
            base,
            base + 1,
            base + 2,
            base,
            base + 2,
            base + 3,
        ]);
    }
    (vertices, indices)
}

/// Draws every part as a shaded box.
pub struct BoxPass {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    instances: GrowableBuffer<BoxInstance>,
}

impl BoxPass {
    /// Build the pipeline and upload the cube mesh.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader =
            device.create_shader_module(wgpu::include_wgsl!("shaders/box.wgsl"));
        let layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Box Pipeline Layout"),
                bind_group_layouts: &[camera_layout],
                push_constant_ranges: &[],
            });
        let pipeline = pipeline_util::create_pipeline(
            device,
            format,
            &layout,
            &PipelineSpec {
                label: "Box Pipeline",
                shader: &shader,
                vs_entry: "vs_main",
                buffers: &[CubeVertex::layout(), BoxInstance::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth: pipeline_util::depth_stencil_state(),
            },
        );

        let (mesh_vertices, mesh_indices) = cube_mesh();
        let vertices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Vertices"),
                contents: bytemuck::cast_slice(&mesh_vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let indices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Indices"),
                contents: bytemuck::cast_slice(&mesh_indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            pipeline,
            vertices,
            indices,
            index_count: mesh_indices.len() as u32,
            instances: GrowableBuffer::new(
                device,
                "Box Instances",
                256,
                wgpu::BufferUsages::VERTEX,
            ),
        }
    }

    /// Rebuild the instance list from the registry.
    pub fn prepare<'a>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        parts: impl Iterator<Item = &'a PickablePart>,
        highlight: [f32; 3],
    ) {
        let instances: Vec<BoxInstance> = parts
            .map(|part| BoxInstance::from_part(part, highlight))
            .collect();
        let _ = self.instances.write(device, queue, &instances);
    }

    /// Record the draw.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.instances.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.set_vertex_buffer(1, self.instances.used_slice());
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..self.instances.count());
    }
}
