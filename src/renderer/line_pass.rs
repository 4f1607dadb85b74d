//! Ground grid and the drag-selection overlay.

use bytemuck::{Pod, Zeroable};

use super::pipeline_util::{self, PipelineSpec};
use crate::camera::Viewport;
use crate::gpu::dynamic_buffer::GrowableBuffer;
use crate::options::DisplayOptions;
use crate::selection::PixelRect;

/// Colored vertex; world space for the grid, NDC for the overlay.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    /// Position.
    pub position: [f32; 3],
    /// Linear RGBA.
    pub color: [f32; 4],
}

impl LineVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// Grid lines on the y = 0 plane, centered on the origin.
#[must_use]
pub fn grid_lines(display: &DisplayOptions) -> Vec<LineVertex> {
    if !display.show_grid || display.grid_divisions == 0 {
        return Vec::new();
    }
    let [r, g, b] = display.grid_color;
    let color = [r, g, b, 1.0];
    let half = display.grid_size * 0.5;
    let step = display.grid_size / display.grid_divisions as f32;

    let mut lines = Vec::with_capacity((display.grid_divisions as usize + 1) * 4);
    for i in 0..=display.grid_divisions {
        let t = -half + step * i as f32;
        lines.push(LineVertex::new([t, 0.0, -half], color));
        lines.push(LineVertex::new([t, 0.0, half], color));
        lines.push(LineVertex::new([-half, 0.0, t], color));
        lines.push(LineVertex::new([half, 0.0, t], color));
    }
    lines
}

/// Overlay geometry in NDC: a translucent fill (two triangles) and an
/// opaque outline (four segments).
#[must_use]
pub fn overlay_geometry(
    rect: PixelRect,
    viewport: Viewport,
    color: [f32; 4],
) -> (Vec<LineVertex>, Vec<LineVertex>) {
    let top_left = viewport.pixel_to_ndc(rect.left, rect.top);
    let bottom_right =
        viewport.pixel_to_ndc(rect.left + rect.width, rect.top + rect.height);
    let corners = [
        [top_left.x, top_left.y, 0.0],
        [bottom_right.x, top_left.y, 0.0],
        [bottom_right.x, bottom_right.y, 0.0],
        [top_left.x, bottom_right.y, 0.0],
    ];

    let fill_color = [color[0], color[1], color[2], color[3] * 0.25];
    let fill = [0, 1, 2, 0, 2, 3]
        .into_iter()
        .map(|i| LineVertex::new(corners[i], fill_color))
        .collect();
    let outline = [0, 1, 1, 2, 2, 3, 3, 0]
        .into_iter()
        .map(|i| LineVertex::new(corners[i], color))
        .collect();
    (fill, outline)
}

/// Draws the grid (depth tested) and the overlay (on top of everything).
pub struct LinePass {
    grid_pipeline: wgpu::RenderPipeline,
    fill_pipeline: wgpu::RenderPipeline,
    outline_pipeline: wgpu::RenderPipeline,
    grid: GrowableBuffer<LineVertex>,
    grid_key: Option<DisplayOptions>,
    fill: GrowableBuffer<LineVertex>,
    outline: GrowableBuffer<LineVertex>,
}

impl LinePass {
    /// Build the three pipelines.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader =
            device.create_shader_module(wgpu::include_wgsl!("shaders/line.wgsl"));
        let layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Line Pipeline Layout"),
                bind_group_layouts: &[camera_layout],
                push_constant_ranges: &[],
            });
        let buffers = [LineVertex::layout()];
        let pipeline = |label: &str,
                        vs_entry: &str,
                        topology: wgpu::PrimitiveTopology,
                        depth: wgpu::DepthStencilState| {
            pipeline_util::create_pipeline(
                device,
                format,
                &layout,
                &PipelineSpec {
                    label,
                    shader: &shader,
                    vs_entry,
                    buffers: &buffers,
                    topology,
                    depth,
                },
            )
        };

        let vertex_buffer = |label: &'static str| {
            GrowableBuffer::new(device, label, 64, wgpu::BufferUsages::VERTEX)
        };

        Self {
            grid_pipeline: pipeline(
                "Grid Pipeline",
                "vs_world",
                wgpu::PrimitiveTopology::LineList,
                pipeline_util::depth_stencil_state(),
            ),
            fill_pipeline: pipeline(
                "Overlay Fill Pipeline",
                "vs_screen",
                wgpu::PrimitiveTopology::TriangleList,
                pipeline_util::overlay_depth_state(),
            ),
            outline_pipeline: pipeline(
                "Overlay Outline Pipeline",
                "vs_screen",
                wgpu::PrimitiveTopology::LineList,
                pipeline_util::overlay_depth_state(),
            ),
            grid: vertex_buffer("Grid Vertices"),
            grid_key: None,
            fill: vertex_buffer("Overlay Fill Vertices"),
            outline: vertex_buffer("Overlay Outline Vertices"),
        }
    }

    /// Rebuild the grid if the display options changed since last time.
    pub fn prepare_grid(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        display: &DisplayOptions,
    ) {
        if self.grid_key.as_ref() == Some(display) {
            return;
        }
        let _ = self.grid.write(device, queue, &grid_lines(display));
        self.grid_key = Some(display.clone());
    }

    /// Upload the overlay, or clear it when `rect` is `None`.
    pub fn prepare_overlay(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rect: Option<PixelRect>,
        viewport: Viewport,
        color: [f32; 4],
    ) {
        let (fill, outline) = rect
            .map(|rect| overlay_geometry(rect, viewport, color))
            .unwrap_or_default();
        let _ = self.fill.write(device, queue, &fill);
        let _ = self.outline.write(device, queue, &outline);
    }

    /// Record the grid draw.
    pub fn draw_grid(&self, pass: &mut wgpu::RenderPass<'_>) {
        draw(pass, &self.grid_pipeline, &self.grid);
    }

    /// Record the overlay draws.
    pub fn draw_overlay(&self, pass: &mut wgpu::RenderPass<'_>) {
        draw(pass, &self.fill_pipeline, &self.fill);
        draw(pass, &self.outline_pipeline, &self.outline);
    }
}

fn draw(
    pass: &mut wgpu::RenderPass<'_>,
    pipeline: &wgpu::RenderPipeline,
    vertices: &GrowableBuffer<LineVertex>,
) {
    if vertices.is_empty() {
        return;
    }
    pass.set_pipeline(pipeline);
    pass.set_vertex_buffer(0, vertices.used_slice());
    pass.draw(0..vertices.count(), 0..1);
}
