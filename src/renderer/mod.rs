//! wgpu renderer for an [`AssemblyView`](crate::AssemblyView) frame.
//!
//! Draws, in one pass: the ground grid, every part as an instanced box
//! (highlighted parts in the selection highlight color) and the drag
//! rectangle overlay on top.

/// Instanced box geometry.
pub mod box_pass;
/// Grid and selection overlay.
pub mod line_pass;
/// Shared pipeline boilerplate.
pub mod pipeline_util;

use wgpu::util::DeviceExt;

use self::box_pass::BoxPass;
use self::line_pass::LinePass;
use crate::camera::CameraUniform;
use crate::error::PartPickError;
use crate::gpu::render_context::RenderContext;
use crate::host::{FrameSink, FrameView};

/// Owns the GPU context and the passes. Implements [`FrameSink`] so a
/// [`FrameDriver`](crate::host::FrameDriver) can drive it.
pub struct Renderer {
    context: RenderContext,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    boxes: BoxPass,
    lines: LinePass,
}

impl Renderer {
    /// Create the GPU context for `window` and build every pass.
    ///
    /// # Errors
    ///
    /// Returns [`PartPickError::Gpu`] if the device or surface can't be set
    /// up.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, PartPickError> {
        let context = RenderContext::new(window, size).await?;
        let device = &context.device;

        let camera_uniform = CameraUniform::new();
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform"),
                contents: bytemuck::bytes_of(&camera_uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let camera_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Layout"),
                entries: &[pipeline_util::uniform_entry(0)],
            });
        let camera_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                }],
            });

        let boxes = BoxPass::new(device, context.format(), &camera_layout);
        let lines = LinePass::new(device, context.format(), &camera_layout);

        Ok(Self {
            context,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            boxes,
            lines,
        })
    }

    /// Resize the surface and depth buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
    }

    /// The GPU context.
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    fn prepare(&mut self, frame: &FrameView<'_>) {
        let ctx = &self.context;
        if frame.scene_dirty {
            self.boxes.prepare(
                &ctx.device,
                &ctx.queue,
                frame.scene.parts(),
                frame.options.selection.highlight_color,
            );
        }
        self.lines
            .prepare_grid(&ctx.device, &ctx.queue, &frame.options.display);
        self.lines.prepare_overlay(
            &ctx.device,
            &ctx.queue,
            frame.overlay,
            frame.viewport,
            frame.options.selection.overlay_color,
        );
        self.camera_uniform.update_view_proj(frame.camera);
        ctx.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera_uniform),
        );
    }
}

impl FrameSink for Renderer {
    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), PartPickError> {
        self.prepare(frame);

        let output = match self.context.get_next_frame() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost; reconfiguring");
                self.context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout; skipping frame");
                return Ok(());
            }
            Err(e) => {
                return Err(PartPickError::Viewer(format!("surface error: {e}")))
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let [r, g, b] = frame.options.display.background_color;
        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        depth_slice: None,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color {
                                r: f64::from(r),
                                g: f64::from(g),
                                b: f64::from(b),
                                a: 1.0,
                            }),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.context.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            self.lines.draw_grid(&mut pass);
            self.boxes.draw(&mut pass);
            self.lines.draw_overlay(&mut pass);
        }
        self.context.submit(encoder);
        output.present();
        Ok(())
    }
}
