//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, growable instance buffers
//! and the depth attachment.

/// Typed buffers that grow with their contents.
pub mod dynamic_buffer;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment.
pub mod texture;
