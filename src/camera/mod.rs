//! Camera system for viewing the assembly.
//!
//! Provides a damped orbital camera with an enable switch, pointer-driven
//! input handling, and the projection/unprojection helpers picking relies on.

/// Orbital camera controller with gating and damping.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Pointer-event-based camera input handler.
pub mod input;
/// Viewport size and pixel/NDC conversion.
pub mod viewport;

pub use controller::CameraController;
pub use self::core::{Camera, CameraUniform};
pub use input::CameraInput;
pub use viewport::Viewport;
