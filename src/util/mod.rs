//! Shared utilities: bounding boxes, rays, and frame timing.

pub mod bounds;
pub mod frame_timing;

pub use bounds::{Aabb, Ray};
pub use frame_timing::FrameTiming;
