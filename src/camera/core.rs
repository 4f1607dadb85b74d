use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::options::CameraOptions;
use crate::util::Ray;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and camera metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default(), 1.0)
    }
}

impl Camera {
    /// Camera at the configured initial pose.
    #[must_use]
    pub fn from_options(opts: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::from_array(opts.eye),
            target: Vec3::from_array(opts.target),
            up: Vec3::Y,
            aspect,
            fovy: opts.fovy,
            znear: opts.znear,
            zfar: opts.zfar,
        }
    }

    /// View matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vector from eye toward target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Project a world-space point to normalized device coordinates.
    ///
    /// Points behind the eye come out mirrored; use
    /// [`project_visible`](Self::project_visible) when that matters.
    #[must_use]
    pub fn project(&self, point: Vec3) -> Vec3 {
        self.view_projection().project_point3(point)
    }

    /// Project a world-space point, or `None` if it lies at or behind the
    /// eye plane.
    #[must_use]
    pub fn project_visible(&self, point: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        Some(clip.xyz() / clip.w)
    }

    /// World-space ray from the eye through an NDC point.
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let far = inv.project_point3(ndc.extend(1.0));
        Ray::new(self.eye, far - self.eye)
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            forward: [0.0, 0.0, -1.0],
            fovy: 75.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.view_projection().to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.aspect = camera.aspect;
        self.forward = camera.forward().to_array();
        self.fovy = camera.fovy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_down_neg_z() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    #[test]
    fn target_projects_to_center() {
        let cam = looking_down_neg_z();
        let ndc = cam.project(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    }

    #[test]
    fn off_axis_point_projects_by_fov() {
        let cam = looking_down_neg_z();
        let ndc = cam.project(Vec3::new(2.0, 0.0, 0.0));
        let expected = 2.0 / (5.0 * 37.5_f32.to_radians().tan());
        assert!((ndc.x - expected).abs() < 1e-4, "{} vs {expected}", ndc.x);
        assert!(ndc.y.abs() < 1e-5);
    }

    #[test]
    fn points_behind_eye_are_not_visible() {
        let cam = looking_down_neg_z();
        assert!(cam.project_visible(Vec3::new(0.0, 0.0, 10.0)).is_none());
        assert!(cam.project_visible(Vec3::new(0.0, 0.0, 5.0)).is_none());
        assert!(cam.project_visible(Vec3::ZERO).is_some());
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = looking_down_neg_z();
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        assert_eq!(ray.origin, cam.eye);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn ray_and_projection_agree() {
        let cam = looking_down_neg_z();
        let point = Vec3::new(0.7, -0.4, -1.0);
        let ndc = cam.project(point);
        let ray = cam.ray_from_ndc(ndc.truncate());
        let to_point = (point - cam.eye).normalize();
        assert!((ray.direction - to_point).length() < 1e-3);
    }
}
