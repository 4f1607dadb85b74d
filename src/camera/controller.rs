use glam::{Mat3, Quat, Vec2, Vec3};

use crate::camera::core::Camera;
use crate::options::CameraOptions;
use crate::util::Aabb;

/// Pixels-to-radians factor applied on top of `rotate_speed`.
const ROTATE_SCALE: f32 = 0.01;
/// Pixels-to-world factor (per unit of orbit distance) applied on top of
/// `pan_speed`.
const PAN_SCALE: f32 = 0.002;
/// Padding applied when fitting the camera to a bounding sphere.
const FIT_PADDING: f32 = 1.5;

/// Orbit pose: the eye sits `distance` away from `focus` along the local
/// +Z axis of `orientation`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OrbitPose {
    orientation: Quat,
    distance: f32,
    focus: Vec3,
}

impl OrbitPose {
    fn look_at(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(f32::EPSILON);
        let z = offset / distance;
        let x = Vec3::Y.cross(z).try_normalize().unwrap_or(Vec3::X);
        let y = z.cross(x);
        Self {
            orientation: Quat::from_mat3(&Mat3::from_cols(x, y, z))
                .normalize(),
            distance,
            focus: target,
        }
    }

    fn eye(&self) -> Vec3 {
        self.focus + self.orientation * Vec3::Z * self.distance
    }

    fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    fn blend(&self, goal: &Self, t: f32) -> Self {
        Self {
            orientation: self.orientation.slerp(goal.orientation, t),
            distance: self.distance + (goal.distance - self.distance) * t,
            focus: self.focus.lerp(goal.focus, t),
        }
    }

    fn approx_eq(&self, other: &Self) -> bool {
        self.orientation.dot(other.orientation).abs() > 1.0 - 1e-6
            && (self.distance - other.distance).abs() < 1e-4
            && self.focus.abs_diff_eq(other.focus, 1e-4)
    }
}

/// Orbital camera controller with an enable switch.
///
/// User-driven motion (`rotate`, `pan`, `zoom`) edits a goal pose and is
/// dropped while the controller is disabled; `update` eases the live pose
/// toward the goal and does nothing while disabled. Programmatic moves
/// (`fit_to_bounds`, `set_pose`, `resize`) are never gated.
#[derive(Debug, Clone)]
pub struct CameraController {
    live: OrbitPose,
    goal: OrbitPose,
    camera: Camera,
    enabled: bool,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    damping: f32,
    min_distance: f32,
    max_distance: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(&CameraOptions::default(), 1.0)
    }
}

impl CameraController {
    /// Controller at the configured initial pose.
    #[must_use]
    pub fn new(opts: &CameraOptions, aspect: f32) -> Self {
        let camera = Camera::from_options(opts, aspect);
        let pose = OrbitPose::look_at(camera.eye, camera.target);
        let mut controller = Self {
            live: pose,
            goal: pose,
            camera,
            enabled: true,
            rotate_speed: opts.rotate_speed,
            pan_speed: opts.pan_speed,
            zoom_speed: opts.zoom_speed,
            damping: opts.damping.max(0.0),
            min_distance: opts.min_distance,
            max_distance: opts.max_distance.max(opts.min_distance),
        };
        controller.sync_camera();
        controller
    }

    /// Re-read speeds, damping and projection parameters. The pose is kept.
    pub fn apply_options(&mut self, opts: &CameraOptions) {
        self.rotate_speed = opts.rotate_speed;
        self.pan_speed = opts.pan_speed;
        self.zoom_speed = opts.zoom_speed;
        self.damping = opts.damping.max(0.0);
        self.min_distance = opts.min_distance;
        self.max_distance = opts.max_distance.max(opts.min_distance);
        self.camera.fovy = opts.fovy;
        self.camera.znear = opts.znear;
        self.camera.zfar = opts.zfar;
    }

    fn sync_camera(&mut self) {
        self.camera.eye = self.live.eye();
        self.camera.target = self.live.focus;
        self.camera.up = self.live.up();
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    /// The camera at the live pose.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    // -- Gating --

    /// Allow user-driven motion and per-frame easing.
    pub fn enable(&mut self) {
        if !self.enabled {
            log::debug!("camera controls enabled");
        }
        self.enabled = true;
    }

    /// Freeze user-driven motion and per-frame easing.
    pub fn disable(&mut self) {
        if self.enabled {
            log::debug!("camera controls disabled");
        }
        self.enabled = false;
    }

    /// Whether user-driven motion is currently accepted.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the live pose still lags the goal.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.live.approx_eq(&self.goal)
    }

    /// Ease the live pose toward the goal. No-op while disabled. Returns
    /// `true` if the camera moved.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.enabled || self.live == self.goal {
            return false;
        }
        if self.damping <= 0.0 {
            self.live = self.goal;
        } else {
            let alpha = 1.0 - (-self.damping * dt.max(0.0)).exp();
            self.live = self.live.blend(&self.goal, alpha);
            if self.live.approx_eq(&self.goal) {
                self.live = self.goal;
            }
        }
        self.sync_camera();
        true
    }

    // -- User-driven motion (gated) --

    /// Orbit by a pointer delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        if !self.enabled {
            return;
        }
        let speed = self.rotate_speed * ROTATE_SCALE;

        // Horizontal rotation around camera's up vector
        let up = self.goal.orientation * Vec3::Y;
        let horizontal = Quat::from_axis_angle(up, -delta.x * speed);
        self.goal.orientation = horizontal * self.goal.orientation;

        // Vertical rotation around camera's right vector (after horizontal)
        let right = self.goal.orientation * Vec3::X;
        let vertical = Quat::from_axis_angle(right, -delta.y * speed);
        self.goal.orientation = (vertical * self.goal.orientation).normalize();
    }

    /// Translate the focus point by a pointer delta in pixels.
    pub fn pan(&mut self, delta: Vec2) {
        if !self.enabled {
            return;
        }
        let right = self.goal.orientation * Vec3::X;
        let up = self.goal.orientation * Vec3::Y;
        let scale = self.pan_speed * PAN_SCALE * self.goal.distance;
        self.goal.focus += right * (-delta.x * scale) + up * (delta.y * scale);
    }

    /// Dolly toward (positive) or away from (negative) the focus point.
    pub fn zoom(&mut self, delta: f32) {
        if !self.enabled {
            return;
        }
        let factor = (1.0 - delta * self.zoom_speed).max(0.05);
        self.goal.distance = self.clamp_distance(self.goal.distance * factor);
    }

    // -- Programmatic motion (ungated) --

    /// Update the aspect ratio after a resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Place the camera at `eye` looking at `target`, immediately.
    pub fn set_pose(&mut self, eye: Vec3, target: Vec3) {
        self.live = OrbitPose::look_at(eye, target);
        self.goal = self.live;
        self.sync_camera();
    }

    /// Aim at the centre of `bounds` from a distance that keeps its
    /// bounding sphere in view. The orientation is kept. With `animate`
    /// the move is eased by `update`; otherwise it applies immediately.
    pub fn fit_to_bounds(&mut self, bounds: &Aabb, animate: bool) {
        let half_fov = (self.camera.fovy.to_radians() * 0.5).max(1e-3);
        let radius = bounds.bounding_radius().max(self.min_distance);
        self.goal.focus = bounds.center();
        self.goal.distance =
            self.clamp_distance(radius / half_fov.tan() * FIT_PADDING);
        if !animate {
            self.live = self.goal;
            self.sync_camera();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undamped() -> CameraController {
        let opts = CameraOptions {
            damping: 0.0,
            ..CameraOptions::default()
        };
        CameraController::new(&opts, 1.0)
    }

    #[test]
    fn starts_at_configured_pose() {
        let ctrl = CameraController::default();
        let cam = ctrl.camera();
        assert!((cam.eye - Vec3::new(0.0, 2.0, 5.0)).length() < 1e-4);
        assert!(cam.target.length() < 1e-6);
        assert!(ctrl.is_enabled());
    }

    #[test]
    fn disabled_controller_ignores_input_and_update() {
        let mut ctrl = undamped();
        let before = *ctrl.camera();
        ctrl.disable();
        ctrl.rotate(Vec2::new(40.0, 10.0));
        ctrl.pan(Vec2::new(5.0, 5.0));
        ctrl.zoom(2.0);
        assert!(!ctrl.update(0.016));
        assert_eq!(*ctrl.camera(), before);
        assert!(!ctrl.is_animating());
    }

    #[test]
    fn update_freezes_in_flight_motion_while_disabled() {
        let mut ctrl = CameraController::default();
        ctrl.rotate(Vec2::new(100.0, 0.0));
        let _ = ctrl.update(0.016);
        let mid = *ctrl.camera();
        ctrl.disable();
        assert!(!ctrl.update(0.016));
        assert_eq!(*ctrl.camera(), mid);
        ctrl.enable();
        assert!(ctrl.update(0.016));
    }

    #[test]
    fn damping_converges_on_goal() {
        let mut ctrl = CameraController::default();
        ctrl.zoom(1.0);
        assert!(ctrl.is_animating());
        for _ in 0..600 {
            let _ = ctrl.update(0.016);
        }
        assert!(!ctrl.is_animating());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut ctrl = undamped();
        for _ in 0..200 {
            ctrl.zoom(5.0);
        }
        let _ = ctrl.update(0.016);
        let dist = (ctrl.camera().eye - ctrl.camera().target).length();
        assert!((dist - CameraOptions::default().min_distance).abs() < 1e-3);
    }

    #[test]
    fn rotate_keeps_distance() {
        let mut ctrl = undamped();
        ctrl.rotate(Vec2::new(80.0, -30.0));
        let _ = ctrl.update(0.016);
        let dist = (ctrl.camera().eye - ctrl.camera().target).length();
        assert!((dist - Vec3::new(0.0, 2.0, 5.0).length()).abs() < 1e-3);
    }

    #[test]
    fn fit_bypasses_gating() {
        let mut ctrl = undamped();
        ctrl.disable();
        let bounds =
            Aabb::from_center_size(Vec3::new(10.0, 0.0, 0.0), Vec3::ONE);
        ctrl.fit_to_bounds(&bounds, false);
        assert!((ctrl.camera().target - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn set_pose_looks_down_neg_z() {
        let mut ctrl = CameraController::default();
        ctrl.set_pose(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let cam = ctrl.camera();
        assert!((cam.eye - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);
        assert!((cam.forward() - Vec3::NEG_Z).length() < 1e-4);
        assert!((cam.up - Vec3::Y).length() < 1e-4);
    }
}
