//! Ray and area queries. Both are pure: they report which parts match and
//! leave toggling to the caller.

use glam::{Vec2, Vec4Swizzles};

use super::drag::DragRect;
use crate::camera::Camera;
use crate::part::PartId;
use crate::scene::{PickTarget, Scene};

/// The part under an NDC point, if the nearest hit is a part.
///
/// A nearer non-part object occludes whatever is behind it, so a helper
/// hit is a non-match rather than a fall-through to the next hit.
#[must_use]
pub fn ray_pick(scene: &Scene, camera: &Camera, ndc: Vec2) -> Option<PartId> {
    let ray = camera.ray_from_ndc(ndc);
    match scene.nearest_hit(&ray)?.target {
        PickTarget::Part(id) => Some(id),
        PickTarget::Helper(_) | PickTarget::None => None,
    }
}

/// Parts whose projected position lies inside `rect`, in registration
/// order. Parts at or behind the eye plane never match, and a rectangle
/// whose corners coincide matches nothing.
#[must_use]
pub fn area_pick(scene: &Scene, camera: &Camera, rect: &DragRect) -> Vec<PartId> {
    if rect.is_degenerate() {
        return Vec::new();
    }
    let view_proj = camera.view_projection();
    scene
        .parts()
        .filter(|part| {
            let clip = view_proj * part.position().extend(1.0);
            clip.w > f32::EPSILON && rect.contains(clip.xy() / clip.w)
        })
        .map(|part| part.id())
        .collect()
}
