use glam::{Vec3, Vec4};

use super::record::{PartId, PartRecord};
use crate::util::Aabb;

/// Renderable, pickable instance of one [`PartRecord`].
///
/// Carries the record as its identity metadata, a world-space bounding box
/// for ray and area tests, and the highlight flag the renderer turns into an
/// emissive tint. The flag is only ever written by the selection engine, so
/// it stays equal to "this id is in the selection set".
#[derive(Debug, Clone, PartialEq)]
pub struct PickablePart {
    record: PartRecord,
    bounds: Aabb,
    highlighted: bool,
}

impl PickablePart {
    /// Build the pickable instance for `record`. The box is centered on the
    /// record's position.
    #[must_use]
    pub fn new(record: PartRecord) -> Self {
        let bounds = Aabb::from_center_size(
            record.position.to_vec3(),
            record.geometry.size(),
        );
        Self {
            record,
            bounds,
            highlighted: false,
        }
    }

    /// Part id.
    #[must_use]
    pub fn id(&self) -> PartId {
        self.record.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// The full record this part was built from.
    #[must_use]
    pub fn record(&self) -> &PartRecord {
        &self.record
    }

    /// World-space bounds.
    #[must_use]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// World position (box center); this is the point area picks project.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.record.position.to_vec3()
    }

    /// Base color as normalized RGBA.
    #[must_use]
    pub fn base_color(&self) -> Vec4 {
        self.record.color.to_linear_rgba()
    }

    /// Whether the part is currently drawn highlighted.
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub(crate) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::{BoxGeometry, Position};

    #[test]
    fn bounds_are_centered_on_position() {
        let part = PickablePart::new(PartRecord::new(
            3,
            "slab",
            BoxGeometry::new(2.0, 1.0, 4.0),
            Position::new(1.0, 0.0, -1.0),
        ));
        assert_eq!(part.bounds().min, Vec3::new(0.0, -0.5, -3.0));
        assert_eq!(part.bounds().max, Vec3::new(2.0, 0.5, 1.0));
        assert_eq!(part.position(), Vec3::new(1.0, 0.0, -1.0));
        assert!(!part.is_highlighted());
    }
}
