use std::fmt;

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::PartPickError;

/// Stable, positive part identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct PartId(pub u32);

impl PartId {
    /// Raw integer value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Shape tag of a part's geometry. Only boxes exist.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    /// Axis-aligned rectangular box.
    #[default]
    Box,
}

/// Box extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    /// Shape tag (`"box"`).
    #[serde(rename = "type", default)]
    pub kind: GeometryKind,
    /// Extent along X.
    pub width: f32,
    /// Extent along Y.
    pub height: f32,
    /// Extent along Z.
    pub depth: f32,
}

impl BoxGeometry {
    /// Box with the given extents.
    #[must_use]
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            kind: GeometryKind::Box,
            width,
            height,
            depth,
        }
    }

    /// Extents as a vector (width, height, depth).
    #[must_use]
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }
}

/// Box center in assembly space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Position {
    /// Position from components.
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// As a glam vector.
    #[must_use]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl From<Vec3> for Position {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Base color: 8-bit style RGB channels plus a unit opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartColor {
    /// Red, 0-255.
    pub r: f32,
    /// Green, 0-255.
    pub g: f32,
    /// Blue, 0-255.
    pub b: f32,
    /// Opacity, 0-1.
    pub a: f32,
}

impl PartColor {
    /// Color from channels.
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Normalized RGBA with every channel in 0-1.
    #[must_use]
    pub fn to_linear_rgba(self) -> Vec4 {
        Vec4::new(self.r / 255.0, self.g / 255.0, self.b / 255.0, self.a)
    }
}

impl Default for PartColor {
    fn default() -> Self {
        Self::new(200.0, 200.0, 200.0, 1.0)
    }
}

/// Immutable description of one assembly part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRecord {
    /// Unique positive id, stable for the session.
    pub id: PartId,
    /// Display name.
    pub name: String,
    /// Box extents.
    pub geometry: BoxGeometry,
    /// Box center.
    pub position: Position,
    /// Base color and opacity.
    pub color: PartColor,
}

impl PartRecord {
    /// Opaque light-grey box; adjust fields as needed.
    #[must_use]
    pub fn new(
        id: u32,
        name: impl Into<String>,
        geometry: BoxGeometry,
        position: Position,
    ) -> Self {
        Self {
            id: PartId(id),
            name: name.into(),
            geometry,
            position,
            color: PartColor::default(),
        }
    }

    /// Check the record's invariants: positive id, finite positive extents,
    /// finite position, RGB in 0-255 and opacity in 0-1.
    pub fn validate(&self) -> Result<(), PartPickError> {
        let invalid = |reason: &str| PartPickError::InvalidPart {
            id: self.id.0,
            reason: reason.to_owned(),
        };

        if self.id.0 == 0 {
            return Err(invalid("id must be positive"));
        }

        let size = self.geometry.size();
        if !size.is_finite() || size.min_element() <= 0.0 {
            return Err(invalid("box extents must be finite and > 0"));
        }

        if !self.position.to_vec3().is_finite() {
            return Err(invalid("position must be finite"));
        }

        let PartColor { r, g, b, a } = self.color;
        if [r, g, b].iter().any(|c| !(0.0..=255.0).contains(c)) {
            return Err(invalid("color channels must be within 0-255"));
        }
        if !(0.0..=1.0).contains(&a) {
            return Err(invalid("opacity must be within 0-1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PartRecord {
        PartRecord::new(
            7,
            "bracket",
            BoxGeometry::new(1.0, 2.0, 3.0),
            Position::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn valid_record_passes() {
        assert!(record().validate().is_ok());
    }

    #[test]
    fn zero_id_is_rejected() {
        let mut r = record();
        r.id = PartId(0);
        assert!(matches!(
            r.validate(),
            Err(PartPickError::InvalidPart { id: 0, .. })
        ));
    }

    #[test]
    fn non_positive_extent_is_rejected() {
        let mut r = record();
        r.geometry.depth = 0.0;
        assert!(r.validate().is_err());
        r.geometry.depth = f32::NAN;
        assert!(r.validate().is_err());
    }

    #[test]
    fn out_of_range_color_is_rejected() {
        let mut r = record();
        r.color = PartColor::new(256.0, 0.0, 0.0, 1.0);
        assert!(r.validate().is_err());
        r.color = PartColor::new(0.0, 0.0, 0.0, 1.5);
        assert!(r.validate().is_err());
    }

    #[test]
    fn color_normalizes_to_unit_range() {
        let c = PartColor::new(255.0, 0.0, 51.0, 0.5).to_linear_rgba();
        assert!((c.x - 1.0).abs() < 1e-6);
        assert!((c.z - 0.2).abs() < 1e-6);
        assert!((c.w - 0.5).abs() < 1e-6);
    }
}
