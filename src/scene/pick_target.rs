//! Typed ray-query results.

use super::object::HelperId;
use crate::part::PartId;

/// What a pick ray hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    /// No target (background).
    None,
    /// An assembly part.
    Part(PartId),
    /// A non-part scene object.
    Helper(HelperId),
}

impl PickTarget {
    /// The part id, if the target is a part. Everything else is a non-match.
    #[must_use]
    pub fn as_part(&self) -> Option<PartId> {
        match *self {
            Self::Part(id) => Some(id),
            _ => None,
        }
    }

    /// Returns `true` if this target is `None`.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A single ray hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Distance from the ray origin.
    pub distance: f32,
    /// What was hit.
    pub target: PickTarget,
}
