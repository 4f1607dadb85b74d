use crate::part::PickablePart;
use crate::util::Aabb;

/// Identifier of a non-part scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HelperId(pub u32);

/// A non-part scene object: reference geometry such as a ground slab.
///
/// Helpers share the registry (and its ordering) with parts. A pickable
/// helper can stop a pick ray, but it is never a selection candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Helper {
    /// Registry-assigned id.
    pub id: HelperId,
    /// Display/debug name.
    pub name: String,
    /// World-space extent.
    pub bounds: Aabb,
    /// Whether ray queries test this object.
    pub pickable: bool,
}

/// One entry of the scene registry.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    /// An assembly part.
    Part(PickablePart),
    /// Anything else.
    Helper(Helper),
}

impl SceneObject {
    /// The part, if this object is one.
    #[must_use]
    pub fn as_part(&self) -> Option<&PickablePart> {
        match self {
            Self::Part(part) => Some(part),
            Self::Helper(_) => None,
        }
    }

    pub(crate) fn as_part_mut(&mut self) -> Option<&mut PickablePart> {
        match self {
            Self::Part(part) => Some(part),
            Self::Helper(_) => None,
        }
    }

    /// World-space bounds.
    #[must_use]
    pub fn bounds(&self) -> &Aabb {
        match self {
            Self::Part(part) => part.bounds(),
            Self::Helper(helper) => &helper.bounds,
        }
    }

    /// Whether ray queries consider this object.
    #[must_use]
    pub fn is_pickable(&self) -> bool {
        match self {
            Self::Part(_) => true,
            Self::Helper(helper) => helper.pickable,
        }
    }
}
