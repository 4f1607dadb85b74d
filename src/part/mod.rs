//! Part data model: serializable records and their pickable scene instances.

mod loader;
mod pickable;
mod record;

pub use loader::{load_parts, parse_parts};
pub use pickable::PickablePart;
pub use record::{
    BoxGeometry, GeometryKind, PartColor, PartId, PartRecord, Position,
};
