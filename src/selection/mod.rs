//! Part selection: the toggle set, click (ray) and Shift+drag (area)
//! picking, and the state machine that gates the camera while selecting.

mod drag;
mod engine;
mod overlay;
pub mod pick;
mod set;

pub use drag::{DragRect, PixelRect};
pub use engine::{
    ModifierState, SelectionContext, SelectionEngine, SelectionState,
};
pub use overlay::{OverlayState, SelectionOverlay};
pub use set::{SelectionSet, ToggleOutcome};
