use serde::{Deserialize, Serialize};

/// View-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// recenter_camera = "KeyQ"
/// cancel = "Escape"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Fit the camera to the whole assembly.
    RecenterCamera,
    /// Abort an in-flight drag-select, or clear the selection.
    Cancel,
}
