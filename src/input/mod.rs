//! Input handling: platform-agnostic event types, the click state machine,
//! and bindable key actions.

/// Platform-agnostic input events.
pub mod event;
/// Bindable key actions.
pub mod keyboard;
/// Click-versus-drag state machine.
pub(crate) mod mouse;

pub use event::{InputEvent, Key, MouseButton};
pub use keyboard::KeyAction;
