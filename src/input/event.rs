use crate::host::ListenerKind;

/// Platform-agnostic input events.
///
/// Hosts translate their native events into these and push them through an
/// [`EventDispatcher`](crate::host::EventDispatcher) (or straight into
/// [`AssemblyView::handle_input`](crate::AssemblyView::handle_input)).
/// Pointer coordinates are physical pixels relative to the viewport's
/// top-left corner; values outside the viewport are legal.
///
/// # Example
///
/// ```
/// use partpick::{InputEvent, Key, MouseButton};
///
/// let events = [
///     InputEvent::KeyDown { key: Key::Shift },
///     InputEvent::PointerDown { button: MouseButton::Left, x: 10.0, y: 20.0 },
///     InputEvent::PointerMoved { x: 200.0, y: 180.0 },
/// ];
/// assert!(events[0].is_shift());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A pointer button was pressed.
    PointerDown {
        /// Which button.
        button: MouseButton,
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// A pointer button was released.
    PointerUp {
        /// Which button.
        button: MouseButton,
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Pointer moved to an absolute position.
    PointerMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount in lines.
        delta: f32,
    },
    /// A key was pressed.
    KeyDown {
        /// Key identity.
        key: Key,
    },
    /// A key was released.
    KeyUp {
        /// Key identity.
        key: Key,
    },
}

impl InputEvent {
    /// The listener slot this event is delivered to.
    #[must_use]
    pub fn kind(&self) -> ListenerKind {
        match self {
            Self::PointerDown { .. } => ListenerKind::PointerDown,
            Self::PointerUp { .. } => ListenerKind::PointerUp,
            Self::PointerMoved { .. } => ListenerKind::PointerMove,
            Self::Scroll { .. } => ListenerKind::Wheel,
            Self::KeyDown { .. } => ListenerKind::KeyDown,
            Self::KeyUp { .. } => ListenerKind::KeyUp,
        }
    }

    /// Whether this is a Shift key press or release.
    #[must_use]
    pub fn is_shift(&self) -> bool {
        matches!(
            self,
            Self::KeyDown { key: Key::Shift } | Self::KeyUp { key: Key::Shift }
        )
    }
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
    /// Any other button, by index.
    Other(u16),
}

impl MouseButton {
    /// Map a DOM-style button index (0 = primary, 1 = middle,
    /// 2 = secondary).
    #[must_use]
    pub fn from_index(index: u16) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            n => Self::Other(n),
        }
    }

    /// Whether this is the primary button.
    #[must_use]
    pub fn is_primary(self) -> bool {
        self == Self::Left
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            winit::event::MouseButton::Back => Self::Other(3),
            winit::event::MouseButton::Forward => Self::Other(4),
            winit::event::MouseButton::Other(n) => Self::Other(n),
        }
    }
}

/// Key identity. Shift is singled out because selection is driven by it;
/// every other key is carried as its physical key code string
/// (`"KeyQ"`, `"Escape"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Either Shift key.
    Shift,
    /// Any other key, by code.
    Code(String),
}

impl Key {
    /// Convenience constructor for [`Key::Code`].
    pub fn code(code: impl Into<String>) -> Self {
        Self::Code(code.into())
    }
}
