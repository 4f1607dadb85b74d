//! Input methods for AssemblyView

use glam::Vec2;

use super::AssemblyView;
use crate::camera::Viewport;
use crate::input::mouse::ClickResult;
use crate::input::{InputEvent, Key, KeyAction, MouseButton};

// ── Unified input handler ──

impl AssemblyView {
    /// Process a platform-agnostic input event.
    ///
    /// This is the single input entry point. Pointer and wheel events go to
    /// the camera (which ignores them while disabled) and to the selection
    /// engine; Shift drives the selection state machine; other keys are
    /// looked up in the key bindings.
    ///
    /// `viewport` is the live viewport size; a change is applied to the
    /// camera aspect before the event is handled.
    ///
    /// Returns `true` if the selection changed.
    ///
    /// # Example
    ///
    /// ```
    /// use partpick::camera::Viewport;
    /// use partpick::{AssemblyView, InputEvent, Key};
    ///
    /// let mut view = AssemblyView::default();
    /// let viewport = Viewport::new(800, 600);
    /// let _ = view.handle_input(&InputEvent::KeyDown { key: Key::Shift }, viewport);
    /// assert!(!view.controls().is_enabled());
    /// ```
    pub fn handle_input(
        &mut self,
        event: &InputEvent,
        viewport: Viewport,
    ) -> bool {
        if viewport != self.viewport {
            self.resize(viewport.width, viewport.height);
        }
        match event {
            InputEvent::KeyDown { key: Key::Shift } => {
                self.with_selection(viewport, |sel, ctx| {
                    sel.on_shift_down(ctx);
                });
                false
            }
            InputEvent::KeyUp { key: Key::Shift } => {
                self.with_selection(viewport, |sel, ctx| sel.on_shift_up(ctx));
                false
            }
            InputEvent::KeyDown {
                key: Key::Code(code),
            } => self
                .options
                .keybindings
                .lookup(code)
                .is_some_and(|action| self.execute(action, viewport)),
            InputEvent::KeyUp { .. } => false,
            InputEvent::PointerDown { button, x, y } => {
                self.dispatch_pointer_down(event, *button, *x, *y, viewport);
                false
            }
            InputEvent::PointerMoved { x, y } => {
                let _ = self.camera_input.handle_event(&mut self.controls, event);
                self.clicks.motion(Vec2::new(*x, *y));
                self.with_selection(viewport, |sel, ctx| {
                    sel.on_pointer_move(ctx, *x, *y);
                });
                false
            }
            InputEvent::PointerUp { button, x, y } => {
                self.dispatch_pointer_up(event, *button, *x, *y, viewport)
            }
            InputEvent::Scroll { .. } => {
                let _ = self.camera_input.handle_event(&mut self.controls, event);
                false
            }
        }
    }

    /// Pointer down: start camera gesture, click tracking and (with Shift)
    /// a drag-select. A press that starts a drag-select never clicks.
    fn dispatch_pointer_down(
        &mut self,
        event: &InputEvent,
        button: MouseButton,
        x: f32,
        y: f32,
        viewport: Viewport,
    ) {
        let _ = self.camera_input.handle_event(&mut self.controls, event);
        let primary = button.is_primary();
        if primary {
            self.clicks.press(Vec2::new(x, y));
        }
        let started = self.with_selection(viewport, |sel, ctx| {
            sel.on_pointer_down(ctx, primary, x, y)
        });
        if started {
            self.clicks.suppress();
        }
    }

    /// Pointer up: commit a drag-select, or ray-pick if the press was a
    /// click.
    fn dispatch_pointer_up(
        &mut self,
        event: &InputEvent,
        button: MouseButton,
        x: f32,
        y: f32,
        viewport: Viewport,
    ) -> bool {
        let _ = self.camera_input.handle_event(&mut self.controls, event);
        let primary = button.is_primary();
        let toggled = self.with_selection(viewport, |sel, ctx| {
            sel.on_pointer_up(ctx, primary, x, y)
        });
        let mut changed = !toggled.is_empty();

        if primary {
            if let ClickResult::Click { position } =
                self.clicks.release(Vec2::new(x, y))
            {
                changed |= self
                    .with_selection(viewport, |sel, ctx| {
                        sel.ray_pick(ctx, position.x, position.y)
                    })
                    .is_some();
            }
        }
        changed
    }

    /// Execute a bound key action. Returns `true` if the selection changed.
    pub fn execute(&mut self, action: KeyAction, viewport: Viewport) -> bool {
        log::debug!("key action: {action:?}");
        match action {
            KeyAction::RecenterCamera => {
                let _ = self.fit_camera(true);
                false
            }
            KeyAction::Cancel => {
                let cancelled = self
                    .with_selection(viewport, |sel, ctx| sel.cancel_drag(ctx));
                if cancelled {
                    self.clicks.reset();
                    false
                } else {
                    self.clear_selection() > 0
                }
            }
        }
    }
}
