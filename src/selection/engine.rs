use glam::Vec2;

use super::drag::{DragRect, PixelRect};
use super::overlay::SelectionOverlay;
use super::pick;
use super::set::{SelectionSet, ToggleOutcome};
use crate::camera::{CameraController, Viewport};
use crate::part::{PartId, PickablePart};
use crate::scene::Scene;

/// Where the Shift/drag state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// No Shift, no drag. Camera enabled.
    Idle,
    /// Shift held, no drag yet. Camera disabled.
    ShiftArmed,
    /// Drag rectangle active. Camera disabled.
    Dragging,
}

/// Modifier flags. Reset on teardown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    /// Shift is held.
    pub shift_pressed: bool,
    /// A drag-select gesture is in flight.
    pub is_selecting: bool,
}

/// Collaborators a handler may touch. Built fresh for each event so the
/// viewport is always the live one.
pub struct SelectionContext<'a> {
    /// Part registry (geometry source and highlight sink).
    pub scene: &'a mut Scene,
    /// Camera controller (projection source and gating target).
    pub controls: &'a mut CameraController,
    /// Selection rectangle overlay.
    pub overlay: &'a mut dyn SelectionOverlay,
    /// Live viewport size.
    pub viewport: Viewport,
}

/// The selection engine: owns the selection set, modifier flags and the
/// transient drag rectangle, and implements click (ray) and Shift+drag
/// (area) toggling.
///
/// Handlers never fail. Misses, point-sized rectangles and non-part hits
/// are empty results.
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    selection: SelectionSet,
    modifiers: ModifierState,
    drag: Option<DragRect>,
}

impl SelectionEngine {
    /// Engine with an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SelectionState {
        if self.drag.is_some() {
            SelectionState::Dragging
        } else if self.modifiers.shift_pressed {
            SelectionState::ShiftArmed
        } else {
            SelectionState::Idle
        }
    }

    /// The selected parts.
    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Modifier flags.
    #[must_use]
    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    /// The in-flight drag rectangle (NDC).
    #[must_use]
    pub fn drag(&self) -> Option<&DragRect> {
        self.drag.as_ref()
    }

    // -- Shift --

    /// Shift went down: arm area selection and freeze the camera.
    pub fn on_shift_down(&mut self, ctx: &mut SelectionContext<'_>) {
        if !self.modifiers.shift_pressed {
            log::debug!("shift down: {:?} -> armed", self.state());
        }
        self.modifiers.shift_pressed = true;
        ctx.controls.disable();
    }

    /// Shift went up. The camera comes back unless a drag is in flight,
    /// in which case the drag commit re-enables it.
    pub fn on_shift_up(&mut self, ctx: &mut SelectionContext<'_>) {
        self.modifiers.shift_pressed = false;
        if self.drag.is_none() {
            ctx.controls.enable();
        }
    }

    // -- Pointer --

    /// Pointer down at a pixel position. With Shift held and no drag in
    /// flight, a primary press starts a drag rectangle. Returns `true` if
    /// it did.
    pub fn on_pointer_down(
        &mut self,
        ctx: &mut SelectionContext<'_>,
        primary: bool,
        x: f32,
        y: f32,
    ) -> bool {
        if !primary || !self.modifiers.shift_pressed || self.drag.is_some() {
            return false;
        }
        self.drag = Some(DragRect::new(ctx.viewport.pixel_to_ndc(x, y)));
        self.modifiers.is_selecting = true;
        ctx.controls.disable();
        ctx.overlay.show(PixelRect::at(x, y));
        log::debug!("drag-select started at ({x}, {y})");
        true
    }

    /// Pointer moved. Stretches the drag rectangle and its overlay.
    pub fn on_pointer_move(
        &mut self,
        ctx: &mut SelectionContext<'_>,
        x: f32,
        y: f32,
    ) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.end = ctx.viewport.pixel_to_ndc(x, y);
        ctx.overlay.resize(drag.pixel_rect(ctx.viewport));
    }

    /// Pointer up. A primary release during a drag commits the area pick
    /// with the final rectangle and returns the ids it toggled.
    pub fn on_pointer_up(
        &mut self,
        ctx: &mut SelectionContext<'_>,
        primary: bool,
        x: f32,
        y: f32,
    ) -> Vec<PartId> {
        if !primary {
            return Vec::new();
        }
        let Some(mut drag) = self.drag.take() else {
            return Vec::new();
        };
        drag.end = ctx.viewport.pixel_to_ndc(x, y);

        let matched = pick::area_pick(ctx.scene, ctx.controls.camera(), &drag);
        let toggled: Vec<PartId> = matched
            .into_iter()
            .filter(|&id| self.selection.toggle(ctx.scene, id).is_some())
            .collect();
        log::debug!(
            "drag-select committed: {} parts toggled, {} selected",
            toggled.len(),
            self.selection.len()
        );

        self.end_drag(ctx);
        toggled
    }

    /// Ray-pick at a pixel position and toggle the nearest part. Skipped
    /// while Shift is held.
    pub fn ray_pick(
        &mut self,
        ctx: &mut SelectionContext<'_>,
        x: f32,
        y: f32,
    ) -> Option<(PartId, ToggleOutcome)> {
        if self.modifiers.shift_pressed {
            return None;
        }
        let ndc: Vec2 = ctx.viewport.pixel_to_ndc(x, y);
        let id = pick::ray_pick(ctx.scene, ctx.controls.camera(), ndc)?;
        let outcome = self.selection.toggle(ctx.scene, id)?;
        Some((id, outcome))
    }

    // -- Programmatic --

    /// Abandon the in-flight drag without toggling anything. Returns
    /// `true` if there was one.
    pub fn cancel_drag(&mut self, ctx: &mut SelectionContext<'_>) -> bool {
        if self.drag.take().is_none() {
            return false;
        }
        log::debug!("drag-select cancelled");
        self.end_drag(ctx);
        true
    }

    fn end_drag(&mut self, ctx: &mut SelectionContext<'_>) {
        self.modifiers.is_selecting = false;
        ctx.overlay.hide();
        // Shift still held means we are back in ShiftArmed, which keeps
        // the camera frozen.
        if !self.modifiers.shift_pressed {
            ctx.controls.enable();
        }
    }

    /// Deselect everything. Returns how many parts were deselected.
    pub fn clear(&mut self, scene: &mut Scene) -> usize {
        self.selection.clear(scene)
    }

    /// Remove a part from the scene and the selection together.
    pub fn remove_part(
        &mut self,
        scene: &mut Scene,
        id: PartId,
    ) -> Option<PickablePart> {
        let _ = self.selection.forget(id);
        scene.remove_part(id)
    }

    /// Teardown: discard any drag, clear modifiers, hide the overlay and
    /// hand the camera back. The selection itself is kept.
    pub fn reset(&mut self, ctx: &mut SelectionContext<'_>) {
        if self.modifiers.is_selecting {
            log::debug!("teardown with drag-select in flight");
        }
        self.drag = None;
        self.modifiers = ModifierState::default();
        ctx.overlay.hide();
        ctx.controls.enable();
    }
}
