//! Scene, camera and lifecycle methods for AssemblyView

use std::path::Path;

use glam::Vec3;

use super::AssemblyView;
use crate::camera::Viewport;
use crate::error::PartPickError;
use crate::part::{self, PartId, PartRecord, PickablePart};
use crate::scene::HelperId;
use crate::util::Aabb;

impl AssemblyView {
    /// Register parts. Already-registered ids and invalid records are
    /// skipped, so repeating a batch is harmless. Returns the ids added.
    pub fn add_parts(
        &mut self,
        records: impl IntoIterator<Item = PartRecord>,
    ) -> Vec<PartId> {
        self.scene.add_parts(records)
    }

    /// Load a part-record JSON file and register its parts.
    ///
    /// # Errors
    ///
    /// Returns [`PartPickError`] if the file can't be read or holds invalid
    /// or duplicate records. Nothing is registered in that case.
    pub fn load_parts_file(
        &mut self,
        path: &Path,
    ) -> Result<Vec<PartId>, PartPickError> {
        let records = part::load_parts(path)?;
        Ok(self.add_parts(records))
    }

    /// Remove a part from the scene and, in the same call, from the
    /// selection.
    pub fn remove_part(&mut self, id: PartId) -> Option<PickablePart> {
        let removed = self.selection.remove_part(&mut self.scene, id);
        if removed.is_some() {
            log::debug!("removed part {id}");
        }
        removed
    }

    /// Deselect everything. Returns how many parts were deselected.
    pub fn clear_selection(&mut self) -> usize {
        let count = self.selection.clear(&mut self.scene);
        if count > 0 {
            log::debug!("cleared selection ({count} parts)");
        }
        count
    }

    /// Register the ground grid as a pickable non-part object, sized from
    /// the display options. It stops rays that miss every part above the
    /// floor but is never selected. While `show_grid` is off nothing is
    /// registered.
    pub fn set_ground_grid(&mut self, enabled: bool) {
        self.ground_grid_enabled = enabled;
        self.sync_ground_grid();
    }

    /// Registry id of the ground grid, if one is registered.
    #[must_use]
    pub fn ground_grid(&self) -> Option<HelperId> {
        self.ground_grid
    }

    pub(super) fn sync_ground_grid(&mut self) {
        if let Some(id) = self.ground_grid.take() {
            let _ = self.scene.remove_helper(id);
        }
        let display = &self.options.display;
        if !self.ground_grid_enabled || !display.show_grid {
            return;
        }
        let bounds = Aabb::from_center_size(
            Vec3::ZERO,
            Vec3::new(display.grid_size, 0.0, display.grid_size),
        );
        self.ground_grid = Some(self.scene.add_helper("ground grid", bounds, true));
    }

    /// Aim the camera at the whole assembly. Returns `false` if there are
    /// no parts.
    pub fn fit_camera(&mut self, animate: bool) -> bool {
        let Some(bounds) = self.scene.part_bounds() else {
            return false;
        };
        self.controls.fit_to_bounds(&bounds, animate);
        true
    }

    /// Per-frame camera easing. A no-op while the camera is disabled.
    /// Returns `true` if the camera moved.
    pub fn update(&mut self, dt: f32) -> bool {
        self.controls.update(dt)
    }

    /// Handle a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.controls.resize(width, height);
    }

    /// Reset transient interaction state: any drag is discarded, Shift is
    /// considered released, the overlay is hidden and the camera is
    /// re-enabled. Parts and the selection are kept.
    pub fn teardown(&mut self) {
        let viewport = self.viewport;
        self.with_selection(viewport, |sel, ctx| sel.reset(ctx));
        self.camera_input.reset();
        self.clicks.reset();
        log::debug!("assembly view torn down");
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::input::{InputEvent, Key, MouseButton};
    use crate::options::Options;
    use crate::part::{BoxGeometry, Position};

    fn record(id: u32, x: f32) -> PartRecord {
        PartRecord::new(
            id,
            format!("part-{id}"),
            BoxGeometry::new(1.0, 1.0, 1.0),
            Position::new(x, 0.0, 0.0),
        )
    }

    #[test]
    fn teardown_mid_drag_resets_interaction_state() {
        let mut view = AssemblyView::with_parts(
            Options::default(),
            [record(1, 0.0)],
        );
        let vp = Viewport::new(640, 480);
        let _ = view.handle_input(&InputEvent::KeyDown { key: Key::Shift }, vp);
        let _ = view.handle_input(
            &InputEvent::PointerDown {
                button: MouseButton::Left,
                x: 10.0,
                y: 10.0,
            },
            vp,
        );
        assert!(view.selection_engine().modifiers().is_selecting);

        view.teardown();
        let engine = view.selection_engine();
        assert!(!engine.modifiers().is_selecting);
        assert!(!engine.modifiers().shift_pressed);
        assert!(engine.drag().is_none());
        assert!(!view.overlay().is_visible());
        assert!(view.controls().is_enabled());
    }

    #[test]
    fn remove_part_keeps_selection_consistent() {
        let mut view = AssemblyView::with_parts(
            Options::default(),
            [record(1, 0.0), record(2, 3.0)],
        );
        view.controls_mut().set_pose(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let vp = Viewport::new(500, 500);
        for event in [
            InputEvent::PointerDown {
                button: MouseButton::Left,
                x: 250.0,
                y: 250.0,
            },
            InputEvent::PointerUp {
                button: MouseButton::Left,
                x: 250.0,
                y: 250.0,
            },
        ] {
            let _ = view.handle_input(&event, vp);
        }
        assert!(view.selection().contains(PartId(1)));

        assert!(view.remove_part(PartId(1)).is_some());
        assert!(!view.selection().contains(PartId(1)));
        assert!(view.remove_part(PartId(1)).is_none());
        assert_eq!(view.scene().part_count(), 1);
    }

    #[test]
    fn fit_camera_needs_parts() {
        let mut view = AssemblyView::default();
        assert!(!view.fit_camera(false));
        let _ = view.add_parts([record(1, 4.0)]);
        assert!(view.fit_camera(false));
        assert!((view.camera().target - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn ground_grid_stops_rays_but_is_never_selected() {
        let mut view = AssemblyView::with_parts(
            Options::default(),
            [record(1, 0.0)],
        );
        view.set_ground_grid(true);
        let grid = view.ground_grid().unwrap();
        view.controls_mut().set_pose(Vec3::new(0.0, 8.0, 6.0), Vec3::ZERO);
        let vp = Viewport::new(500, 500);
        view.resize(vp.width, vp.height);

        // Upper part of the screen: the ray lands on the floor past the part.
        let ray = view.camera().ray_from_ndc(glam::Vec2::new(0.0, 0.8));
        let hit = view.scene().nearest_hit(&ray).unwrap();
        assert_eq!(hit.target, crate::scene::PickTarget::Helper(grid));

        let click = |view: &mut AssemblyView, y: f32| {
            let button = MouseButton::Left;
            let _ = view.handle_input(&InputEvent::PointerDown { button, x: 250.0, y }, vp);
            view.handle_input(&InputEvent::PointerUp { button, x: 250.0, y }, vp)
        };
        assert!(!click(&mut view, 50.0));
        assert!(view.selection().is_empty());

        assert!(click(&mut view, 250.0));
        assert_eq!(view.selection().ids(), vec![PartId(1)]);
    }

    #[test]
    fn ground_grid_follows_display_options() {
        let mut view = AssemblyView::default();
        view.set_ground_grid(true);
        assert!(view.ground_grid().is_some());

        let mut options = view.options().clone();
        options.display.show_grid = false;
        view.set_options(options.clone());
        assert!(view.ground_grid().is_none());
        assert!(view.scene().objects().is_empty());

        options.display.show_grid = true;
        options.display.grid_size = 10.0;
        view.set_options(options);
        let objects = view.scene().objects();
        assert_eq!(objects.len(), 1);
        assert!((objects[0].bounds().max.x - 5.0).abs() < 1e-6);

        view.set_ground_grid(false);
        assert!(view.scene().objects().is_empty());
    }

    #[test]
    fn adding_same_batch_twice_is_idempotent() {
        let mut view = AssemblyView::default();
        assert_eq!(view.add_parts([record(1, 0.0)]), vec![PartId(1)]);
        assert!(view.add_parts([record(1, 0.0)]).is_empty());
        assert_eq!(view.scene().part_count(), 1);
    }

    #[test]
    fn load_parts_file_reports_missing_file() {
        let mut view = AssemblyView::default();
        let err = view
            .load_parts_file(Path::new("/definitely/not/here.json"))
            .unwrap_err();
        assert!(matches!(err, PartPickError::Io(_)));
    }
}
