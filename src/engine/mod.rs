mod input;
mod scene_management;

use crate::camera::{Camera, CameraController, CameraInput, Viewport};
use crate::host::FrameView;
use crate::input::mouse::ClickTracker;
use crate::options::Options;
use crate::part::{PartId, PartRecord, PickablePart};
use crate::scene::{HelperId, Scene};
use crate::selection::{
    OverlayState, SelectionContext, SelectionEngine, SelectionSet,
};

/// An assembly of box parts plus everything needed to look at it and pick
/// from it.
///
/// Owns the scene registry, the orbit camera (and the pointer handler that
/// drives it), the click tracker, the selection engine and the overlay
/// state. GPU-free: rendering happens elsewhere, from [`frame`](Self::frame).
///
/// # Input
///
/// Every host event goes through [`handle_input`](Self::handle_input)
/// together with the live viewport size. Hosts usually don't call it
/// directly but [`mount`](crate::host::mount) the view on an
/// [`EventDispatcher`](crate::host::EventDispatcher).
///
/// # Frame loop
///
/// Each frame, [`update`](Self::update) eases the camera and
/// [`frame`](Self::frame) produces the read-only snapshot a renderer draws.
/// [`FrameDriver`](crate::host::FrameDriver) does both.
#[derive(Debug)]
pub struct AssemblyView {
    scene: Scene,
    controls: CameraController,
    camera_input: CameraInput,
    clicks: ClickTracker,
    selection: SelectionEngine,
    overlay: OverlayState,
    options: Options,
    /// Last viewport seen by `handle_input` or `resize`.
    viewport: Viewport,
    /// Whether the ground grid should be in the registry.
    ground_grid_enabled: bool,
    ground_grid: Option<HelperId>,
}

impl Default for AssemblyView {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

// =============================================================================
// Core
// =============================================================================

impl AssemblyView {
    /// Empty view configured by `options`.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let viewport = Viewport::new(1, 1);
        Self {
            scene: Scene::new(),
            controls: CameraController::new(&options.camera, viewport.aspect()),
            camera_input: CameraInput::new(),
            clicks: ClickTracker::new(options.selection.click_drag_threshold),
            selection: SelectionEngine::new(),
            overlay: OverlayState::default(),
            options,
            viewport,
            ground_grid_enabled: false,
            ground_grid: None,
        }
    }

    /// View pre-populated with `records`.
    #[must_use]
    pub fn with_parts(
        options: Options,
        records: impl IntoIterator<Item = PartRecord>,
    ) -> Self {
        let mut view = Self::new(options);
        let _ = view.add_parts(records);
        view
    }

    /// Run `f` against the selection engine with a context built from this
    /// view's collaborators.
    fn with_selection<R>(
        &mut self,
        viewport: Viewport,
        f: impl FnOnce(&mut SelectionEngine, &mut SelectionContext<'_>) -> R,
    ) -> R {
        let mut ctx = SelectionContext {
            scene: &mut self.scene,
            controls: &mut self.controls,
            overlay: &mut self.overlay,
            viewport,
        };
        f(&mut self.selection, &mut ctx)
    }

    // -- Accessors --

    /// The scene registry.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Look up a part by id.
    #[must_use]
    pub fn part(&self, id: PartId) -> Option<&PickablePart> {
        self.scene.part(id)
    }

    /// The camera at its live pose.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.controls.camera()
    }

    /// The camera controller.
    #[must_use]
    pub fn controls(&self) -> &CameraController {
        &self.controls
    }

    /// Mutable camera controller, for programmatic camera moves.
    pub fn controls_mut(&mut self) -> &mut CameraController {
        &mut self.controls
    }

    /// The selection engine (state, modifiers, drag rectangle).
    #[must_use]
    pub fn selection_engine(&self) -> &SelectionEngine {
        &self.selection
    }

    /// The selected parts.
    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        self.selection.selection()
    }

    /// Overlay state.
    #[must_use]
    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options. Camera speeds/projection and the click
    /// threshold take effect immediately; the pose is kept.
    pub fn set_options(&mut self, mut options: Options) {
        options.keybindings.rebuild_reverse_map();
        self.controls.apply_options(&options.camera);
        self.clicks
            .set_threshold(options.selection.click_drag_threshold);
        self.options = options;
        self.sync_ground_grid();
        self.scene.force_dirty();
    }

    /// The last viewport seen.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Read-only snapshot for the render collaborator.
    #[must_use]
    pub fn frame(&self) -> FrameView<'_> {
        FrameView {
            scene: self.scene.scene_root(),
            scene_dirty: self.scene.is_dirty(),
            camera: self.controls.camera(),
            overlay: self.overlay.rect(),
            viewport: self.viewport,
            options: &self.options,
        }
    }

    /// Record that the latest [`frame`](Self::frame) was drawn.
    pub fn mark_rendered(&mut self) {
        self.scene.mark_rendered();
    }
}
