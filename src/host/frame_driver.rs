//! Per-frame loop: camera easing plus a hand-off to the renderer, stopped
//! by a cancellation token.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::camera::{Camera, Viewport};
use crate::engine::AssemblyView;
use crate::error::PartPickError;
use crate::options::Options;
use crate::scene::SceneRoot;
use crate::selection::PixelRect;
use crate::util::FrameTiming;

/// Shared stop flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the loop to stop. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether `cancel` has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Read-only snapshot handed to the renderer each frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    /// Registry contents and generation.
    pub scene: SceneRoot<'a>,
    /// Whether parts or highlights changed since the last drawn frame.
    pub scene_dirty: bool,
    /// Camera at its live pose.
    pub camera: &'a Camera,
    /// Selection rectangle, if visible.
    pub overlay: Option<PixelRect>,
    /// Viewport the overlay rectangle is measured in.
    pub viewport: Viewport,
    /// Colours, grid and highlight settings.
    pub options: &'a Options,
}

/// Render collaborator.
pub trait FrameSink {
    /// Draw one frame.
    ///
    /// # Errors
    ///
    /// Implementations report unrecoverable render failures; the driver
    /// logs them and keeps ticking.
    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), PartPickError>;
}

/// Owns the per-frame loop. Each tick eases the camera (the controller
/// gates itself) and renders one [`FrameView`], until the token is
/// cancelled.
#[derive(Debug, Default)]
pub struct FrameDriver {
    token: CancelToken,
    timing: FrameTiming,
    frames: u64,
}

impl FrameDriver {
    /// Driver with a fresh token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver stopped by an existing token.
    #[must_use]
    pub fn with_token(token: CancelToken) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    /// A clone of the stop token.
    #[must_use]
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Stop the loop.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the loop has been stopped.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }

    /// Run one frame with a measured delta. Returns `false` (and does
    /// nothing) once cancelled.
    pub fn tick(
        &mut self,
        view: &mut AssemblyView,
        sink: &mut dyn FrameSink,
    ) -> bool {
        if self.is_cancelled() {
            return false;
        }
        let dt = self.timing.tick();
        self.tick_with_delta(dt, view, sink)
    }

    /// Run one frame with an explicit delta in seconds.
    pub fn tick_with_delta(
        &mut self,
        dt: f32,
        view: &mut AssemblyView,
        sink: &mut dyn FrameSink,
    ) -> bool {
        if self.is_cancelled() {
            return false;
        }
        let _ = view.update(dt);
        match sink.render(&view.frame()) {
            Ok(()) => view.mark_rendered(),
            Err(e) => log::error!("frame render failed: {e}"),
        }
        self.frames += 1;
        true
    }

    /// Loop until cancelled. `wait_frame` blocks until the next frame is
    /// due (pumping host events in between) and returns `false` to stop
    /// early. The view is only borrowed while a frame runs, so event
    /// handlers may use it from inside `wait_frame`. Returns the number of
    /// frames run.
    pub fn run(
        &mut self,
        view: &RefCell<AssemblyView>,
        sink: &mut dyn FrameSink,
        mut wait_frame: impl FnMut() -> bool,
    ) -> u64 {
        let start = self.frames;
        while !self.is_cancelled() {
            if !wait_frame() || self.is_cancelled() {
                break;
            }
            let Ok(mut view) = view.try_borrow_mut() else {
                log::warn!("view busy; skipping frame");
                continue;
            };
            let _ = self.tick(&mut view, sink);
        }
        log::debug!("frame loop stopped after {} frames", self.frames - start);
        self.frames - start
    }
}
