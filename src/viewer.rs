//! Standalone window backed by winit.
//!
//! Window events are translated into [`InputEvent`]s and dispatched through
//! an [`EventDispatcher`]; the view is attached with [`mount`] and each
//! redraw ticks the mount's frame driver into a [`Renderer`].
//!
//! ```no_run
//! # use partpick::Viewer;
//! Viewer::builder()
//!     .with_parts_path("assets/parts/assembly.json")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::camera::Viewport;
use crate::host::{mount, EventDispatcher, MountGuard, ViewportQuery};
use crate::input::{InputEvent, Key, MouseButton};
use crate::options::Options;
use crate::renderer::Renderer;
use crate::{AssemblyView, PartPickError};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    parts_path: Option<PathBuf>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            parts_path: None,
            options: None,
            title: "partpick".into(),
        }
    }

    /// Part-record JSON file to load at startup.
    #[must_use]
    pub fn with_parts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.parts_path = Some(path.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            parts_path: self.parts_path,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing one assembly with click and Shift+drag selection.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run).
pub struct Viewer {
    parts_path: Option<PathBuf>,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Load the parts, open the window and run the event loop. Blocks
    /// until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PartPickError`] if the part file can't be loaded, the
    /// event loop can't start, or GPU setup fails.
    pub fn run(self) -> Result<(), PartPickError> {
        let mut view = AssemblyView::new(self.options);
        if let Some(path) = &self.parts_path {
            let added = view.load_parts_file(path)?;
            log::info!("{} parts registered", added.len());
        }
        view.set_ground_grid(true);

        let event_loop = EventLoop::new()
            .map_err(|e| PartPickError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            title: self.title,
            window: None,
            renderer: None,
            dispatcher: EventDispatcher::new(),
            view: Rc::new(RefCell::new(view)),
            viewport: Rc::new(Cell::new(Viewport::new(1, 1))),
            guard: None,
            cursor: (0.0, 0.0),
            shift: ShiftKeys::default(),
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| PartPickError::Viewer(e.to_string()))?;
        app.error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    title: String,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    dispatcher: EventDispatcher,
    view: Rc<RefCell<AssemblyView>>,
    viewport: Rc<Cell<Viewport>>,
    guard: Option<MountGuard>,
    cursor: (f32, f32),
    shift: ShiftKeys,
    error: Option<PartPickError>,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// Physical Shift keys currently down. The view sees a single Shift that is
/// held while either side is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ShiftKeys {
    left: bool,
    right: bool,
}

impl ShiftKeys {
    fn is_held(self) -> bool {
        self.left || self.right
    }

    /// Record a Shift key change. Returns the new combined state when it
    /// flipped.
    fn update(&mut self, code: KeyCode, pressed: bool) -> Option<bool> {
        let was_held = self.is_held();
        match code {
            KeyCode::ShiftLeft => self.left = pressed,
            KeyCode::ShiftRight => self.right = pressed,
            _ => return None,
        }
        let held = self.is_held();
        (held != was_held).then_some(held)
    }
}

/// Shift (either side) or the key's code name.
fn translate_key(code: KeyCode) -> Key {
    match code {
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        other => Key::Code(format!("{other:?}")),
    }
}

impl ViewerApp {
    fn dispatch(&self, event: &InputEvent) {
        let _ = self.dispatcher.dispatch(event);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PartPickError) {
        log::error!("{error}");
        self.error = Some(error);
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(guard) = self.guard.take() {
            guard.unmount();
        }
        event_loop.exit();
    }

    fn on_key(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let key = translate_key(code);
        let pressed = event.state == ElementState::Pressed;
        if key == Key::Shift {
            if self.shift.update(code, pressed).is_none() {
                return;
            }
        } else if event.repeat {
            return;
        }
        let input = if pressed {
            InputEvent::KeyDown { key }
        } else {
            InputEvent::KeyUp { key }
        };
        self.dispatch(&input);
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, PartPickError::Viewer(e.to_string()));
                return;
            }
        };

        let (width, height) = viewport_size(window.inner_size());
        let renderer = match pollster::block_on(Renderer::new(
            window.clone(),
            (width, height),
        )) {
            Ok(r) => r,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        };

        self.viewport.set(Viewport::new(width, height));
        {
            let mut view = self.view.borrow_mut();
            view.resize(width, height);
            let _ = view.fit_camera(false);
        }
        let viewport: Rc<dyn ViewportQuery> = self.viewport.clone();
        self.guard = Some(mount(&self.dispatcher, &self.view, viewport));

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.shutdown(event_loop);
            return;
        }
        if self.guard.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                let (width, height) = viewport_size(size);
                self.viewport.set(Viewport::new(width, height));
                self.view.borrow_mut().resize(width, height);
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(width, height);
                }
            }

            WindowEvent::RedrawRequested => {
                let (Some(guard), Some(renderer)) =
                    (&mut self.guard, &mut self.renderer)
                else {
                    return;
                };
                if !guard.tick(renderer) {
                    self.shutdown(event_loop);
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let (x, y) = self.cursor;
                let button = MouseButton::from(button);
                let input = match state {
                    ElementState::Pressed => {
                        InputEvent::PointerDown { button, x, y }
                    }
                    ElementState::Released => {
                        InputEvent::PointerUp { button, x, y }
                    }
                };
                self.dispatch(&input);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                let (x, y) = self.cursor;
                self.dispatch(&InputEvent::PointerMoved { x, y });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                self.dispatch(&InputEvent::Scroll { delta });
            }

            WindowEvent::KeyboardInput { event, .. } => self.on_key(&event),

            // A Shift release outside the window never arrives; treat focus
            // loss as one.
            WindowEvent::Focused(false) if self.shift.is_held() => {
                self.shift = ShiftKeys::default();
                self.dispatch(&InputEvent::KeyUp { key: Key::Shift });
            }

            _ => (),
        }
    }
}
