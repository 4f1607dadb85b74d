//! Attaching an [`AssemblyView`] to a host event source.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::frame_driver::{CancelToken, FrameDriver, FrameSink};
use super::listeners::{EventDispatcher, ListenerKind, SubscriptionSet};
use crate::camera::Viewport;
use crate::engine::AssemblyView;

/// Live viewport size source, read at every event.
pub trait ViewportQuery {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;
}

impl<F: Fn() -> Viewport> ViewportQuery for F {
    fn viewport(&self) -> Viewport {
        self()
    }
}

impl ViewportQuery for Cell<Viewport> {
    fn viewport(&self) -> Viewport {
        self.get()
    }
}

/// Attach `view` to `dispatcher`: one listener per [`ListenerKind`], each
/// forwarding to [`AssemblyView::handle_input`] with the live viewport.
///
/// The returned guard owns those listeners and a [`FrameDriver`]; dropping
/// it (or calling [`MountGuard::unmount`]) detaches every listener, stops
/// the driver and tears down the view's interaction state.
pub fn mount(
    dispatcher: &EventDispatcher,
    view: &Rc<RefCell<AssemblyView>>,
    viewport: Rc<dyn ViewportQuery>,
) -> MountGuard {
    let mut subscriptions = SubscriptionSet::new();
    for kind in ListenerKind::ALL {
        let view = Rc::downgrade(view);
        let viewport = Rc::clone(&viewport);
        subscriptions.push(dispatcher.subscribe(kind, move |event| {
            let Some(view) = view.upgrade() else {
                return;
            };
            let Ok(mut view) = view.try_borrow_mut() else {
                log::warn!("view busy; dropping {:?} event", event.kind());
                return;
            };
            let _ = view.handle_input(event, viewport.viewport());
        }));
    }
    log::debug!("mounted view with {} listeners", subscriptions.len());

    MountGuard {
        view: Rc::clone(view),
        subscriptions,
        driver: FrameDriver::new(),
        mounted: true,
    }
}

/// Scope of one mount. See [`mount`].
#[derive(Debug)]
#[must_use = "dropping the guard unmounts the view immediately"]
pub struct MountGuard {
    view: Rc<RefCell<AssemblyView>>,
    subscriptions: SubscriptionSet,
    driver: FrameDriver,
    mounted: bool,
}

impl MountGuard {
    /// Whether the view is still attached.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Listeners held by this mount.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// The mounted view.
    #[must_use]
    pub fn view(&self) -> &Rc<RefCell<AssemblyView>> {
        &self.view
    }

    /// The frame driver's stop token.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.driver.token()
    }

    /// The frame driver.
    #[must_use]
    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    /// Run one frame. Returns `false` once unmounted or cancelled.
    pub fn tick(&mut self, sink: &mut dyn FrameSink) -> bool {
        let Ok(mut view) = self.view.try_borrow_mut() else {
            log::warn!("view busy; skipping frame");
            return !self.driver.is_cancelled();
        };
        self.driver.tick(&mut view, sink)
    }

    /// Run frames until cancelled or `wait_frame` returns `false`. See
    /// [`FrameDriver::run`].
    pub fn run(
        &mut self,
        sink: &mut dyn FrameSink,
        wait_frame: impl FnMut() -> bool,
    ) -> u64 {
        self.driver.run(&self.view, sink, wait_frame)
    }

    /// Detach now. Equivalent to dropping the guard.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        let released = self.subscriptions.dispose_all();
        self.driver.cancel();
        match self.view.try_borrow_mut() {
            Ok(mut view) => view.teardown(),
            Err(_) => log::warn!("view busy during unmount; state not reset"),
        }
        log::debug!("unmounted view, released {released} listeners");
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.teardown();
    }
}
