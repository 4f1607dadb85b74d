//! End-to-end selection through a mounted view: events go through an
//! `EventDispatcher`, exactly as a host window would deliver them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::{Vec2, Vec3};
use partpick::camera::Viewport;
use partpick::host::{
    mount, EventDispatcher, FrameSink, FrameView, ListenerKind, MountGuard,
    ViewportQuery,
};
use partpick::part::{BoxGeometry, Position};
use partpick::{
    AssemblyView, InputEvent, Key, MouseButton, PartId, PartPickError,
    PartRecord,
};

const VIEWPORT: Viewport = Viewport {
    width: 800,
    height: 800,
};

struct Harness {
    dispatcher: EventDispatcher,
    view: Rc<RefCell<AssemblyView>>,
    size: Rc<Cell<Viewport>>,
}

impl Harness {
    /// Three unit cubes at x = -2, 0, 2 seen from z = 5.
    fn new() -> Self {
        let records = [-2.0, 0.0, 2.0].into_iter().enumerate().map(|(i, x)| {
            PartRecord::new(
                i as u32 + 1,
                format!("cube-{i}"),
                BoxGeometry::new(1.0, 1.0, 1.0),
                Position::new(x, 0.0, 0.0),
            )
        });
        let mut view = AssemblyView::with_parts(Default::default(), records);
        view.controls_mut()
            .set_pose(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        view.resize(VIEWPORT.width, VIEWPORT.height);
        Self {
            dispatcher: EventDispatcher::new(),
            view: Rc::new(RefCell::new(view)),
            size: Rc::new(Cell::new(VIEWPORT)),
        }
    }

    fn mount(&self) -> MountGuard {
        let size: Rc<dyn ViewportQuery> = self.size.clone();
        mount(&self.dispatcher, &self.view, size)
    }

    fn send(&self, event: InputEvent) -> usize {
        self.dispatcher.dispatch(&event)
    }

    /// Pixel position of a part's center.
    fn pixel_of(&self, id: u32) -> Vec2 {
        let view = self.view.borrow();
        let part = view.part(PartId(id)).map(|p| p.position());
        let ndc = view.camera().project(part.unwrap_or(Vec3::ZERO));
        VIEWPORT.ndc_to_pixel(ndc.truncate())
    }

    fn click_at(&self, p: Vec2) {
        let button = MouseButton::Left;
        let _ = self.send(InputEvent::PointerDown { button, x: p.x, y: p.y });
        let _ = self.send(InputEvent::PointerUp { button, x: p.x, y: p.y });
    }

    fn shift(&self, down: bool) {
        let key = Key::Shift;
        let _ = self.send(if down {
            InputEvent::KeyDown { key }
        } else {
            InputEvent::KeyUp { key }
        });
    }

    fn selected(&self) -> Vec<PartId> {
        self.view.borrow().selection().ids()
    }

    fn camera_enabled(&self) -> bool {
        self.view.borrow().controls().is_enabled()
    }

    fn highlighted(&self, id: u32) -> bool {
        self.view
            .borrow()
            .part(PartId(id))
            .is_some_and(|p| p.is_highlighted())
    }
}

fn ndc_px(x: f32, y: f32) -> Vec2 {
    VIEWPORT.ndc_to_pixel(Vec2::new(x, y))
}

#[test]
fn click_toggles_a_part_in_and_out() {
    let h = Harness::new();
    let _guard = h.mount();

    h.click_at(h.pixel_of(2));
    assert_eq!(h.selected(), vec![PartId(2)]);
    assert!(h.highlighted(2));

    h.click_at(h.pixel_of(2));
    assert!(h.selected().is_empty());
    assert!(!h.highlighted(2));
}

#[test]
fn click_on_empty_space_changes_nothing() {
    let h = Harness::new();
    let _guard = h.mount();
    h.click_at(h.pixel_of(1));
    h.click_at(ndc_px(0.0, 0.9));
    assert_eq!(h.selected(), vec![PartId(1)]);
}

#[test]
fn shift_drag_selects_parts_inside_rectangle() {
    let h = Harness::new();
    let _guard = h.mount();
    let (from, to) = (ndc_px(-0.25, 0.25), ndc_px(0.25, -0.25));

    h.shift(true);
    assert!(!h.camera_enabled());

    let button = MouseButton::Left;
    let _ = h.send(InputEvent::PointerDown { button, x: from.x, y: from.y });
    let _ = h.send(InputEvent::PointerMoved { x: to.x, y: to.y });
    {
        let view = h.view.borrow();
        assert!(view.overlay().is_visible());
        assert!(view.selection_engine().modifiers().is_selecting);
    }
    let _ = h.send(InputEvent::PointerUp { button, x: to.x, y: to.y });
    assert!(!h.view.borrow().overlay().is_visible());
    assert!(!h.camera_enabled(), "camera stays off while Shift is held");

    h.shift(false);
    assert!(h.camera_enabled());
    assert_eq!(h.selected(), vec![PartId(2)]);
    assert!(h.highlighted(2));
    assert!(!h.highlighted(1) && !h.highlighted(3));
}

#[test]
fn second_drag_over_same_parts_deselects_them() {
    let h = Harness::new();
    let _guard = h.mount();
    let (from, to) = (ndc_px(-0.9, 0.3), ndc_px(0.9, -0.3));
    let button = MouseButton::Left;
    for _ in 0..2 {
        h.shift(true);
        let _ = h.send(InputEvent::PointerDown { button, x: from.x, y: from.y });
        let _ = h.send(InputEvent::PointerUp { button, x: to.x, y: to.y });
        h.shift(false);
    }
    assert!(h.selected().is_empty());
}

#[test]
fn drag_toggles_against_existing_click_selection() {
    let h = Harness::new();
    let _guard = h.mount();
    h.click_at(h.pixel_of(1));

    let (from, to) = (ndc_px(-0.9, 0.3), ndc_px(0.05, -0.3));
    let button = MouseButton::Left;
    h.shift(true);
    let _ = h.send(InputEvent::PointerDown { button, x: from.x, y: from.y });
    let _ = h.send(InputEvent::PointerUp { button, x: to.x, y: to.y });
    h.shift(false);

    // Part 1 was selected and is inside: it flips off. Part 2 flips on.
    assert_eq!(h.selected(), vec![PartId(2)]);
}

#[test]
fn remount_does_not_duplicate_listeners() {
    let h = Harness::new();
    drop(h.mount());
    assert_eq!(h.dispatcher.listener_count(), 0);

    let _guard = h.mount();
    assert_eq!(h.dispatcher.listener_count(), ListenerKind::ALL.len());
    assert_eq!(h.dispatcher.listener_count_for(ListenerKind::PointerUp), 1);

    // A doubled listener would toggle twice and leave nothing selected.
    h.click_at(h.pixel_of(3));
    assert_eq!(h.selected(), vec![PartId(3)]);
}

#[test]
fn unmount_mid_drag_restores_camera_and_hides_overlay() {
    let h = Harness::new();
    let guard = h.mount();
    let from = ndc_px(-0.5, 0.5);
    let to = ndc_px(0.5, -0.5);
    let button = MouseButton::Left;

    h.shift(true);
    let _ = h.send(InputEvent::PointerDown { button, x: from.x, y: from.y });
    let _ = h.send(InputEvent::PointerMoved { x: to.x, y: to.y });
    guard.unmount();

    {
        let view = h.view.borrow();
        assert!(view.controls().is_enabled());
        assert!(!view.overlay().is_visible());
        assert!(view.selection_engine().drag().is_none());
    }

    // The rest of the gesture arrives after unmount and reaches nobody.
    assert_eq!(
        h.send(InputEvent::PointerUp { button, x: to.x, y: to.y }),
        0
    );
    assert!(h.selected().is_empty());
}

#[test]
fn unmount_keeps_the_selection() {
    let h = Harness::new();
    let guard = h.mount();
    h.click_at(h.pixel_of(1));
    drop(guard);
    assert_eq!(h.selected(), vec![PartId(1)]);
    assert!(h.highlighted(1));
}

#[derive(Default)]
struct CountingSink {
    frames: usize,
    overlay_frames: usize,
}

impl FrameSink for CountingSink {
    fn render(&mut self, frame: &FrameView<'_>) -> Result<(), PartPickError> {
        self.frames += 1;
        if frame.overlay.is_some() {
            self.overlay_frames += 1;
        }
        Ok(())
    }
}

#[test]
fn frame_loop_runs_until_cancelled_and_sees_events() {
    let h = Harness::new();
    let mut guard = h.mount();
    let token = guard.cancel_token();
    let mut sink = CountingSink::default();
    let (from, to) = (ndc_px(-0.2, 0.2), ndc_px(0.2, -0.2));
    let button = MouseButton::Left;

    let mut waits = 0;
    let frames = guard.run(&mut sink, || {
        waits += 1;
        match waits {
            1 => {
                h.shift(true);
                let _ = h.send(InputEvent::PointerDown {
                    button,
                    x: from.x,
                    y: from.y,
                });
                let _ = h.send(InputEvent::PointerMoved { x: to.x, y: to.y });
            }
            3 => {
                let _ = h.send(InputEvent::PointerUp { button, x: to.x, y: to.y });
                h.shift(false);
            }
            5 => token.cancel(),
            _ => {}
        }
        true
    });

    assert_eq!(frames, 4);
    assert_eq!(sink.frames, 4);
    assert_eq!(sink.overlay_frames, 2);
    assert_eq!(h.selected(), vec![PartId(2)]);

    // Once cancelled the guard renders nothing more.
    assert!(!guard.tick(&mut sink));
    assert_eq!(sink.frames, 4);
}

#[test]
fn unmount_stops_the_frame_driver() {
    let h = Harness::new();
    let guard = h.mount();
    let token = guard.cancel_token();
    assert!(!token.is_cancelled());
    guard.unmount();
    assert!(token.is_cancelled());
}
