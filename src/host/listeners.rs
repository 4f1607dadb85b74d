//! Host event source with scoped listener registration.
//!
//! Every `subscribe` hands back a [`Subscription`]; dropping it (or calling
//! [`Subscription::dispose`]) removes the listener. Group the subscriptions
//! of one mount in a [`SubscriptionSet`] so they all go at once.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::input::InputEvent;

/// Which event stream a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer button presses.
    PointerDown,
    /// Pointer button releases.
    PointerUp,
    /// Pointer motion.
    PointerMove,
    /// Scroll wheel.
    Wheel,
    /// Key presses.
    KeyDown,
    /// Key releases.
    KeyUp,
}

impl ListenerKind {
    /// Every kind, in a fixed order.
    pub const ALL: [Self; 6] = [
        Self::PointerDown,
        Self::PointerUp,
        Self::PointerMove,
        Self::Wheel,
        Self::KeyDown,
        Self::KeyUp,
    ];
}

type Handler = Rc<RefCell<dyn FnMut(&InputEvent)>>;

struct Listener {
    id: u64,
    kind: ListenerKind,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl Registry {
    fn remove(&mut self, id: u64) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }
}

/// Single-threaded event source: listeners subscribe per [`ListenerKind`]
/// and [`dispatch`](Self::dispatch) calls every listener for the event's
/// kind in subscription order.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventDispatcher {
    /// Dispatcher with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler` to `kind`. The listener lives as long as the
    /// returned [`Subscription`].
    pub fn subscribe(
        &self,
        kind: ListenerKind,
        handler: impl FnMut(&InputEvent) + 'static,
    ) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push(Listener {
            id,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
            kind,
        }
    }

    /// Deliver `event` to every listener of its kind. Returns how many
    /// listeners ran.
    ///
    /// Listeners may subscribe or unsubscribe while being called; changes
    /// take effect from the next dispatch. A listener that re-enters
    /// `dispatch` is not called recursively.
    pub fn dispatch(&self, event: &InputEvent) -> usize {
        let kind = event.kind();
        let handlers: Vec<Handler> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| Rc::clone(&l.handler))
            .collect();

        let mut called = 0;
        for handler in handlers {
            if let Ok(mut handler) = handler.try_borrow_mut() {
                handler(event);
                called += 1;
            } else {
                log::warn!("skipping re-entrant {kind:?} listener");
            }
        }
        called
    }

    /// Total number of attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Number of listeners attached to `kind`.
    #[must_use]
    pub fn listener_count_for(&self, kind: ListenerKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }
}

/// Disposer for one listener. Dropping it detaches the listener.
#[must_use = "dropping a Subscription detaches its listener immediately"]
#[derive(Debug)]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
    kind: ListenerKind,
}

impl Subscription {
    /// The event stream this listener is attached to.
    #[must_use]
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }

    /// Whether the listener is still attached.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry.upgrade().is_some_and(|registry| {
            registry.borrow().listeners.iter().any(|l| l.id == self.id)
        })
    }

    /// Detach the listener now.
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        match registry.try_borrow_mut() {
            Ok(mut registry) => {
                let _ = registry.remove(self.id);
            }
            Err(_) => {
                log::warn!("listener registry busy; {:?} listener leaked", self.kind);
            }
        };
    }
}

/// Subscriptions released together.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a subscription.
    pub fn push(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Number of held subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether the set holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Detach every listener. Returns how many were released.
    pub fn dispose_all(&mut self) -> usize {
        let count = self.subscriptions.len();
        self.subscriptions.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::input::Key;

    fn shift_down() -> InputEvent {
        InputEvent::KeyDown { key: Key::Shift }
    }

    #[test]
    fn dispatch_reaches_matching_kind_only() {
        let dispatcher = EventDispatcher::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let _sub = dispatcher.subscribe(ListenerKind::KeyDown, move |_| {
            counter.set(counter.get() + 1);
        });
        assert_eq!(dispatcher.dispatch(&shift_down()), 1);
        assert_eq!(
            dispatcher.dispatch(&InputEvent::KeyUp { key: Key::Shift }),
            0
        );
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn dropping_subscription_detaches() {
        let dispatcher = EventDispatcher::new();
        let sub = dispatcher.subscribe(ListenerKind::Wheel, |_| {});
        assert!(sub.is_active());
        assert_eq!(dispatcher.listener_count(), 1);
        sub.dispose();
        assert_eq!(dispatcher.listener_count(), 0);
        assert_eq!(
            dispatcher.dispatch(&InputEvent::Scroll { delta: 1.0 }),
            0
        );
    }

    #[test]
    fn subscription_set_releases_together() {
        let dispatcher = EventDispatcher::new();
        let mut set = SubscriptionSet::new();
        for kind in ListenerKind::ALL {
            set.push(dispatcher.subscribe(kind, |_| {}));
        }
        assert_eq!(dispatcher.listener_count(), 6);
        assert_eq!(set.dispose_all(), 6);
        assert_eq!(dispatcher.listener_count(), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn subscription_outliving_dispatcher_is_harmless() {
        let dispatcher = EventDispatcher::new();
        let sub = dispatcher.subscribe(ListenerKind::KeyUp, |_| {});
        drop(dispatcher);
        assert!(!sub.is_active());
        drop(sub);
    }

    #[test]
    fn listener_can_unsubscribe_itself() {
        let dispatcher = EventDispatcher::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::default();
        let slot_in = Rc::clone(&slot);
        let sub = dispatcher.subscribe(ListenerKind::KeyDown, move |_| {
            drop(slot_in.borrow_mut().take());
        });
        *slot.borrow_mut() = Some(sub);
        assert_eq!(dispatcher.dispatch(&shift_down()), 1);
        assert_eq!(dispatcher.listener_count(), 0);
        assert_eq!(dispatcher.dispatch(&shift_down()), 0);
    }
}
