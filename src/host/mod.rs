//! Host integration: event listeners, mounting and the frame loop.

pub mod frame_driver;
pub mod listeners;
pub mod mount;

pub use frame_driver::{CancelToken, FrameDriver, FrameSink, FrameView};
pub use listeners::{
    EventDispatcher, ListenerKind, Subscription, SubscriptionSet,
};
pub use mount::{mount, MountGuard, ViewportQuery};
