//! Clock-driven state machines behind the decorative boot loader and the
//! notification toast stack.
//!
//! Nothing in this crate reads the wall clock. Every widget owns a
//! [`timer::TimerQueue`] measured in virtual milliseconds and moves forward
//! only when its owner calls [`Animated::advance_to`]. A rendering frontend
//! maps elapsed wall time onto that clock; tests step it by hand.
//!
//! The widgets are single-threaded and never fail on their own: when their
//! inputs are exhausted they simply idle.

pub mod catalog;
pub mod loader;
pub mod notifications;
pub mod timer;

pub use loader::{LoaderRuntimeState, RevealedLine, StagedLoader};
pub use notifications::{ActionEffect, ActionError, Notification, NotificationAction, NotificationQueue};

/// A widget whose state evolves with a virtual clock.
pub trait Animated {
    /// Current virtual time, in milliseconds since the widget was mounted.
    fn now(&self) -> u64;

    /// Fires every timer due up to and including `now_ms`, in deadline order,
    /// and moves the clock to `now_ms`. Moving backwards is a no-op.
    fn advance_to(&mut self, now_ms: u64);

    /// Deadline of the earliest pending timer, if any.
    fn next_deadline(&self) -> Option<u64>;

    /// Advances the clock by `delta_ms`.
    fn advance_by(&mut self, delta_ms: u64) {
        let target = self.now().saturating_add(delta_ms);
        self.advance_to(target);
    }
}
