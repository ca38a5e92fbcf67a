use std::rc::Rc;

use tempo_common::{FrameHandle, SubscriptionId};

/// Work handed to the frame platform. Runs at most once.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Callback invoked when an observable changes.
pub type Listener = Rc<dyn Fn()>;

/// "Run once before the next paint" primitive.
pub trait FramePlatform {
    /// Queue `callback` for the next rendering opportunity.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Drop a queued request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// A value whose mutations can be observed.
///
/// Implementations notify listeners synchronously on every mutation,
/// including mutations of anything nested inside the value. Batching and
/// deferral are the watch platform's job.
pub trait Observable {
    /// Register `listener`; it is called after each mutation.
    fn subscribe(&self, listener: Listener) -> SubscriptionId;

    /// Remove a listener. Returns `false` if `id` was not subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Monotonic mutation counter.
    fn revision(&self) -> u64;
}

/// Shared handle to the state a reactive render loop observes.
pub type UpdateSource = Rc<dyn Observable>;

/// Whether two update sources are the same underlying value.
pub fn same_source(a: &UpdateSource, b: &UpdateSource) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Deep observation primitive.
pub trait WatchPlatform {
    /// Start watching `source`. `on_change` is called once per batch of
    /// mutations, after the mutations happened, and never on subscription.
    fn watch_deep(&self, source: &UpdateSource, on_change: Listener) -> WatchStop;
}

/// Teardown for an active watch. Stopping happens at most once, either via
/// [`stop`](Self::stop) or when the value is dropped.
pub struct WatchStop {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl WatchStop {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Tear the watch down now.
    pub fn stop(mut self) {
        self.run_teardown();
    }

    fn run_teardown(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for WatchStop {
    fn drop(&mut self) {
        self.run_teardown();
    }
}

impl std::fmt::Debug for WatchStop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchStop")
            .field("armed", &self.teardown.is_some())
            .finish()
    }
}
