use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use tempo_common::FrameHandle;

use crate::platform::{
    FrameCallback, FramePlatform, Listener, UpdateSource, WatchPlatform, WatchStop,
};

/// Single-threaded in-process host.
///
/// Frames and change notifications only happen when the owner drives the
/// host with [`run_frame`](Self::run_frame) or [`flush`](Self::flush), which
/// makes scheduling fully deterministic. Clones share the same queues.
#[derive(Clone, Default)]
pub struct LocalHost {
    inner: Rc<HostInner>,
}

#[derive(Default)]
struct HostInner {
    next_handle: Cell<u64>,
    frame_index: Cell<u64>,
    /// Requests for the next frame.
    queued: RefCell<Vec<(FrameHandle, FrameCallback)>>,
    /// Requests of the frame currently running, in request order.
    running: RefCell<VecDeque<(FrameHandle, FrameCallback)>>,
    /// Deferred change notifications.
    jobs: RefCell<VecDeque<FrameCallback>>,
}

impl LocalHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame: every callback requested before the frame began, in
    /// request order, then all pending change notifications. Callbacks
    /// requested while the frame runs wait for the next one.
    ///
    /// Returns the number of frame callbacks run.
    pub fn run_frame(&self) -> usize {
        let batch = std::mem::take(&mut *self.inner.queued.borrow_mut());
        self.inner.running.borrow_mut().extend(batch);

        let index = self.inner.frame_index.get() + 1;
        self.inner.frame_index.set(index);
        let _span = tracing::trace_span!("host_frame", index).entered();

        let mut ran = 0;
        loop {
            let next = self.inner.running.borrow_mut().pop_front();
            let Some((handle, callback)) = next else {
                break;
            };
            tracing::trace!(%handle, "running frame callback");
            callback();
            ran += 1;
        }

        self.flush();
        ran
    }

    /// Run `count` frames. Returns the total number of frame callbacks run.
    pub fn run_frames(&self, count: usize) -> usize {
        (0..count).map(|_| self.run_frame()).sum()
    }

    /// Deliver pending change notifications, including any queued while
    /// flushing. Returns how many were delivered.
    pub fn flush(&self) -> usize {
        let mut delivered = 0;
        loop {
            let next = self.inner.jobs.borrow_mut().pop_front();
            let Some(job) = next else {
                break;
            };
            job();
            delivered += 1;
        }
        delivered
    }

    /// Frame requests waiting to run.
    pub fn pending_frames(&self) -> usize {
        self.inner.queued.borrow().len() + self.inner.running.borrow().len()
    }

    /// Change notifications waiting for a flush.
    pub fn pending_notifications(&self) -> usize {
        self.inner.jobs.borrow().len()
    }

    /// Number of frames run so far.
    pub fn frame_index(&self) -> u64 {
        self.inner.frame_index.get()
    }
}

impl FramePlatform for LocalHost {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.inner.next_handle.get() + 1);
        self.inner.next_handle.set(handle.0);
        self.inner.queued.borrow_mut().push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.inner.queued.borrow_mut().retain(|(h, _)| *h != handle);
        self.inner.running.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

impl WatchPlatform for LocalHost {
    fn watch_deep(&self, source: &UpdateSource, on_change: Listener) -> WatchStop {
        let queued = Rc::new(Cell::new(false));
        let active = Rc::new(Cell::new(true));
        let host = Rc::downgrade(&self.inner);

        let listener: Listener = {
            let queued = Rc::clone(&queued);
            let active = Rc::clone(&active);
            Rc::new(move || {
                // One notification per batch: later mutations ride along.
                if !active.get() || queued.get() {
                    return;
                }
                let Some(host) = host.upgrade() else {
                    return;
                };
                queued.set(true);
                let queued = Rc::clone(&queued);
                let active = Rc::clone(&active);
                let on_change = Rc::clone(&on_change);
                host.jobs.borrow_mut().push_back(Box::new(move || {
                    queued.set(false);
                    if active.get() {
                        on_change();
                    }
                }));
            })
        };

        let id = source.subscribe(listener);
        let source = Rc::clone(source);
        WatchStop::new(move || {
            active.set(false);
            source.unsubscribe(id);
        })
    }
}

impl std::fmt::Debug for LocalHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalHost")
            .field("frame_index", &self.inner.frame_index.get())
            .field("pending_frames", &self.pending_frames())
            .field("pending_notifications", &self.pending_notifications())
            .finish()
    }
}
