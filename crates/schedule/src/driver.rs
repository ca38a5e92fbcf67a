use std::cell::Cell;
use std::rc::Rc;

use tempo_common::FrameHandle;
use tempo_host::{FrameCallback, FramePlatform};

/// Single-slot frame scheduler.
///
/// Idle until [`schedule_next`](Self::schedule_next), Scheduled until the
/// request fires or is cancelled. Scheduling while Scheduled replaces the
/// pending request. Dropping the driver cancels whatever is pending.
pub struct FrameDriver {
    platform: Rc<dyn FramePlatform>,
    pending: Rc<Cell<Option<FrameHandle>>>,
}

impl FrameDriver {
    pub fn new(platform: Rc<dyn FramePlatform>) -> Self {
        Self {
            platform,
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Cancel any pending request, then queue `work` for the next frame.
    pub fn schedule_next(&self, work: FrameCallback) -> FrameHandle {
        self.cancel();
        let pending = Rc::clone(&self.pending);
        let handle = self.platform.request_frame(Box::new(move || {
            pending.set(None);
            work();
        }));
        self.pending.set(Some(handle));
        tracing::trace!(%handle, "frame requested");
        handle
    }

    /// Cancel the pending request. Returns `false` if nothing was pending.
    pub fn cancel(&self) -> bool {
        let Some(handle) = self.pending.take() else {
            return false;
        };
        self.platform.cancel_frame(handle);
        tracing::trace!(%handle, "frame cancelled");
        true
    }

    /// Handle of the pending request, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending.get()
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.get().is_some()
    }
}

impl Drop for FrameDriver {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for FrameDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameDriver")
            .field("pending", &self.pending.get())
            .finish()
    }
}
