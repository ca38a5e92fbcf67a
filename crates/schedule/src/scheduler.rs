use std::rc::Rc;

use tempo_host::{FramePlatform, WatchPlatform};

use crate::config::LoopConfig;
use crate::driver::FrameDriver;
use crate::watcher::SourceWatcher;

/// The scheduling state of one render loop: the single frame slot and the
/// single watch slot.
///
/// Owned by whoever builds the loop and handed to
/// [`RenderLoop::new`](crate::RenderLoop::new).
#[derive(Debug)]
pub struct Scheduler {
    frames: FrameDriver,
    watcher: SourceWatcher,
}

impl Scheduler {
    pub fn new(frames: Rc<dyn FramePlatform>, watches: Rc<dyn WatchPlatform>) -> Self {
        Self {
            frames: FrameDriver::new(frames),
            watcher: SourceWatcher::new(watches),
        }
    }

    /// Use one host for both frame timing and observation.
    pub fn from_host<H>(host: &H) -> Self
    where
        H: FramePlatform + WatchPlatform + Clone + 'static,
    {
        Self::new(Rc::new(host.clone()), Rc::new(host.clone()))
    }

    /// Apply loop configuration.
    pub fn with_config(mut self, config: &LoopConfig) -> Self {
        self.watcher = self.watcher.with_policy(config.source_change);
        self
    }

    pub fn frames(&self) -> &FrameDriver {
        &self.frames
    }

    pub fn watcher(&self) -> &SourceWatcher {
        &self.watcher
    }

    /// Cancel the pending frame, if any. Leaves the watch alone.
    pub fn cancel_frame(&self) -> bool {
        self.frames.cancel()
    }

    /// Stop the active watch, if any. Leaves the pending frame alone. Later
    /// cycles do not watch again until [`rearm_watch`](Self::rearm_watch).
    pub fn cancel_watch(&self) -> bool {
        self.watcher.stop_watching()
    }

    pub fn rearm_watch(&self) -> bool {
        self.watcher.rearm()
    }
}
