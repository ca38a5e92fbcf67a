use std::cell::RefCell;
use std::rc::Rc;

use tempo_host::{Listener, UpdateSource, WatchPlatform, WatchStop, same_source};

use crate::config::SourceChangePolicy;

enum WatchState {
    Unwatched,
    Watching { source: UpdateSource, stop: WatchStop },
    /// Torn down by [`SourceWatcher::stop_watching`]. Stays down until
    /// [`SourceWatcher::rearm`].
    Stopped,
}

/// Holds the single deep watch that drives reactive mode.
///
/// Unwatched until [`ensure_watching`](Self::ensure_watching) is first called,
/// then Watching until [`stop_watching`](Self::stop_watching), then Stopped.
/// A stopped watcher ignores `ensure_watching` until [`rearm`](Self::rearm).
/// A source other than the watched one is handled per [`SourceChangePolicy`].
pub struct SourceWatcher {
    platform: Rc<dyn WatchPlatform>,
    policy: SourceChangePolicy,
    state: RefCell<WatchState>,
}

impl SourceWatcher {
    pub fn new(platform: Rc<dyn WatchPlatform>) -> Self {
        Self {
            platform,
            policy: SourceChangePolicy::default(),
            state: RefCell::new(WatchState::Unwatched),
        }
    }

    pub fn with_policy(mut self, policy: SourceChangePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> SourceChangePolicy {
        self.policy
    }

    /// Start watching `source` unless a watch is already active or was
    /// stopped.
    ///
    /// Returns `true` if a new watch was established by this call.
    pub fn ensure_watching(&self, source: &UpdateSource, on_deep_change: Listener) -> bool {
        let previous = {
            let mut state = self.state.borrow_mut();
            match &*state {
                WatchState::Stopped => {
                    tracing::trace!("watch stopped; not re-established");
                    return false;
                }
                WatchState::Watching {
                    source: current, ..
                } => {
                    if same_source(current, source) {
                        return false;
                    }
                    match self.policy {
                        SourceChangePolicy::KeepFirst => {
                            tracing::warn!(
                                "update source changed while watching; keeping the first watch"
                            );
                            return false;
                        }
                        SourceChangePolicy::Rewatch => {
                            tracing::debug!("update source changed; re-arming watch");
                        }
                    }
                }
                WatchState::Unwatched => {}
            }
            std::mem::replace(&mut *state, WatchState::Unwatched)
        };
        if let WatchState::Watching { stop, .. } = previous {
            stop.stop();
        }

        let stop = self.platform.watch_deep(source, on_deep_change);
        *self.state.borrow_mut() = WatchState::Watching {
            source: Rc::clone(source),
            stop,
        };
        tracing::debug!("update source watch established");
        true
    }

    /// Tear down the active watch for good. Returns `false` if there was
    /// none.
    pub fn stop_watching(&self) -> bool {
        let previous = {
            let mut state = self.state.borrow_mut();
            if !matches!(*state, WatchState::Watching { .. }) {
                return false;
            }
            std::mem::replace(&mut *state, WatchState::Stopped)
        };
        if let WatchState::Watching { stop, .. } = previous {
            stop.stop();
        }
        tracing::debug!("update source watch stopped");
        true
    }

    /// Allow a stopped watcher to watch again on the next
    /// [`ensure_watching`](Self::ensure_watching). Returns `false` if the
    /// watcher was not stopped.
    pub fn rearm(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if !matches!(*state, WatchState::Stopped) {
            return false;
        }
        *state = WatchState::Unwatched;
        tracing::debug!("update source watch re-armed");
        true
    }

    pub fn is_stopped(&self) -> bool {
        matches!(*self.state.borrow(), WatchState::Stopped)
    }

    pub fn is_watching(&self) -> bool {
        matches!(*self.state.borrow(), WatchState::Watching { .. })
    }

    /// The source currently being watched.
    pub fn watched_source(&self) -> Option<UpdateSource> {
        match &*self.state.borrow() {
            WatchState::Watching { source, .. } => Some(Rc::clone(source)),
            WatchState::Unwatched | WatchState::Stopped => None,
        }
    }
}

impl std::fmt::Debug for SourceWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceWatcher")
            .field("policy", &self.policy)
            .field("watching", &self.is_watching())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
