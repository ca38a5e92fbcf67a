//! Host Platform: the two primitives the scheduler consumes from its
//! environment, plus an in-process implementation of both.
//!
//! # Invariants
//! - Frame callbacks run from the host's event loop, never re-entrantly from
//!   the request that scheduled them.
//! - Change notifications are delivered after the mutation, batched: many
//!   mutations before a flush produce one notification per watch.
//! - Everything here is single-threaded (`Rc`, `RefCell`); types are `!Send`.

mod local;
mod platform;
mod reactive;

pub use local::LocalHost;
pub use platform::{
    FrameCallback, FramePlatform, Listener, Observable, UpdateSource, WatchPlatform, WatchStop,
    same_source,
};
pub use reactive::Reactive;

pub fn crate_info() -> &'static str {
    "tempo-host v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("host"));
    }
}
