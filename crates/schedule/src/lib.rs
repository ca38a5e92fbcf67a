//! Update Cycle: decides when the next render happens and runs the hook
//! chains around each render.
//!
//! # Invariants
//! - At most one frame request is outstanding; scheduling a new one cancels
//!   the previous request.
//! - At most one deep watch is active; it is established lazily and never
//!   re-established while active.
//! - Within a cycle: schedule next, before hooks, render, after hooks. Only
//!   the next cycle is asynchronous.
//! - A failing hook or render aborts the rest of its cycle only; the next
//!   cycle was already scheduled.

pub mod config;
mod context;
mod cycle;
mod driver;
mod scheduler;
mod watcher;

pub use config::{ConfigError, LoopConfig, SourceChangePolicy, load_config};
pub use context::{App, CustomRender, Stage, UpdateContext, UpdateMode};
pub use cycle::{CycleError, LoopStats, RenderLoop};
pub use driver::FrameDriver;
pub use scheduler::Scheduler;
pub use watcher::SourceWatcher;

pub fn crate_info() -> &'static str {
    "tempo-schedule v0.1.0"
}
