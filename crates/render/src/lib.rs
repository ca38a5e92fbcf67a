//! Render Targets: the renderer/scene/camera seam the scheduler drives.
//!
//! # Invariants
//! - The scheduler treats scenes and cameras as opaque; only the target
//!   knows what they are.
//! - A target renders at most once per call and reports failure as a value.
//!
//! Ships a debug text target that records one frame of text per render call,
//! usable from the CLI and from tests in place of a GPU backend.

mod renderer;

pub use renderer::{
    DebugCamera, DebugScene, DebugTextRenderer, RenderError, RenderTarget, SceneObject,
};

pub fn crate_info() -> &'static str {
    "tempo-render v0.1.0"
}
