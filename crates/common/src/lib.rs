//! Shared vocabulary for the tempo crates: render phases, platform handles,
//! and the boxed error type used at collaborator boundaries.

mod types;

pub use types::{BoxError, FrameHandle, Phase, SubscriptionId};

pub fn crate_info() -> &'static str {
    "tempo-common v0.1.0"
}
