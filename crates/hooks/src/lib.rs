//! Hook chains: ordered callbacks run immediately before or after a render.
//!
//! # Invariants
//! - Chain order is insertion order, changed only by indexed insert/remove.
//! - Duplicates are allowed; identity removal takes the first occurrence.
//! - Removing something that is not there is a no-op, never an error.

mod registry;

pub use registry::{Hook, HookFailure, HookRegistry, Position, hook};

pub fn crate_info() -> &'static str {
    "tempo-hooks v0.1.0"
}
