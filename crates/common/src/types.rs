use serde::{Deserialize, Serialize};

/// Error type produced by opaque collaborators (hooks, renderers, custom
/// render overrides). Not `Send`: everything runs on one thread.
pub type BoxError = Box<dyn std::error::Error + 'static>;

/// Which side of the render a hook chain runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    BeforeRender,
    AfterRender,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BeforeRender => f.write_str("before-render"),
            Self::AfterRender => f.write_str("after-render"),
        }
    }
}

/// Opaque token for a pending "run before next paint" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

impl std::fmt::Display for FrameHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

/// Identifies one listener registered on an observable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);
