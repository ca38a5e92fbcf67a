use std::cell::{Cell, RefCell};
use std::fmt::Write as _;

use glam::Vec3;
use tempo_common::BoxError;

/// Errors a render target can report for a single render call.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("render target lost: {0}")]
    TargetLost(String),
    #[error("render backend error: {0}")]
    Backend(#[source] BoxError),
}

/// Renderer-agnostic interface. All render targets implement this trait.
///
/// Scenes and cameras are whatever the backend uses; the scheduler only
/// passes them through.
pub trait RenderTarget: 'static {
    /// Scene graph handle type.
    type Scene: 'static;
    /// Camera handle type.
    type Camera: 'static;

    /// Render one frame of `scene` as seen from `camera`.
    fn render(&self, scene: &Self::Scene, camera: &Self::Camera) -> Result<(), RenderError>;
}

/// Camera for the debug target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugCamera {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for DebugCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 10.0, 10.0),
            target: Vec3::ZERO,
            fov_degrees: 60.0,
        }
    }
}

/// A named object placed in a [`DebugScene`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub position: Vec3,
}

/// Flat scene for the debug target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugScene {
    pub label: String,
    pub objects: Vec<SceneObject>,
}

impl DebugScene {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            objects: Vec::new(),
        }
    }

    /// Builder-style object insertion.
    pub fn with_object(mut self, name: impl Into<String>, position: Vec3) -> Self {
        self.objects.push(SceneObject {
            name: name.into(),
            position,
        });
        self
    }
}

/// Debug text render target.
///
/// Each successful render appends a human-readable description of the scene
/// and camera to an in-memory frame log.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: RefCell<Vec<String>>,
    lost: Cell<bool>,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered so far.
    pub fn frame_count(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Text of the most recent frame.
    pub fn last_frame(&self) -> Option<String> {
        self.frames.borrow().last().cloned()
    }

    /// Take the recorded frames, leaving the log empty.
    pub fn take_frames(&self) -> Vec<String> {
        std::mem::take(&mut *self.frames.borrow_mut())
    }

    /// Simulate losing (or regaining) the output surface. While lost, every
    /// render fails with [`RenderError::TargetLost`].
    pub fn set_lost(&self, lost: bool) {
        self.lost.set(lost);
    }
}

impl RenderTarget for DebugTextRenderer {
    type Scene = DebugScene;
    type Camera = DebugCamera;

    fn render(&self, scene: &DebugScene, camera: &DebugCamera) -> Result<(), RenderError> {
        if self.lost.get() {
            return Err(RenderError::TargetLost("debug surface".into()));
        }

        let index = self.frames.borrow().len();
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame {index} [{}] ({} objects) ===",
            scene.label,
            scene.objects.len()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            camera.eye.x,
            camera.eye.y,
            camera.eye.z,
            camera.target.x,
            camera.target.y,
            camera.target.z,
            camera.fov_degrees
        );
        for object in &scene.objects {
            let p = object.position;
            let _ = writeln!(
                out,
                "  {} pos=({:.2}, {:.2}, {:.2})",
                object.name, p.x, p.y, p.z
            );
        }

        tracing::trace!(index, objects = scene.objects.len(), "debug frame rendered");
        self.frames.borrow_mut().push(out);
        Ok(())
    }
}
