use std::cell::RefCell;
use std::rc::Rc;

use tempo_host::UpdateSource;
use tempo_render::{RenderError, RenderTarget};

/// Replacement for the default `renderer.render(scene, camera)` call.
pub type CustomRender<R> = Rc<dyn Fn(&UpdateContext<R>) -> Result<(), RenderError>>;

/// How the next cycle gets scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Every rendering opportunity, whether or not anything changed.
    Continuous,
    /// Only after the update source was mutated.
    Reactive,
}

/// Application handle. Owns the optional custom-render override.
pub struct App<R: RenderTarget> {
    name: String,
    custom_render: RefCell<Option<CustomRender<R>>>,
}

impl<R: RenderTarget> App<R> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            custom_render: RefCell::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Take over rendering: from the next cycle on, `render` runs instead of
    /// the renderer's default path.
    pub fn set_custom_render<F>(&self, render: F)
    where
        F: Fn(&UpdateContext<R>) -> Result<(), RenderError> + 'static,
    {
        *self.custom_render.borrow_mut() = Some(Rc::new(render));
    }

    /// Go back to the default render path.
    pub fn clear_custom_render(&self) {
        self.custom_render.borrow_mut().take();
    }

    /// The current override, if any.
    pub fn custom_render(&self) -> Option<CustomRender<R>> {
        self.custom_render.borrow().clone()
    }
}

impl<R: RenderTarget> std::fmt::Debug for App<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("name", &self.name)
            .field("custom_render", &self.custom_render.borrow().is_some())
            .finish()
    }
}

/// Everything one update cycle works with.
///
/// Built fresh for every scheduled frame: `app` and `update_source` come from
/// the context that started the loop, the render handles are resolved from
/// the [`Stage`] when the frame fires.
pub struct UpdateContext<R: RenderTarget> {
    pub app: Rc<App<R>>,
    pub renderer: Option<Rc<R>>,
    pub scene: Option<Rc<R::Scene>>,
    pub camera: Option<Rc<R::Camera>>,
    pub update_source: Option<UpdateSource>,
}

impl<R: RenderTarget> UpdateContext<R> {
    /// A context with no render handles and no update source.
    pub fn new(app: Rc<App<R>>) -> Self {
        Self {
            app,
            renderer: None,
            scene: None,
            camera: None,
            update_source: None,
        }
    }

    pub fn with_renderer(mut self, renderer: Rc<R>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_scene(mut self, scene: Rc<R::Scene>) -> Self {
        self.scene = Some(scene);
        self
    }

    pub fn with_camera(mut self, camera: Rc<R::Camera>) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_update_source(mut self, source: UpdateSource) -> Self {
        self.update_source = Some(source);
        self
    }

    pub fn mode(&self) -> UpdateMode {
        if self.update_source.is_some() {
            UpdateMode::Reactive
        } else {
            UpdateMode::Continuous
        }
    }

    /// Whether renderer, scene and camera are all present.
    pub fn can_render(&self) -> bool {
        self.renderer.is_some() && self.scene.is_some() && self.camera.is_some()
    }
}

impl<R: RenderTarget> Clone for UpdateContext<R> {
    fn clone(&self) -> Self {
        Self {
            app: Rc::clone(&self.app),
            renderer: self.renderer.clone(),
            scene: self.scene.clone(),
            camera: self.camera.clone(),
            update_source: self.update_source.clone(),
        }
    }
}

impl<R: RenderTarget> std::fmt::Debug for UpdateContext<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateContext")
            .field("app", &self.app.name())
            .field("renderer", &self.renderer.is_some())
            .field("scene", &self.scene.is_some())
            .field("camera", &self.camera.is_some())
            .field("mode", &self.mode())
            .finish()
    }
}

/// The current render handles. Any of them can be swapped or cleared at any
/// time; scheduled frames pick up whatever is here when they fire.
pub struct Stage<R: RenderTarget> {
    renderer: RefCell<Option<Rc<R>>>,
    scene: RefCell<Option<Rc<R::Scene>>>,
    camera: RefCell<Option<Rc<R::Camera>>>,
}

impl<R: RenderTarget> Stage<R> {
    /// An empty stage: nothing will render until handles are set.
    pub fn new() -> Self {
        Self {
            renderer: RefCell::new(None),
            scene: RefCell::new(None),
            camera: RefCell::new(None),
        }
    }

    pub fn set_renderer(&self, renderer: Option<Rc<R>>) {
        *self.renderer.borrow_mut() = renderer;
    }

    pub fn set_scene(&self, scene: Option<Rc<R::Scene>>) {
        *self.scene.borrow_mut() = scene;
    }

    pub fn set_camera(&self, camera: Option<Rc<R::Camera>>) {
        *self.camera.borrow_mut() = camera;
    }

    pub fn renderer(&self) -> Option<Rc<R>> {
        self.renderer.borrow().clone()
    }

    pub fn scene(&self) -> Option<Rc<R::Scene>> {
        self.scene.borrow().clone()
    }

    pub fn camera(&self) -> Option<Rc<R::Camera>> {
        self.camera.borrow().clone()
    }

    /// Build a context from the current handles.
    pub fn resolve(
        &self,
        app: Rc<App<R>>,
        update_source: Option<UpdateSource>,
    ) -> UpdateContext<R> {
        UpdateContext {
            app,
            renderer: self.renderer(),
            scene: self.scene(),
            camera: self.camera(),
            update_source,
        }
    }
}

impl<R: RenderTarget> Default for Stage<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RenderTarget> std::fmt::Debug for Stage<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("renderer", &self.renderer.borrow().is_some())
            .field("scene", &self.scene.borrow().is_some())
            .field("camera", &self.camera.borrow().is_some())
            .finish()
    }
}
