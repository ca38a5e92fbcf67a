use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;
use tempo_common::Phase;
use tempo_hooks::{Hook, HookFailure, HookRegistry, Position};
use tempo_host::UpdateSource;
use tempo_render::{RenderError, RenderTarget};

use crate::context::{App, Stage, UpdateContext};
use crate::scheduler::Scheduler;

/// Why a cycle stopped early.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("{phase} {failure}")]
    Hook {
        phase: Phase,
        #[source]
        failure: HookFailure,
    },
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

/// Counters over the lifetime of a render loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoopStats {
    /// Cycles started.
    pub cycles: u64,
    /// Default `renderer.render` calls.
    pub renders: u64,
    /// Custom-render override calls.
    pub custom_renders: u64,
    /// Cycles that skipped rendering for lack of renderer, scene or camera.
    pub skipped_renders: u64,
    /// Cycles cut short by a hook or render error.
    pub aborted_cycles: u64,
}

/// A render loop: hook chains, render handles and scheduling state.
///
/// Cheap to clone; clones drive the same loop. Hooks can hold a clone to
/// (un)register hooks or cancel scheduling from inside a cycle. Changes to
/// a hook chain made while that chain is running apply from the next pass.
pub struct RenderLoop<R: RenderTarget> {
    inner: Rc<LoopInner<R>>,
}

struct LoopInner<R: RenderTarget> {
    scheduler: Scheduler,
    stage: Stage<R>,
    before: RefCell<HookRegistry<UpdateContext<R>>>,
    after: RefCell<HookRegistry<UpdateContext<R>>>,
    stats: Cell<LoopStats>,
}

impl<R: RenderTarget> RenderLoop<R> {
    pub fn new(scheduler: Scheduler, stage: Stage<R>) -> Self {
        Self {
            inner: Rc::new(LoopInner {
                scheduler,
                stage,
                before: RefCell::new(HookRegistry::new()),
                after: RefCell::new(HookRegistry::new()),
                stats: Cell::new(LoopStats::default()),
            }),
        }
    }

    /// Render handles used by scheduled frames.
    pub fn stage(&self) -> &Stage<R> {
        &self.inner.stage
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.inner.scheduler
    }

    /// A context resolved from the stage's current handles.
    pub fn context(
        &self,
        app: Rc<App<R>>,
        update_source: Option<UpdateSource>,
    ) -> UpdateContext<R> {
        self.inner.stage.resolve(app, update_source)
    }

    /// Run one update cycle: schedule the next one, then before hooks,
    /// render, after hooks.
    ///
    /// On error the remainder of this cycle is skipped; the next cycle is
    /// still scheduled.
    pub fn run_update_cycle(&self, ctx: &UpdateContext<R>) -> Result<(), CycleError> {
        LoopInner::run_cycle(&self.inner, ctx)
    }

    pub fn on_before_render(&self, hook: Hook<UpdateContext<R>>, at: Position) {
        self.inner.before.borrow_mut().register(hook, at);
    }

    /// Remove the first registration of `hook`. No-op if absent.
    pub fn off_before_render(&self, hook: &Hook<UpdateContext<R>>) -> bool {
        self.inner.before.borrow_mut().unregister_by_reference(hook)
    }

    /// Remove the before hook at `index`. No-op if out of range.
    pub fn off_before_render_at(&self, index: usize) -> bool {
        self.inner.before.borrow_mut().unregister_by_index(index)
    }

    pub fn on_after_render(&self, hook: Hook<UpdateContext<R>>, at: Position) {
        self.inner.after.borrow_mut().register(hook, at);
    }

    /// Remove the first registration of `hook`. No-op if absent.
    pub fn off_after_render(&self, hook: &Hook<UpdateContext<R>>) -> bool {
        self.inner.after.borrow_mut().unregister_by_reference(hook)
    }

    /// Remove the after hook at `index`. No-op if out of range.
    pub fn off_after_render_at(&self, index: usize) -> bool {
        self.inner.after.borrow_mut().unregister_by_index(index)
    }

    pub fn before_hook_count(&self) -> usize {
        self.inner.before.borrow().len()
    }

    pub fn after_hook_count(&self) -> usize {
        self.inner.after.borrow().len()
    }

    /// Cancel the pending frame. Idempotent; the watch is unaffected.
    pub fn cancel_frame(&self) -> bool {
        self.inner.scheduler.cancel_frame()
    }

    /// Stop the update-source watch. Idempotent; a pending frame is
    /// unaffected. Reactive cycles run afterwards do not watch again.
    pub fn cancel_watch(&self) -> bool {
        self.inner.scheduler.cancel_watch()
    }

    /// Let the next reactive cycle establish a watch after
    /// [`cancel_watch`](Self::cancel_watch).
    pub fn rearm_watch(&self) -> bool {
        self.inner.scheduler.rearm_watch()
    }

    pub fn is_frame_pending(&self) -> bool {
        self.inner.scheduler.frames().is_scheduled()
    }

    pub fn is_watching(&self) -> bool {
        self.inner.scheduler.watcher().is_watching()
    }

    pub fn stats(&self) -> LoopStats {
        self.inner.stats.get()
    }
}

impl<R: RenderTarget> Clone for RenderLoop<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<R: RenderTarget> std::fmt::Debug for RenderLoop<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderLoop")
            .field("scheduler", &self.inner.scheduler)
            .field("stage", &self.inner.stage)
            .field("before_hooks", &self.before_hook_count())
            .field("after_hooks", &self.after_hook_count())
            .field("stats", &self.stats())
            .finish()
    }
}

impl<R: RenderTarget> LoopInner<R> {
    fn run_cycle(this: &Rc<Self>, ctx: &UpdateContext<R>) -> Result<(), CycleError> {
        let mode = ctx.mode();
        let _span = tracing::trace_span!("update_cycle", ?mode).entered();
        this.bump(|s| s.cycles += 1);

        match &ctx.update_source {
            Some(source) => {
                let weak = Rc::downgrade(this);
                let app = Rc::clone(&ctx.app);
                let watched = Rc::clone(source);
                let on_change = Rc::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        let source = Some(Rc::clone(&watched));
                        Self::request_update(&inner, Rc::clone(&app), source);
                    }
                });
                this.scheduler.watcher().ensure_watching(source, on_change);
            }
            None => Self::request_update(this, Rc::clone(&ctx.app), None),
        }

        let result = this.run_phases(ctx);
        if result.is_err() {
            this.bump(|s| s.aborted_cycles += 1);
        }
        result
    }

    /// Queue the next cycle. The context is rebuilt from the stage when the
    /// frame fires.
    fn request_update(this: &Rc<Self>, app: Rc<App<R>>, update_source: Option<UpdateSource>) {
        let weak = Rc::downgrade(this);
        this.scheduler.frames().schedule_next(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let ctx = inner.stage.resolve(app, update_source);
            if let Err(err) = Self::run_cycle(&inner, &ctx) {
                tracing::error!(error = %err, "update cycle aborted");
            }
        }));
    }

    fn run_phases(&self, ctx: &UpdateContext<R>) -> Result<(), CycleError> {
        let before = self.before.borrow().clone();
        before
            .invoke_all(ctx)
            .map_err(|failure| CycleError::Hook {
                phase: Phase::BeforeRender,
                failure,
            })?;

        match (&ctx.renderer, &ctx.scene, &ctx.camera) {
            (Some(renderer), Some(scene), Some(camera)) => {
                if let Some(custom) = ctx.app.custom_render() {
                    self.bump(|s| s.custom_renders += 1);
                    custom(ctx)?;
                } else {
                    self.bump(|s| s.renders += 1);
                    renderer.render(scene, camera)?;
                }
            }
            _ => {
                tracing::trace!("render skipped: renderer, scene or camera missing");
                self.bump(|s| s.skipped_renders += 1);
            }
        }

        let after = self.after.borrow().clone();
        after
            .invoke_all(ctx)
            .map_err(|failure| CycleError::Hook {
                phase: Phase::AfterRender,
                failure,
            })?;
        Ok(())
    }

    fn bump(&self, f: impl FnOnce(&mut LoopStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoopConfig, SourceChangePolicy};
    use glam::Vec3;
    use tempo_hooks::hook;
    use tempo_host::{LocalHost, Reactive};
    use tempo_render::{DebugCamera, DebugScene, DebugTextRenderer};

    type Target = DebugTextRenderer;
    type Ctx = UpdateContext<Target>;
    type Log = Rc<RefCell<Vec<String>>>;

    struct Fixture {
        host: LocalHost,
        renderer: Rc<DebugTextRenderer>,
        app: Rc<App<Target>>,
        render_loop: RenderLoop<Target>,
    }

    fn fixture() -> Fixture {
        fixture_with(LoopConfig::default())
    }

    fn fixture_with(config: LoopConfig) -> Fixture {
        let host = LocalHost::new();
        let renderer = Rc::new(DebugTextRenderer::new());
        let stage = Stage::new();
        stage.set_renderer(Some(renderer.clone()));
        stage.set_scene(Some(Rc::new(
            DebugScene::new("test").with_object("cube", Vec3::ZERO),
        )));
        stage.set_camera(Some(Rc::new(DebugCamera::default())));
        let render_loop = RenderLoop::new(Scheduler::from_host(&host).with_config(&config), stage);
        Fixture {
            host,
            renderer,
            app: Rc::new(App::new("test")),
            render_loop,
        }
    }

    impl Fixture {
        fn continuous(&self) -> Ctx {
            self.render_loop.context(self.app.clone(), None)
        }

        fn reactive(&self, source: UpdateSource) -> Ctx {
            self.render_loop.context(self.app.clone(), Some(source))
        }
    }

    fn logging(log: &Log, name: &'static str) -> Hook<Ctx> {
        let log = log.clone();
        hook(move |_: &Ctx| {
            log.borrow_mut().push(name.to_string());
            Ok(())
        })
    }

    #[test]
    fn continuous_mode_schedules_one_frame_per_cycle() {
        let f = fixture();
        f.render_loop.run_update_cycle(&f.continuous()).unwrap();
        assert_eq!(f.renderer.frame_count(), 1);
        assert_eq!(f.host.pending_frames(), 1);

        for n in 2..=5 {
            assert_eq!(f.host.run_frame(), 1);
            assert_eq!(f.renderer.frame_count(), n);
            assert_eq!(f.host.pending_frames(), 1, "at most one outstanding frame");
        }
        assert_eq!(f.render_loop.stats().cycles, 5);
        assert_eq!(f.render_loop.stats().renders, 5);
    }

    #[test]
    fn manual_cycles_replace_the_pending_frame() {
        let f = fixture();
        let ctx = f.continuous();
        f.render_loop.run_update_cycle(&ctx).unwrap();
        f.render_loop.run_update_cycle(&ctx).unwrap();
        f.render_loop.run_update_cycle(&ctx).unwrap();
        assert_eq!(f.host.pending_frames(), 1);

        assert_eq!(f.host.run_frame(), 1);
        assert_eq!(f.renderer.frame_count(), 4);
    }

    #[test]
    fn reactive_mode_renders_only_after_mutation() {
        let f = fixture();
        let state = Reactive::new(0);
        let unrelated = Reactive::new(0);

        f.render_loop
            .run_update_cycle(&f.reactive(state.as_source()))
            .unwrap();
        assert_eq!(f.renderer.frame_count(), 1);
        assert!(f.render_loop.is_watching());
        assert_eq!(f.host.pending_frames(), 0);

        f.host.run_frames(5);
        unrelated.set(1);
        f.host.run_frames(2);
        assert_eq!(f.renderer.frame_count(), 1);

        state.set(1);
        state.set(2);
        f.host.flush();
        assert_eq!(f.host.pending_frames(), 1);
        f.host.run_frame();
        assert_eq!(f.renderer.frame_count(), 2);
        assert_eq!(f.host.pending_frames(), 0);

        f.host.run_frames(3);
        assert_eq!(f.renderer.frame_count(), 2);
        assert_eq!(state.listener_count(), 1, "watch established once");
    }

    #[test]
    fn reactive_mode_follows_nested_state() {
        let f = fixture();
        let camera_target = Reactive::new(Vec3::ZERO);
        let scene_state = Reactive::new("scene");
        scene_state.nest(&camera_target.as_source());

        f.render_loop
            .run_update_cycle(&f.reactive(scene_state.as_source()))
            .unwrap();
        camera_target.set(Vec3::ONE);
        f.host.run_frame();
        f.host.run_frame();
        assert_eq!(f.renderer.frame_count(), 2);
    }

    #[test]
    fn hooks_wrap_the_render_in_order() {
        let f = fixture();
        let log: Log = Rc::default();
        f.render_loop.on_before_render(logging(&log, "before-a"), Position::End);
        f.render_loop.on_before_render(logging(&log, "before-b"), Position::At(0));
        f.render_loop.on_after_render(logging(&log, "after"), Position::End);
        let l = log.clone();
        f.app.set_custom_render(move |_| {
            l.borrow_mut().push("render".to_string());
            Ok(())
        });

        f.render_loop.run_update_cycle(&f.continuous()).unwrap();
        assert_eq!(*log.borrow(), ["before-b", "before-a", "render", "after"]);
    }

    #[test]
    fn default_render_receives_resolved_handles() {
        let f = fixture();
        let moved = DebugCamera {
            eye: Vec3::new(1.0, 2.0, 3.0),
            ..DebugCamera::default()
        };

        f.render_loop.run_update_cycle(&f.continuous()).unwrap();
        f.render_loop.stage().set_camera(Some(Rc::new(moved)));
        f.host.run_frame();

        let frames = f.renderer.take_frames();
        assert_eq!(frames.len(), 2);
        assert!(frames[0].contains("eye=(0.0, 10.0, 10.0)"));
        assert!(frames[1].contains("eye=(1.0, 2.0, 3.0)"));
        assert!(frames[1].contains("[test] (1 objects)"));
    }

    #[test]
    fn custom_render_replaces_default_path() {
        let f = fixture();
        let seen = Rc::new(Cell::new(0));
        let s = seen.clone();
        f.app.set_custom_render(move |ctx: &Ctx| {
            assert!(ctx.can_render());
            assert_eq!(ctx.app.name(), "test");
            s.set(s.get() + 1);
            Ok(())
        });

        f.render_loop.run_update_cycle(&f.continuous()).unwrap();
        f.host.run_frames(2);
        assert_eq!(seen.get(), 3);
        assert_eq!(f.renderer.frame_count(), 0);
        assert_eq!(f.render_loop.stats().custom_renders, 3);
        assert_eq!(f.render_loop.stats().renders, 0);
    }

    #[test]
    fn missing_handles_skip_render_but_run_hooks() {
        let f = fixture();
        f.render_loop.stage().set_camera(None);
        let log: Log = Rc::default();
        f.render_loop.on_before_render(logging(&log, "before"), Position::End);
        f.render_loop.on_after_render(logging(&log, "after"), Position::End);
        let custom_calls = Rc::new(Cell::new(0));
        let c = custom_calls.clone();
        f.app.set_custom_render(move |_| {
            c.set(c.get() + 1);
            Ok(())
        });

        f.render_loop.run_update_cycle(&f.continuous()).unwrap();
        assert_eq!(*log.borrow(), ["before", "after"]);
        assert_eq!(custom_calls.get(), 0);
        assert_eq!(f.renderer.frame_count(), 0);
        assert_eq!(f.render_loop.stats().skipped_renders, 1);
    }

    #[test]
    fn failing_hook_aborts_cycle_but_not_the_next_one() {
        let f = fixture();
        let log: Log = Rc::default();
        let failed_once = Rc::new(Cell::new(false));
        let flag = failed_once.clone();
        f.render_loop.on_before_render(
            hook(move |_: &Ctx| {
                if flag.replace(true) {
                    Ok(())
                } else {
                    Err("first frame fails".into())
                }
            }),
            Position::End,
        );
        f.render_loop.on_before_render(logging(&log, "later-before"), Position::End);
        f.render_loop.on_after_render(logging(&log, "after"), Position::End);

        let err = f.render_loop.run_update_cycle(&f.continuous()).unwrap_err();
        assert!(matches!(
            err,
            CycleError::Hook {
                phase: Phase::BeforeRender,
                ..
            }
        ));
        assert!(err.to_string().contains("first frame fails"));
        assert!(log.borrow().is_empty());
        assert_eq!(f.renderer.frame_count(), 0);
        assert_eq!(f.host.pending_frames(), 1);

        f.host.run_frame();
        assert_eq!(*log.borrow(), ["later-before", "after"]);
        assert_eq!(f.renderer.frame_count(), 1);
        assert_eq!(f.render_loop.stats().aborted_cycles, 1);
    }

    #[test]
    fn errors_inside_scheduled_frames_do_not_stop_the_loop() {
        let f = fixture();
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        f.render_loop.on_after_render(
            hook(move |_: &Ctx| {
                c.set(c.get() + 1);
                if c.get() == 2 {
                    Err("second frame fails".into())
                } else {
                    Ok(())
                }
            }),
            Position::End,
        );

        f.render_loop.run_update_cycle(&f.continuous()).unwrap();
        f.host.run_frames(3);
        assert_eq!(calls.get(), 4);
        assert_eq!(f.renderer.frame_count(), 4);
        assert_eq!(f.render_loop.stats().aborted_cycles, 1);
        assert_eq!(f.host.pending_frames(), 1);
    }

    #[test]
    fn render_failure_skips_after_hooks() {
        let f = fixture();
        let log: Log = Rc::default();
        f.render_loop.on_after_render(logging(&log, "after"), Position::End);
        f.renderer.set_lost(true);

        let err = f.render_loop.run_update_cycle(&f.continuous()).unwrap_err();
        assert!(matches!(err, CycleError::Render(RenderError::TargetLost(_))));
        assert!(log.borrow().is_empty());

        f.renderer.set_lost(false);
        f.host.run_frame();
        assert_eq!(*log.borrow(), ["after"]);
    }

    #[test]
    fn hook_can_unregister_itself_mid_pass() {
        let f = fixture();
        let log: Log = Rc::default();
        let slot: Rc<RefCell<Option<Hook<Ctx>>>> = Rc::default();

        let render_loop = f.render_loop.clone();
        let own = slot.clone();
        let l = log.clone();
        let once = hook(move |_: &Ctx| {
            l.borrow_mut().push("once".to_string());
            if let Some(me) = own.borrow_mut().take() {
                render_loop.off_before_render(&me);
            }
            Ok(())
        });
        *slot.borrow_mut() = Some(once.clone());

        f.render_loop.on_before_render(once, Position::End);
        f.render_loop.on_before_render(logging(&log, "next"), Position::End);

        f.render_loop.run_update_cycle(&f.continuous()).unwrap();
        assert_eq!(*log.borrow(), ["once", "next"]);
        assert_eq!(f.render_loop.before_hook_count(), 1);

        f.host.run_frame();
        assert_eq!(*log.borrow(), ["once", "next", "next"]);
    }

    #[test]
    fn hook_registry_api_on_loop() {
        let f = fixture();
        let log: Log = Rc::default();
        let a = logging(&log, "a");
        let b = logging(&log, "b");
        f.render_loop.on_before_render(a.clone(), Position::End);
        f.render_loop.on_before_render(b.clone(), Position::At(0));

        assert!(f.render_loop.off_before_render(&a));
        assert!(!f.render_loop.off_before_render(&a));
        assert!(!f.render_loop.off_before_render_at(3));
        assert_eq!(f.render_loop.before_hook_count(), 1);

        f.render_loop.on_after_render(a.clone(), Position::End);
        assert!(f.render_loop.off_after_render_at(0));
        assert!(!f.render_loop.off_after_render(&a));
        assert_eq!(f.render_loop.after_hook_count(), 0);

        f.render_loop.run_update_cycle(&f.continuous()).unwrap();
        assert_eq!(*log.borrow(), ["b"]);
    }

    #[test]
    fn cancels_are_idempotent_and_independent() {
        let f = fixture();
        assert!(!f.render_loop.cancel_frame());
        assert!(!f.render_loop.cancel_watch());

        let state = Reactive::new(0);
        f.render_loop
            .run_update_cycle(&f.reactive(state.as_source()))
            .unwrap();
        state.set(1);
        f.host.flush();
        assert!(f.render_loop.is_frame_pending());

        assert!(f.render_loop.cancel_watch());
        assert!(!f.render_loop.cancel_watch());
        assert!(f.render_loop.is_frame_pending(), "watch cancel keeps the frame");

        f.host.run_frame();
        assert_eq!(f.renderer.frame_count(), 2);
        assert!(!f.render_loop.is_watching(), "queued cycle does not re-watch");

        state.set(2);
        f.host.run_frames(2);
        assert_eq!(f.renderer.frame_count(), 2);
    }

    #[test]
    fn cancelled_watch_stays_down_across_cycles() {
        let f = fixture();
        let state = Reactive::new(0);
        let ctx = f.reactive(state.as_source());

        f.render_loop.run_update_cycle(&ctx).unwrap();
        assert!(f.render_loop.cancel_watch());
        f.render_loop.run_update_cycle(&ctx).unwrap();
        assert!(!f.render_loop.is_watching());
        assert_eq!(state.listener_count(), 0);

        state.set(1);
        f.host.run_frames(2);
        assert_eq!(f.renderer.frame_count(), 2);

        assert!(f.render_loop.rearm_watch());
        f.render_loop.run_update_cycle(&ctx).unwrap();
        assert!(f.render_loop.is_watching());
        state.set(2);
        f.host.run_frames(2);
        assert_eq!(f.renderer.frame_count(), 4);
    }

    #[test]
    fn cancel_frame_halts_continuous_loop() {
        let f = fixture();
        f.render_loop.run_update_cycle(&f.continuous()).unwrap();
        assert!(f.render_loop.cancel_frame());
        assert!(!f.render_loop.cancel_frame());

        f.host.run_frames(3);
        assert_eq!(f.renderer.frame_count(), 1);
        assert!(!f.render_loop.is_frame_pending());
    }

    #[test]
    fn hook_can_stop_the_loop_from_inside() {
        let f = fixture();
        let render_loop = f.render_loop.clone();
        f.render_loop.on_after_render(
            hook(move |_: &Ctx| {
                render_loop.cancel_frame();
                Ok(())
            }),
            Position::End,
        );

        f.render_loop.run_update_cycle(&f.continuous()).unwrap();
        assert_eq!(f.host.pending_frames(), 0);
    }

    #[test]
    fn keep_first_policy_ignores_second_source() {
        let f = fixture();
        let first = Reactive::new(0);
        let second = Reactive::new(0);
        f.render_loop
            .run_update_cycle(&f.reactive(first.as_source()))
            .unwrap();
        f.render_loop
            .run_update_cycle(&f.reactive(second.as_source()))
            .unwrap();

        second.set(1);
        f.host.run_frame();
        assert_eq!(f.renderer.frame_count(), 2);

        first.set(1);
        f.host.run_frames(2);
        assert_eq!(f.renderer.frame_count(), 3);
    }

    #[test]
    fn rewatch_policy_follows_second_source() {
        let f = fixture_with(LoopConfig {
            source_change: SourceChangePolicy::Rewatch,
        });
        let first = Reactive::new(0);
        let second = Reactive::new(0);
        f.render_loop
            .run_update_cycle(&f.reactive(first.as_source()))
            .unwrap();
        f.render_loop
            .run_update_cycle(&f.reactive(second.as_source()))
            .unwrap();

        first.set(1);
        f.host.run_frames(2);
        assert_eq!(f.renderer.frame_count(), 2);

        second.set(1);
        f.host.run_frames(2);
        assert_eq!(f.renderer.frame_count(), 3);
    }

    #[test]
    fn dropped_loop_stops_scheduling() {
        let f = fixture();
        f.render_loop.run_update_cycle(&f.continuous()).unwrap();
        let Fixture {
            host,
            renderer,
            render_loop,
            ..
        } = f;
        drop(render_loop);

        assert_eq!(host.pending_frames(), 0);
        host.run_frames(2);
        assert_eq!(renderer.frame_count(), 1);
    }
}
