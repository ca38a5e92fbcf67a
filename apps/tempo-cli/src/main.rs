use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use glam::Vec3;
use serde::Deserialize;
use tempo_hooks::{Position, hook};
use tempo_host::{LocalHost, Reactive};
use tempo_render::{DebugCamera, DebugScene, DebugTextRenderer};
use tempo_schedule::{
    App, LoopConfig, RenderLoop, Scheduler, Stage, UpdateContext, load_config,
};
use tracing_subscriber::EnvFilter;

type Ctx = UpdateContext<DebugTextRenderer>;

#[derive(Parser)]
#[command(name = "tempo-cli", about = "Render loop scheduling demos")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Run settings (.yaml, .yml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Render on every frame
    Continuous {
        /// Number of frames to run after the first cycle
        #[arg(short, long)]
        frames: Option<usize>,
    },
    /// Render only after the watched state changes
    Reactive {
        /// Number of state mutations
        #[arg(short, long)]
        mutations: Option<usize>,
        /// Frames to run between mutations
        #[arg(short, long)]
        idle_frames: Option<usize>,
    },
}

/// Settings file contents. Command-line flags take precedence.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RunConfig {
    frames: usize,
    mutations: usize,
    idle_frames: usize,
    #[serde(rename = "loop")]
    loop_config: LoopConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 5,
            mutations: 3,
            idle_frames: 2,
            loop_config: LoopConfig::default(),
        }
    }
}

struct Demo {
    host: LocalHost,
    renderer: Rc<DebugTextRenderer>,
    app: Rc<App<DebugTextRenderer>>,
    render_loop: RenderLoop<DebugTextRenderer>,
}

impl Demo {
    fn new(config: &LoopConfig) -> Self {
        let host = LocalHost::new();
        let renderer = Rc::new(DebugTextRenderer::new());

        let stage = Stage::new();
        stage.set_renderer(Some(renderer.clone()));
        stage.set_scene(Some(Rc::new(
            DebugScene::new("demo")
                .with_object("ground", Vec3::ZERO)
                .with_object("cube", Vec3::new(0.0, 1.0, 0.0))
                .with_object("light", Vec3::new(4.0, 8.0, 2.0)),
        )));
        stage.set_camera(Some(Rc::new(DebugCamera::default())));

        let render_loop = RenderLoop::new(Scheduler::from_host(&host).with_config(config), stage);
        render_loop.on_before_render(
            hook(|ctx: &Ctx| {
                tracing::debug!(mode = ?ctx.mode(), "before render");
                Ok(())
            }),
            Position::End,
        );
        render_loop.on_after_render(
            hook(|_: &Ctx| {
                tracing::debug!("after render");
                Ok(())
            }),
            Position::End,
        );

        Self {
            host,
            renderer,
            app: Rc::new(App::new("tempo-cli")),
            render_loop,
        }
    }

    fn start(&self, ctx: &Ctx) -> anyhow::Result<()> {
        self.render_loop
            .run_update_cycle(ctx)
            .map_err(|err| anyhow::anyhow!("first update cycle failed: {err}"))
    }

    fn finish(&self) -> anyhow::Result<()> {
        println!("Frames run: {}", self.host.frame_index());
        println!("Renders: {}", self.renderer.frame_count());
        if let Some(frame) = self.renderer.last_frame() {
            print!("{frame}");
        }
        println!("Stats: {}", serde_json::to_string(&self.render_loop.stats())?);

        self.render_loop.cancel_frame();
        self.render_loop.cancel_watch();
        println!(
            "Shutdown: frame_pending={}, watching={}",
            self.render_loop.is_frame_pending(),
            self.render_loop.is_watching()
        );
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let run: RunConfig = match &cli.config {
        Some(path) => load_config(path)?,
        None => RunConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("tempo-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", tempo_common::crate_info());
            println!("hooks: {}", tempo_hooks::crate_info());
            println!("host: {}", tempo_host::crate_info());
            println!("render: {}", tempo_render::crate_info());
            println!("schedule: {}", tempo_schedule::crate_info());
            println!("source change policy: {:?}", run.loop_config.source_change);
        }
        Commands::Continuous { frames } => {
            let frames = frames.unwrap_or(run.frames);
            println!("Continuous mode: frames={frames}");

            let demo = Demo::new(&run.loop_config);
            demo.start(&demo.render_loop.context(demo.app.clone(), None))?;
            demo.host.run_frames(frames);
            demo.finish()?;
        }
        Commands::Reactive {
            mutations,
            idle_frames,
        } => {
            let mutations = mutations.unwrap_or(run.mutations);
            let idle_frames = idle_frames.unwrap_or(run.idle_frames);
            println!("Reactive mode: mutations={mutations}, idle_frames={idle_frames}");

            let target = Reactive::new(Vec3::ZERO);
            let scene_state = Reactive::new(String::from("demo"));
            scene_state.nest(&target.as_source());

            let demo = Demo::new(&run.loop_config);
            let ctx = demo
                .render_loop
                .context(demo.app.clone(), Some(scene_state.as_source()));
            demo.start(&ctx)?;
            demo.host.run_frames(idle_frames);
            println!("Idle: renders={}", demo.renderer.frame_count());

            for i in 0..mutations {
                let look_at = Vec3::new(i as f32 + 1.0, 0.0, 0.0);
                demo.render_loop.stage().set_camera(Some(Rc::new(DebugCamera {
                    target: look_at,
                    ..DebugCamera::default()
                })));
                target.set(look_at);
                demo.host.flush();
                demo.host.run_frames(1 + idle_frames);
                println!(
                    "Mutation {}: target={look_at}, renders={}",
                    i + 1,
                    demo.renderer.frame_count()
                );
            }
            demo.finish()?;
        }
    }

    Ok(())
}
