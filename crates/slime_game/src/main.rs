//! Headless runner: plays a recorded input replay through the scene stack.
//!
//! Each replay entry is one frame. The frame clock is fed exactly one fixed
//! step per frame, so a run is reproducible whenever `rng_seed` is set in the
//! config. Draw calls go to a recording renderer and are only counted.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use slime_core::random::{seeded, RandomSource};
use slime_core::time::TimeState;

use slime_game::config::load_config_from_path;
use slime_game::content::FileImageProvider;
use slime_game::context::EngineContext;
use slime_game::error::LoadError;
use slime_game::render::RecordingRenderer;
use slime_game::replay::load_replay_from_path;
use slime_game::scene::{GameScene, SceneManager, TitleScene};

const CONFIG_PATH: &str = "assets/game.json";
const DEFAULT_REPLAY_PATH: &str = "assets/replays/demo.json";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Dungeon Slime starting...");

    let replay_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPLAY_PATH));

    match run(Path::new(CONFIG_PATH), &replay_path) {
        Ok(score) => {
            log::info!("Replay finished, final score {score}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &Path, replay_path: &Path) -> Result<u32, LoadError> {
    let config = load_config_from_path(config_path)?;
    let replay = load_replay_from_path(replay_path)?;

    let rng: Box<dyn RandomSource> = match config.rng_seed {
        Some(seed) => {
            log::info!("Using rng seed {seed}");
            Box::new(seeded(seed))
        }
        None => Box::new(fastrand::Rng::new()),
    };
    let images = Box::new(FileImageProvider::new(config.content_root.clone()));
    let mut ctx = EngineContext::new(config, images, rng);

    let mut scenes = SceneManager::new();
    scenes.change_scene(Box::new(TitleScene::new()));

    let mut time = TimeState::with_fixed_dt(replay.fixed_dt_us);
    let mut renderer = RecordingRenderer::new();
    let mut score = 0;

    for snapshot in replay.expanded_inputs() {
        ctx.input.apply_snapshot(&snapshot.controls, snapshot.stick);

        time.begin_frame(replay.fixed_dt_us);
        while time.should_step() {
            scenes.update(&mut ctx, time.fixed_dt_us)?;
        }
        if time.steps_this_frame > 0 {
            ctx.input.end_frame();
        }

        renderer.clear();
        scenes.draw(&mut renderer);
        log::trace!(
            "frame {}: {} draw calls, {} texture binds",
            time.frame_count,
            renderer.calls.len(),
            renderer.texture_binds()
        );

        if let Some(game) = scenes.active_as::<GameScene>() {
            score = game.score();
        }
    }

    log::info!(
        "Ran {} frames ({} fixed steps, {:.2}s simulated)",
        time.frame_count,
        time.fixed_step_count,
        time.total_time_us as f64 / 1_000_000.0
    );
    Ok(score)
}
