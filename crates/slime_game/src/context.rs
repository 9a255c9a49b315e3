//! Services shared by every scene, passed explicitly each frame.

use std::path::PathBuf;

use glam::Vec2;
use slime_core::input::InputState;
use slime_core::random::RandomSource;

use crate::config::GameConfig;
use crate::content::ImageProvider;

pub struct EngineContext {
    pub input: InputState,
    pub images: Box<dyn ImageProvider>,
    pub rng: Box<dyn RandomSource>,
    pub config: GameConfig,
}

impl EngineContext {
    pub fn new(
        config: GameConfig,
        images: Box<dyn ImageProvider>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            input: InputState::new(),
            images,
            rng,
            config,
        }
    }

    pub fn screen_size(&self) -> Vec2 {
        self.config.screen_size()
    }

    pub fn content_path(&self, relative: &str) -> PathBuf {
        self.config.content_path(relative)
    }
}
