use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::Deserialize;

use crate::controller::MotionConfig;
use crate::error::LoadError;

/// Game settings read from `game.json`. Every field is optional in the file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GameConfig {
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,
    #[serde(default = "default_atlas_path")]
    pub atlas_path: String,
    #[serde(default = "default_tilemap_path")]
    pub tilemap_path: String,
    #[serde(default = "default_content_root")]
    pub content_root: PathBuf,
    #[serde(default = "default_scale")]
    pub sprite_scale: f32,
    #[serde(default = "default_scale")]
    pub tile_scale: f32,
    #[serde(default = "default_movement_speed")]
    pub movement_speed: f32,
    #[serde(default = "default_boost_multiplier")]
    pub boost_multiplier: f32,
    /// Absent means seed from entropy.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            atlas_path: default_atlas_path(),
            tilemap_path: default_tilemap_path(),
            content_root: default_content_root(),
            sprite_scale: default_scale(),
            tile_scale: default_scale(),
            movement_speed: default_movement_speed(),
            boost_multiplier: default_boost_multiplier(),
            rng_seed: None,
        }
    }
}

impl GameConfig {
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width as f32, self.screen_height as f32)
    }

    pub fn motion(&self) -> MotionConfig {
        MotionConfig {
            speed: self.movement_speed,
            boost_multiplier: self.boost_multiplier,
        }
    }

    /// Resolve a description path against the content root.
    pub fn content_path(&self, relative: &str) -> PathBuf {
        self.content_root.join(relative)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, LoadError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!(
                "Config file '{}' not found, using defaults",
                path.display()
            );
            return Ok(GameConfig::default());
        }
        Err(e) => return Err(LoadError::io(&path.display().to_string(), e)),
    };
    let config = parse_config(&raw)
        .map_err(|err| LoadError::malformed(format!("{}: {err}", path.display())))?;
    log::info!(
        "Loaded config '{}' ({}x{}, content root '{}')",
        path.display(),
        config.screen_width,
        config.screen_height,
        config.content_root.display()
    );
    Ok(config)
}

fn parse_config(raw: &str) -> Result<GameConfig, String> {
    let config: GameConfig =
        serde_json::from_str(raw).map_err(|e| format!("config JSON: {e}"))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.screen_width == 0 || config.screen_height == 0 {
        return Err("screen size must be > 0".to_string());
    }
    for (name, value) in [
        ("sprite_scale", config.sprite_scale),
        ("tile_scale", config.tile_scale),
        ("movement_speed", config.movement_speed),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(format!("{name} must be > 0"));
        }
    }
    if !(config.boost_multiplier.is_finite() && config.boost_multiplier >= 1.0) {
        return Err("boost_multiplier must be >= 1".to_string());
    }
    if config.atlas_path.trim().is_empty() || config.tilemap_path.trim().is_empty() {
        return Err("atlas_path and tilemap_path must not be empty".to_string());
    }
    Ok(())
}

const fn default_screen_width() -> u32 {
    1280
}

const fn default_screen_height() -> u32 {
    720
}

fn default_atlas_path() -> String {
    "images/atlas-definition.json".to_string()
}

fn default_tilemap_path() -> String {
    "images/tilemap-definition.json".to_string()
}

fn default_content_root() -> PathBuf {
    PathBuf::from("assets")
}

const fn default_scale() -> f32 {
    4.0
}

const fn default_movement_speed() -> f32 {
    5.0
}

const fn default_boost_multiplier() -> f32 {
    1.5
}
