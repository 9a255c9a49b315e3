//! Texture atlas loading and name lookup.
//!
//! An atlas description is a JSON file naming one source image, a list of
//! named pixel regions within it, and a list of named animations whose
//! frames reference those regions by name:
//!
//! ```json
//! {
//!   "texture": "images/atlas.png",
//!   "regions": [ { "name": "slime-1", "x": 0, "y": 0, "width": 20, "height": 20 } ],
//!   "animations": [ { "name": "slime", "delay": 200, "frames": ["slime-1"] } ]
//! }
//! ```
//!
//! Loading parses into private JSON types first, then validates and converts
//! into [`TextureAtlas`]. Any failure aborts the whole load.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::animation::Animation;
use crate::content::{ImageHandle, ImageProvider};
use crate::error::LoadError;
use crate::region::TextureRegion;
use crate::sprite::{AnimatedSprite, Sprite};

#[derive(Debug, Clone)]
pub struct TextureAtlas {
    image: ImageHandle,
    regions: HashMap<String, TextureRegion>,
    animations: HashMap<String, Rc<Animation>>,
}

impl TextureAtlas {
    pub fn new(image: ImageHandle) -> Self {
        Self {
            image,
            regions: HashMap::new(),
            animations: HashMap::new(),
        }
    }

    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    pub fn add_region(
        &mut self,
        name: &str,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<(), LoadError> {
        if self.regions.contains_key(name) {
            return Err(LoadError::DuplicateName {
                kind: "region",
                name: name.to_string(),
            });
        }
        let region = TextureRegion::new(name, &self.image, x, y, width, height)?;
        self.regions.insert(name.to_string(), region);
        Ok(())
    }

    pub fn region(&self, name: &str) -> Result<&TextureRegion, LoadError> {
        self.regions.get(name).ok_or_else(|| LoadError::MissingReference {
            kind: "region",
            name: name.to_string(),
        })
    }

    pub fn remove_region(&mut self, name: &str) -> bool {
        self.regions.remove(name).is_some()
    }

    pub fn add_animation(&mut self, name: &str, animation: Animation) -> Result<(), LoadError> {
        if self.animations.contains_key(name) {
            return Err(LoadError::DuplicateName {
                kind: "animation",
                name: name.to_string(),
            });
        }
        self.animations.insert(name.to_string(), Rc::new(animation));
        Ok(())
    }

    pub fn animation(&self, name: &str) -> Result<Rc<Animation>, LoadError> {
        self.animations
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::MissingReference {
                kind: "animation",
                name: name.to_string(),
            })
    }

    pub fn remove_animation(&mut self, name: &str) -> bool {
        self.animations.remove(name).is_some()
    }

    /// Drop every region and animation. The image handle is kept.
    pub fn clear(&mut self) {
        self.regions.clear();
        self.animations.clear();
    }

    pub fn create_sprite(&self, region_name: &str) -> Result<Sprite, LoadError> {
        Ok(Sprite::new(self.region(region_name)?.clone()))
    }

    pub fn create_animated_sprite(&self, animation_name: &str) -> Result<AnimatedSprite, LoadError> {
        Ok(AnimatedSprite::new(self.animation(animation_name)?))
    }

    /// Sorted, for stable comparisons and log output.
    pub fn region_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.regions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn animation_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.animations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }
}

// --- JSON deserialization types (private) ---

#[derive(Debug, Deserialize)]
struct AtlasFileJson {
    texture: Option<String>,
    #[serde(default)]
    regions: Vec<RegionJson>,
    #[serde(default)]
    animations: Vec<AnimationJson>,
}

#[derive(Debug, Deserialize)]
struct RegionJson {
    name: Option<String>,
    #[serde(default)]
    x: u32,
    #[serde(default)]
    y: u32,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

#[derive(Debug, Deserialize)]
struct AnimationJson {
    name: Option<String>,
    delay: Option<f64>,
    #[serde(default)]
    frames: Vec<String>,
}

pub fn load_atlas_from_path(
    path: &Path,
    images: &mut dyn ImageProvider,
) -> Result<TextureAtlas, LoadError> {
    let raw = fs::read_to_string(path).map_err(|e| LoadError::io(&path.display().to_string(), e))?;
    let atlas = load_atlas_from_str(&raw, images).map_err(|err| match err {
        LoadError::MalformedDescription(message) => {
            LoadError::malformed(format!("{}: {message}", path.display()))
        }
        other => other,
    })?;
    log::info!(
        "Loaded atlas '{}' ({} regions, {} animations)",
        path.display(),
        atlas.region_count(),
        atlas.animation_count()
    );
    Ok(atlas)
}

pub fn load_atlas_from_str(
    raw: &str,
    images: &mut dyn ImageProvider,
) -> Result<TextureAtlas, LoadError> {
    let json: AtlasFileJson = serde_json::from_str(raw)
        .map_err(|e| LoadError::malformed(format!("atlas description: {e}")))?;

    let texture_path = json
        .texture
        .as_deref()
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .ok_or_else(|| LoadError::malformed("atlas description has no texture path"))?;
    let image = images.load_image(texture_path)?;
    let mut atlas = TextureAtlas::new(image);

    for (i, region) in json.regions.iter().enumerate() {
        let name = required_name(region.name.as_deref(), "region", i)?;
        atlas.add_region(name, region.x, region.y, region.width, region.height)?;
    }

    for (i, animation_json) in json.animations.iter().enumerate() {
        let name = required_name(animation_json.name.as_deref(), "animation", i)?;
        let frame_duration_us = delay_to_us(name, animation_json.delay)?;
        let frames = animation_json
            .frames
            .iter()
            .map(|region_name| atlas.region(region_name).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        let animation = Animation::new(frames, frame_duration_us).map_err(|err| match err {
            LoadError::MalformedDescription(message) => {
                LoadError::malformed(format!("animation '{name}': {message}"))
            }
            other => other,
        })?;
        atlas.add_animation(name, animation)?;
    }

    if atlas.animation_count() == 0 {
        log::warn!(
            "Atlas for '{}' defines no animations. This is allowed but often accidental.",
            atlas.image().path
        );
    }

    Ok(atlas)
}

fn required_name<'a>(
    name: Option<&'a str>,
    kind: &str,
    index: usize,
) -> Result<&'a str, LoadError> {
    name.filter(|n| !n.is_empty())
        .ok_or_else(|| LoadError::malformed(format!("{kind} #{index} has no name")))
}

fn delay_to_us(name: &str, delay_ms: Option<f64>) -> Result<u64, LoadError> {
    let delay_ms = delay_ms
        .ok_or_else(|| LoadError::malformed(format!("animation '{name}' has no delay")))?;
    if !delay_ms.is_finite() || delay_ms <= 0.0 {
        return Err(LoadError::malformed(format!(
            "animation '{name}' delay must be a positive number of milliseconds, got {delay_ms}"
        )));
    }
    let us = (delay_ms * 1000.0).round() as u64;
    Ok(us.max(1))
}
