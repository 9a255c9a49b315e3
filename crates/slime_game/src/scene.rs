//! Scene lifecycle and the two game scenes.
//!
//! A scene is initialised once (which loads its content), then receives
//! `update`/`draw` every frame until the [`SceneManager`] swaps it out.
//! Transitions requested during an update are applied at the start of the
//! next one, so a scene never tears itself down mid-frame.

use std::any::Any;

use glam::Vec2;
use slime_core::input::Control;

use crate::arena::{Arena, ArenaEvent, Body, MotionEngine};
use crate::atlas::load_atlas_from_path;
use crate::context::EngineContext;
use crate::controller::MoveIntent;
use crate::error::LoadError;
use crate::render::Renderer;
use crate::sprite::AnimatedSprite;
use crate::tilemap::{load_tilemap_from_path, Tilemap};

pub const PICKUP_SCORE: u32 = 100;

pub trait Scene {
    fn name(&self) -> &'static str;

    fn initialize(&mut self, ctx: &mut EngineContext) -> Result<(), LoadError> {
        self.load_content(ctx)
    }

    fn load_content(&mut self, _ctx: &mut EngineContext) -> Result<(), LoadError> {
        Ok(())
    }

    fn unload_content(&mut self) {}

    /// Advance one tick. Returning a scene requests a transition to it.
    fn update(&mut self, ctx: &mut EngineContext, dt_us: u64) -> Option<Box<dyn Scene>>;

    fn draw(&self, renderer: &mut dyn Renderer);

    fn as_any(&self) -> &dyn Any;
}

#[derive(Default)]
pub struct SceneManager {
    active: Option<Box<dyn Scene>>,
    pending: Option<Box<dyn Scene>>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `scene`; it replaces the active scene on the next update.
    pub fn change_scene(&mut self, scene: Box<dyn Scene>) {
        self.pending = Some(scene);
    }

    pub fn active_name(&self) -> Option<&'static str> {
        self.active.as_ref().map(|scene| scene.name())
    }

    pub fn active_as<T: 'static>(&self) -> Option<&T> {
        self.active
            .as_ref()
            .and_then(|scene| scene.as_any().downcast_ref::<T>())
    }

    pub fn update(&mut self, ctx: &mut EngineContext, dt_us: u64) -> Result<(), LoadError> {
        if let Some(next) = self.pending.take() {
            self.transition(ctx, next)?;
        }
        if let Some(scene) = self.active.as_mut() {
            if let Some(next) = scene.update(ctx, dt_us) {
                self.pending = Some(next);
            }
        }
        Ok(())
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        if let Some(scene) = &self.active {
            scene.draw(renderer);
        }
    }

    fn transition(
        &mut self,
        ctx: &mut EngineContext,
        mut next: Box<dyn Scene>,
    ) -> Result<(), LoadError> {
        if let Some(mut previous) = self.active.take() {
            previous.unload_content();
            log::info!("Scene '{}' -> '{}'", previous.name(), next.name());
        } else {
            log::info!("Starting scene '{}'", next.name());
        }
        next.initialize(ctx)?;
        self.active = Some(next);
        Ok(())
    }
}

/// Waits for Confirm, then starts the game.
#[derive(Debug, Default)]
pub struct TitleScene {
    waited_us: u64,
}

impl TitleScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scene for TitleScene {
    fn name(&self) -> &'static str {
        "title"
    }

    fn update(&mut self, ctx: &mut EngineContext, dt_us: u64) -> Option<Box<dyn Scene>> {
        self.waited_us += dt_us;
        if ctx.input.is_just_pressed(Control::Confirm) {
            log::debug!("Title confirmed after {}ms", self.waited_us / 1000);
            return Some(Box::new(GameScene::new()));
        }
        None
    }

    // Title text is drawn by the host; there is nothing from the atlas here.
    fn draw(&self, _renderer: &mut dyn Renderer) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct World {
    tilemap: Tilemap,
    engine: MotionEngine,
    slime: AnimatedSprite,
    bat: AnimatedSprite,
    slime_body: Body,
    bat_body: Body,
}

#[derive(Default)]
pub struct GameScene {
    world: Option<World>,
    score: u32,
    paused: bool,
}

impl GameScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_loaded(&self) -> bool {
        self.world.is_some()
    }

    pub fn slime_position(&self) -> Option<Vec2> {
        self.world.as_ref().map(|world| world.slime_body.position)
    }

    pub fn bat_position(&self) -> Option<Vec2> {
        self.world.as_ref().map(|world| world.bat_body.position)
    }

    pub fn arena(&self) -> Option<Arena> {
        self.world.as_ref().map(|world| world.engine.arena)
    }
}

impl Scene for GameScene {
    fn name(&self) -> &'static str {
        "game"
    }

    fn load_content(&mut self, ctx: &mut EngineContext) -> Result<(), LoadError> {
        let config = ctx.config.clone();
        let atlas_path = ctx.content_path(&config.atlas_path);
        let tilemap_path = ctx.content_path(&config.tilemap_path);
        let atlas = load_atlas_from_path(&atlas_path, ctx.images.as_mut())?;
        let mut tilemap = load_tilemap_from_path(&tilemap_path, ctx.images.as_mut())?;
        tilemap.set_scale(Vec2::splat(config.tile_scale));

        let mut slime = atlas.create_animated_sprite("slime-animation")?;
        slime.set_scale(Vec2::splat(config.sprite_scale));
        let mut bat = atlas.create_animated_sprite("bat-animation")?;
        bat.set_scale(Vec2::splat(config.sprite_scale));

        let arena = Arena::from_tilemap(ctx.screen_size(), &tilemap)?;
        let engine = MotionEngine::new(arena, config.motion());

        let slime_body = Body::new(
            arena.cell_position(arena.center_cell()),
            Vec2::new(slime.width(), slime.height()),
        );
        let mut bat_body = Body::new(
            Vec2::new(arena.bounds().left(), arena.bounds().top()),
            Vec2::new(bat.width(), bat.height()),
        );
        bat_body.velocity = engine.spawn_velocity(ctx.rng.as_mut());

        self.world = Some(World {
            tilemap,
            engine,
            slime,
            bat,
            slime_body,
            bat_body,
        });
        self.score = 0;
        self.paused = false;
        Ok(())
    }

    fn unload_content(&mut self) {
        if self.world.take().is_some() {
            log::info!("Game over with score {}", self.score);
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, dt_us: u64) -> Option<Box<dyn Scene>> {
        if ctx.input.is_just_pressed(Control::Pause) {
            self.paused = !self.paused;
            log::info!("Game {}", if self.paused { "paused" } else { "resumed" });
        }
        if self.paused {
            if ctx.input.is_just_pressed(Control::Back) {
                return Some(Box::new(TitleScene::new()));
            }
            return None;
        }

        let world = self.world.as_mut()?;
        world.slime.update(dt_us);
        world.bat.update(dt_us);

        let intent = MoveIntent::from_input(&ctx.input);
        let events = world.engine.step(
            &mut world.slime_body,
            intent,
            &mut world.bat_body,
            ctx.rng.as_mut(),
        );
        for event in events {
            if let ArenaEvent::Pickup { .. } = event {
                self.score += PICKUP_SCORE;
            }
        }
        None
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        let Some(world) = &self.world else {
            return;
        };
        world.tilemap.draw(renderer);
        world.slime.draw(renderer, world.slime_body.position);
        world.bat.draw(renderer, world.bat_body.position);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
