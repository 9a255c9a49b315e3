use std::rc::Rc;

use glam::Vec2;

use crate::animation::{Animation, Playback};
use crate::region::TextureRegion;
use crate::render::{DrawParams, Renderer};

/// A single static region drawn with its own transform.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub region: TextureRegion,
    pub params: DrawParams,
}

impl Sprite {
    pub fn new(region: TextureRegion) -> Self {
        Self {
            region,
            params: DrawParams::default(),
        }
    }

    pub fn width(&self) -> f32 {
        self.region.width() as f32 * self.params.scale.x
    }

    pub fn height(&self) -> f32 {
        self.region.height() as f32 * self.params.scale.y
    }

    /// Place the origin at the centre of the region.
    pub fn center_origin(&mut self) {
        self.params.origin = Vec2::new(
            self.region.width() as f32 * 0.5,
            self.region.height() as f32 * 0.5,
        );
    }

    pub fn draw(&self, renderer: &mut dyn Renderer, position: Vec2) {
        self.region.draw(renderer, position, &self.params);
    }
}

/// Plays a shared [`Animation`] with its own cursor and transform.
///
/// Several sprites may hold the same animation; each advances independently.
/// Position is supplied at draw time and never stored.
#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    animation: Rc<Animation>,
    playback: Playback,
    pub params: DrawParams,
}

impl AnimatedSprite {
    pub fn new(animation: Rc<Animation>) -> Self {
        Self {
            animation,
            playback: Playback::default(),
            params: DrawParams::default(),
        }
    }

    pub fn animation(&self) -> &Rc<Animation> {
        &self.animation
    }

    pub fn frame_index(&self) -> usize {
        self.playback.frame_index
    }

    pub fn elapsed_us(&self) -> u64 {
        self.playback.elapsed_us
    }

    pub fn current_frame(&self) -> &TextureRegion {
        self.animation.frame(self.playback.frame_index)
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.params.scale = scale;
    }

    /// Drawn width of the current frame.
    pub fn width(&self) -> f32 {
        self.current_frame().width() as f32 * self.params.scale.x
    }

    pub fn height(&self) -> f32 {
        self.current_frame().height() as f32 * self.params.scale.y
    }

    pub fn update(&mut self, dt_us: u64) {
        self.playback.advance(dt_us, &self.animation);
    }

    pub fn restart(&mut self) {
        self.playback.reset();
    }

    pub fn draw(&self, renderer: &mut dyn Renderer, position: Vec2) {
        self.current_frame().draw(renderer, position, &self.params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ImageHandle;
    use crate::render::{Color, RecordingRenderer};

    fn three_frame_animation() -> Rc<Animation> {
        let image = ImageHandle::new("sprites.png", 48, 16);
        let frames = (0..3)
            .map(|i| TextureRegion::new("f", &image, i * 16, 0, 16, 16).expect("frame fits"))
            .collect();
        Rc::new(Animation::new(frames, 100_000).expect("valid animation"))
    }

    #[test]
    fn sprites_sharing_an_animation_play_independently() {
        let animation = three_frame_animation();
        let mut a = AnimatedSprite::new(Rc::clone(&animation));
        let mut b = AnimatedSprite::new(Rc::clone(&animation));

        a.update(250_000);
        b.update(100_000);

        assert_eq!(a.frame_index(), 2);
        assert_eq!(a.elapsed_us(), 50_000);
        assert_eq!(b.frame_index(), 1);
        assert_eq!(b.elapsed_us(), 0);
        assert_eq!(Rc::strong_count(&animation), 3);
    }

    #[test]
    fn draw_uses_current_frame_and_transform() {
        let mut sprite = AnimatedSprite::new(three_frame_animation());
        sprite.set_scale(Vec2::splat(4.0));
        sprite.params.tint = Color::rgba(1.0, 0.0, 0.0, 1.0);
        sprite.update(100_000);

        let mut renderer = RecordingRenderer::new();
        sprite.draw(&mut renderer, Vec2::new(10.0, 20.0));

        let call = &renderer.calls[0];
        assert_eq!(call.source.x, 16);
        assert_eq!(call.position, Vec2::new(10.0, 20.0));
        assert_eq!(call.params.scale, Vec2::splat(4.0));
        assert_eq!(call.params.tint.g, 0.0);
    }

    #[test]
    fn size_scales_with_transform() {
        let mut sprite = AnimatedSprite::new(three_frame_animation());
        assert_eq!(sprite.width(), 16.0);
        sprite.set_scale(Vec2::new(4.0, 2.0));
        assert_eq!(sprite.width(), 64.0);
        assert_eq!(sprite.height(), 32.0);
    }

    #[test]
    fn restart_returns_to_first_frame() {
        let mut sprite = AnimatedSprite::new(three_frame_animation());
        sprite.update(150_000);
        sprite.restart();
        assert_eq!(sprite.frame_index(), 0);
        assert_eq!(sprite.elapsed_us(), 0);
    }

    #[test]
    fn static_sprite_center_origin() {
        let image = ImageHandle::new("sprites.png", 48, 16);
        let region = TextureRegion::new("f", &image, 0, 0, 16, 8).expect("fits");
        let mut sprite = Sprite::new(region);
        sprite.center_origin();
        sprite.params.scale = Vec2::splat(2.0);
        assert_eq!(sprite.params.origin, Vec2::new(8.0, 4.0));
        assert_eq!(sprite.width(), 32.0);
        assert_eq!(sprite.height(), 16.0);

        let mut renderer = RecordingRenderer::new();
        sprite.draw(&mut renderer, Vec2::ZERO);
        assert_eq!(renderer.calls.len(), 1);
    }
}
