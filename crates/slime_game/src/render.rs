//! Renderer collaborator and per-draw parameters.
//!
//! The core computes every parameter of a textured-quad draw; the host
//! renderer only rasterises. [`RecordingRenderer`] keeps the calls in memory,
//! which is what the headless binary and the tests draw into.

use glam::Vec2;

use crate::content::ImageHandle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
}

/// Pixel rectangle within an image surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Position-independent draw transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    pub tint: Color,
    pub rotation: f32,
    pub origin: Vec2,
    pub scale: Vec2,
    pub flip: Flip,
    pub depth: f32,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            tint: Color::WHITE,
            rotation: 0.0,
            origin: Vec2::ZERO,
            scale: Vec2::ONE,
            flip: Flip::default(),
            depth: 0.0,
        }
    }
}

pub trait Renderer {
    fn draw_region(
        &mut self,
        image: &ImageHandle,
        source: SourceRect,
        position: Vec2,
        params: &DrawParams,
    );
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub image: ImageHandle,
    pub source: SourceRect,
    pub position: Vec2,
    pub params: DrawParams,
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Number of contiguous runs sharing one image, i.e. texture binds a
    /// batching backend would need.
    pub fn texture_binds(&self) -> usize {
        let mut binds = 0;
        let mut last: Option<&ImageHandle> = None;
        for call in &self.calls {
            if last != Some(&call.image) {
                binds += 1;
                last = Some(&call.image);
            }
        }
        binds
    }
}

impl Renderer for RecordingRenderer {
    fn draw_region(
        &mut self,
        image: &ImageHandle,
        source: SourceRect,
        position: Vec2,
        params: &DrawParams,
    ) {
        self.calls.push(DrawCall {
            image: image.clone(),
            source,
            position,
            params: *params,
        });
    }
}
