use glam::Vec2;

use crate::content::ImageHandle;
use crate::error::LoadError;
use crate::render::{DrawParams, Renderer, SourceRect};

/// A rectangular sub-area of a shared image surface.
///
/// Construction validates the rectangle, so a `TextureRegion` in hand is
/// always non-empty and inside its surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRegion {
    image: ImageHandle,
    source: SourceRect,
}

impl TextureRegion {
    /// `name` is only used to label validation errors.
    pub fn new(
        name: &str,
        image: &ImageHandle,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<Self, LoadError> {
        if width == 0 || height == 0 {
            return Err(LoadError::InvalidRegion {
                name: name.to_string(),
                reason: format!("zero-sized rect {width}x{height}"),
            });
        }
        let right = x.checked_add(width).ok_or_else(|| overflow(name))?;
        let bottom = y.checked_add(height).ok_or_else(|| overflow(name))?;
        if right > image.width || bottom > image.height {
            return Err(LoadError::InvalidRegion {
                name: name.to_string(),
                reason: format!(
                    "rect ({x}, {y}, {width}, {height}) exceeds image '{}' bounds {}x{}",
                    image.path, image.width, image.height
                ),
            });
        }

        Ok(Self {
            image: image.clone(),
            source: SourceRect {
                x,
                y,
                width,
                height,
            },
        })
    }

    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    pub fn source(&self) -> SourceRect {
        self.source
    }

    pub fn width(&self) -> u32 {
        self.source.width
    }

    pub fn height(&self) -> u32 {
        self.source.height
    }

    pub fn draw(&self, renderer: &mut dyn Renderer, position: Vec2, params: &DrawParams) {
        renderer.draw_region(&self.image, self.source, position, params);
    }
}

fn overflow(name: &str) -> LoadError {
    LoadError::InvalidRegion {
        name: name.to_string(),
        reason: "rect overflows u32 range".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;

    fn surface() -> ImageHandle {
        ImageHandle::new("images/atlas.png", 64, 32)
    }

    #[test]
    fn region_inside_surface_is_accepted() {
        let region = TextureRegion::new("a", &surface(), 32, 0, 32, 32).expect("fits");
        assert_eq!(region.width(), 32);
        assert_eq!(region.height(), 32);
        assert_eq!(region.source().x, 32);
    }

    #[test]
    fn zero_sized_region_is_rejected() {
        let err = TextureRegion::new("empty", &surface(), 0, 0, 0, 10).expect_err("zero width");
        assert!(err.to_string().contains("zero-sized"));
    }

    #[test]
    fn region_past_surface_edge_is_rejected() {
        let err = TextureRegion::new("wide", &surface(), 40, 0, 32, 32).expect_err("too wide");
        assert!(err.to_string().contains("exceeds image"));
    }

    #[test]
    fn overflowing_rect_is_rejected() {
        let err =
            TextureRegion::new("huge", &surface(), u32::MAX, 0, 8, 8).expect_err("overflow");
        assert!(err.to_string().contains("overflows u32 range"));
    }

    #[test]
    fn draw_forwards_source_and_params() {
        let region = TextureRegion::new("a", &surface(), 0, 0, 16, 16).expect("fits");
        let params = DrawParams {
            depth: 0.5,
            ..DrawParams::default()
        };
        let mut renderer = RecordingRenderer::new();
        region.draw(&mut renderer, Vec2::new(3.0, 4.0), &params);

        assert_eq!(renderer.calls.len(), 1);
        let call = &renderer.calls[0];
        assert_eq!(call.source, region.source());
        assert_eq!(call.position, Vec2::new(3.0, 4.0));
        assert_eq!(call.params.depth, 0.5);
    }
}
