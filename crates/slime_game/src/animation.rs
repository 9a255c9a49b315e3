//! Looping frame animations.
//!
//! An [`Animation`] is an immutable definition shared between every sprite
//! that plays it. Timing uses integer microseconds so that advancing under
//! the fixed-timestep loop is exact: no floating-point drift when a long
//! session accumulates thousands of ticks.

use crate::error::LoadError;
use crate::region::TextureRegion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    frames: Vec<TextureRegion>,
    frame_duration_us: u64,
}

impl Animation {
    pub fn new(frames: Vec<TextureRegion>, frame_duration_us: u64) -> Result<Self, LoadError> {
        if frames.is_empty() {
            return Err(LoadError::malformed("animation has no frames"));
        }
        if frame_duration_us == 0 {
            return Err(LoadError::malformed("animation frame duration must be > 0"));
        }
        Ok(Self {
            frames,
            frame_duration_us,
        })
    }

    pub fn frames(&self) -> &[TextureRegion] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> &TextureRegion {
        &self.frames[index % self.frames.len()]
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_duration_us(&self) -> u64 {
        self.frame_duration_us
    }
}

/// Playback cursor over an [`Animation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Playback {
    pub frame_index: usize,
    pub elapsed_us: u64,
}

impl Playback {
    /// Advance by `dt_us`, stepping as many frames as the delta covers.
    pub fn advance(&mut self, dt_us: u64, animation: &Animation) {
        let frame_duration = animation.frame_duration_us;
        let frame_count = animation.frames.len();

        self.elapsed_us += dt_us;
        while self.elapsed_us >= frame_duration {
            self.elapsed_us -= frame_duration;
            self.frame_index = (self.frame_index + 1) % frame_count;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ImageHandle;

    fn make_animation(frame_count: u32, duration_ms: u64) -> Animation {
        let image = ImageHandle::new("test.png", 16 * frame_count, 16);
        let frames = (0..frame_count)
            .map(|i| {
                TextureRegion::new(&format!("frame_{i}"), &image, i * 16, 0, 16, 16)
                    .expect("frame fits")
            })
            .collect();
        Animation::new(frames, duration_ms * 1000).expect("valid animation")
    }

    #[test]
    fn advance_crosses_multiple_frames_in_one_step() {
        let animation = make_animation(3, 100);
        let mut playback = Playback::default();

        playback.advance(250_000, &animation);
        assert_eq!(playback.frame_index, 2);
        assert_eq!(playback.elapsed_us, 50_000);
    }

    #[test]
    fn advance_wraps_past_a_full_cycle() {
        let animation = make_animation(3, 100);
        let mut playback = Playback::default();

        playback.advance(700_000, &animation);
        assert_eq!(playback.frame_index, 1);
        assert_eq!(playback.elapsed_us, 0);
    }

    #[test]
    fn small_steps_match_one_large_step() {
        let animation = make_animation(4, 80);
        let mut stepped = Playback::default();
        let mut jumped = Playback::default();

        for _ in 0..100 {
            stepped.advance(16_667, &animation);
        }
        jumped.advance(16_667 * 100, &animation);
        assert_eq!(stepped, jumped);
    }

    #[test]
    fn elapsed_stays_below_frame_duration() {
        let animation = make_animation(2, 30);
        let mut playback = Playback::default();
        for dt in [1, 29_999, 30_000, 45_000, 7, 120_001] {
            playback.advance(dt, &animation);
            assert!(playback.elapsed_us < animation.frame_duration_us());
            assert!(playback.frame_index < animation.frame_count());
        }
    }

    #[test]
    fn empty_or_zero_duration_animations_are_rejected() {
        let err = Animation::new(Vec::new(), 1000).expect_err("no frames");
        assert!(err.to_string().contains("no frames"));

        let image = ImageHandle::new("test.png", 16, 16);
        let frame = TextureRegion::new("f", &image, 0, 0, 16, 16).expect("frame fits");
        let err = Animation::new(vec![frame], 0).expect_err("zero duration");
        assert!(err.to_string().contains("duration"));
    }

    #[test]
    fn frame_lookup_wraps_around() {
        let animation = make_animation(3, 100);
        assert_eq!(animation.frame_count(), 3);
        assert_eq!(animation.frame(4), &animation.frames()[1]);
    }
}
