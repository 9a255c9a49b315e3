use glam::Vec2;
use slime_core::input::{Control, InputState};

/// Per-tick movement tuning. Speeds are in pixels per fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    pub speed: f32,
    pub boost_multiplier: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            boost_multiplier: 1.5,
        }
    }
}

impl MotionConfig {
    pub fn speed_for(&self, boost: bool) -> f32 {
        if boost {
            self.speed * self.boost_multiplier
        } else {
            self.speed
        }
    }
}

/// What the controlled entity wants to do this tick, in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveIntent {
    pub direction: Vec2,
    pub boost: bool,
}

impl MoveIntent {
    /// The analog stick wins when deflected; otherwise the directional
    /// controls add up. Stick y is up-positive, so it is flipped.
    pub fn from_input(input: &InputState) -> Self {
        let direction = if input.stick != Vec2::ZERO {
            Vec2::new(input.stick.x, -input.stick.y).clamp_length_max(1.0)
        } else {
            let mut direction = Vec2::ZERO;
            if input.is_held(Control::MoveUp) {
                direction.y -= 1.0;
            }
            if input.is_held(Control::MoveDown) {
                direction.y += 1.0;
            }
            if input.is_held(Control::MoveLeft) {
                direction.x -= 1.0;
            }
            if input.is_held(Control::MoveRight) {
                direction.x += 1.0;
            }
            direction
        };

        Self {
            direction,
            boost: input.is_held(Control::Boost),
        }
    }

    pub fn displacement(&self, config: &MotionConfig) -> Vec2 {
        self.direction * config.speed_for(self.boost)
    }
}
