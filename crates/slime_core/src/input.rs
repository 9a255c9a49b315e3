//! Input state tracking with both edge-triggered and level-triggered queries.
//!
//! The host platform maps its keys and gamepad buttons onto logical
//! [`Control`]s and reports transitions with `control_down` / `control_up`.
//!
//! - **Level-triggered (held):** `is_held(control)` returns true every frame the
//!   control is down. Used for continuous actions like movement and boost.
//!
//! - **Edge-triggered (just_pressed / just_released):** true only during the
//!   frame the transition happened. Cleared by `end_frame()`, which the frame
//!   loop calls only after at least one fixed simulation step has consumed
//!   them, so a press is never lost on a frame with zero simulation steps.
//!
//! The analog `stick` is level-triggered and uses y-up convention, like a
//! gamepad thumbstick.

use glam::Vec2;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Boost,
    Pause,
    Confirm,
    Back,
}

pub struct InputState {
    held: HashSet<Control>,
    just_pressed: HashSet<Control>,
    just_released: HashSet<Control>,

    pub stick: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
            stick: Vec2::ZERO,
        }
    }

    pub fn control_down(&mut self, control: Control) {
        if self.held.insert(control) {
            self.just_pressed.insert(control);
        }
    }

    pub fn control_up(&mut self, control: Control) {
        if self.held.remove(&control) {
            self.just_released.insert(control);
        }
    }

    /// Replace the held set wholesale, deriving edges from the difference.
    /// Used when replaying recorded per-tick snapshots.
    pub fn apply_snapshot(&mut self, held: &[Control], stick: Vec2) {
        let previous: Vec<Control> = self.held.iter().copied().collect();
        for control in previous {
            if !held.contains(&control) {
                self.control_up(control);
            }
        }
        for &control in held {
            self.control_down(control);
        }
        self.stick = stick;
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    pub fn is_just_pressed(&self, control: Control) -> bool {
        self.just_pressed.contains(&control)
    }

    pub fn is_just_released(&self, control: Control) -> bool {
        self.just_released.contains(&control)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
