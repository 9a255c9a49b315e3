pub mod geometry;
pub mod input;
pub mod random;
pub mod time;

pub use geometry::{Circle, Rect};
pub use input::{Control, InputState};
pub use random::RandomSource;
pub use time::TimeState;
