//! Fixed-timestep frame clock in integer microseconds.
//!
//! The host reports how much wall-clock time passed since the previous frame;
//! the accumulator hands that out in `fixed_dt_us` slices so every simulation
//! tick sees the same delta.

pub const FIXED_DT_US: u64 = 16_667;

/// Longest frame fed to the accumulator; anything longer is capped.
pub const MAX_ACCUMULATOR_US: u64 = 250_000;

pub struct TimeState {
    pub fixed_dt_us: u64,
    pub max_accumulator_us: u64,
    accumulator_us: u64,
    pub total_time_us: u64,
    pub fixed_step_count: u64,
    pub frame_count: u64,
    pub steps_this_frame: u32,
    pub real_dt_us: u64,
}

impl TimeState {
    pub fn new() -> Self {
        Self::with_fixed_dt(FIXED_DT_US)
    }

    pub fn with_fixed_dt(fixed_dt_us: u64) -> Self {
        Self {
            fixed_dt_us: fixed_dt_us.max(1),
            max_accumulator_us: MAX_ACCUMULATOR_US,
            accumulator_us: 0,
            total_time_us: 0,
            fixed_step_count: 0,
            frame_count: 0,
            steps_this_frame: 0,
            real_dt_us: 0,
        }
    }

    pub fn begin_frame(&mut self, real_dt_us: u64) {
        self.real_dt_us = real_dt_us;

        // Spiral-of-death cap
        if self.real_dt_us > self.max_accumulator_us {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator to {}ms",
                self.real_dt_us as f64 / 1000.0,
                self.max_accumulator_us / 1000
            );
            self.real_dt_us = self.max_accumulator_us;
        }

        self.accumulator_us += self.real_dt_us;
        self.steps_this_frame = 0;
        self.frame_count += 1;
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator_us >= self.fixed_dt_us {
            self.accumulator_us -= self.fixed_dt_us;
            self.total_time_us += self.fixed_dt_us;
            self.fixed_step_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_frame_yields_one_step() {
        let mut time = TimeState::new();
        time.begin_frame(FIXED_DT_US);
        assert!(time.should_step());
        assert!(!time.should_step());
        assert_eq!(time.steps_this_frame, 1);
        assert_eq!(time.total_time_us, FIXED_DT_US);
    }

    #[test]
    fn short_frames_accumulate_until_a_step_is_due() {
        let mut time = TimeState::with_fixed_dt(10_000);
        time.begin_frame(6_000);
        assert!(!time.should_step());
        time.begin_frame(6_000);
        assert!(time.should_step());
        assert!(!time.should_step());
        assert_eq!(time.total_time_us, 10_000);
    }

    #[test]
    fn long_frame_is_capped() {
        let mut time = TimeState::with_fixed_dt(10_000);
        time.begin_frame(2_000_000);
        let mut steps = 0;
        while time.should_step() {
            steps += 1;
        }
        assert_eq!(time.real_dt_us, MAX_ACCUMULATOR_US);
        assert_eq!(steps, 25);
        assert_eq!(time.fixed_step_count, 25);
    }

    #[test]
    fn step_at_the_cap_runs_every_frame() {
        let mut time = TimeState::with_fixed_dt(MAX_ACCUMULATOR_US);
        for _ in 0..6 {
            time.begin_frame(MAX_ACCUMULATOR_US);
            while time.should_step() {}
        }
        assert_eq!(time.fixed_step_count, 6);
    }
}
