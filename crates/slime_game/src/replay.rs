use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::Deserialize;
use slime_core::input::Control;
use slime_core::time::{FIXED_DT_US, MAX_ACCUMULATOR_US};

use crate::error::LoadError;

/// Recorded input, one entry per run of identical ticks.
#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt_us")]
    pub fixed_dt_us: u64,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub controls: Vec<Control>,
    #[serde(default)]
    pub stick: [f32; 2],
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

/// Held controls and stick position for a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSnapshot {
    pub controls: Vec<Control>,
    pub stick: Vec2,
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<InputSnapshot> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let snapshot = InputSnapshot {
                controls: frame.controls.clone(),
                stick: Vec2::from(frame.stick).clamp_length_max(1.0),
            };
            for _ in 0..frame.repeat.max(1) {
                out.push(snapshot.clone());
            }
        }
        out
    }

    pub fn tick_count(&self) -> usize {
        self.frames
            .iter()
            .map(|frame| frame.repeat.max(1) as usize)
            .sum()
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, LoadError> {
    let raw = fs::read_to_string(path).map_err(|e| LoadError::io(&path.display().to_string(), e))?;
    let replay = load_replay_from_str(&raw)
        .map_err(|e| LoadError::malformed(format!("{}: {e}", path.display())))?;
    log::info!(
        "Loaded replay '{}' ({} ticks)",
        path.display(),
        replay.tick_count()
    );
    Ok(replay)
}

pub fn load_replay_from_str(raw: &str) -> Result<ReplaySequence, String> {
    let replay: ReplaySequence =
        serde_json::from_str(raw).map_err(|e| format!("replay JSON: {e}"))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.fixed_dt_us == 0 {
        return Err("Replay validation failed: fixed_dt_us must be > 0".to_string());
    }
    // Frames longer than the accumulator cap would lose ticks.
    if replay.fixed_dt_us > MAX_ACCUMULATOR_US {
        return Err(format!(
            "Replay validation failed: fixed_dt_us must be <= {MAX_ACCUMULATOR_US}"
        ));
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    if replay
        .frames
        .iter()
        .any(|frame| frame.stick.iter().any(|v| !v.is_finite()))
    {
        return Err("Replay validation failed: stick values must be finite".to_string());
    }
    Ok(())
}

const fn default_dt_us() -> u64 {
    FIXED_DT_US
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Arena, Body, MotionEngine};
    use crate::controller::{MotionConfig, MoveIntent};
    use slime_core::geometry::Rect;
    use slime_core::input::InputState;
    use slime_core::random::seeded;
    use slime_core::time::TimeState;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "slime_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "controls": ["move_right", "boost"], "repeat": 3 },
                { "stick": [0.0, 2.0] },
                { "controls": ["confirm"], "repeat": 0 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        assert_eq!(replay.fixed_dt_us, FIXED_DT_US);
        assert_eq!(replay.tick_count(), 5);

        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 5);
        assert_eq!(expanded[0].controls, vec![Control::MoveRight, Control::Boost]);
        assert_eq!(expanded[3].stick, Vec2::new(0.0, 1.0));
        assert_eq!(expanded[4].controls, vec![Control::Confirm]);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn invalid_replays_are_rejected() {
        let err = load_replay_from_str(r#"{ "frames": [] }"#).expect_err("empty");
        assert!(err.contains("frames list is empty"));
        let err = load_replay_from_str(r#"{ "fixed_dt_us": 0, "frames": [{}] }"#)
            .expect_err("zero dt");
        assert!(err.contains("fixed_dt_us"));
        assert!(load_replay_from_str(r#"{ "frames": [{ "controls": ["jump"] }] }"#).is_err());
    }

    #[test]
    fn step_longer_than_frame_cap_is_rejected() {
        let raw = format!(
            r#"{{ "fixed_dt_us": {}, "frames": [{{ "repeat": 6 }}] }}"#,
            MAX_ACCUMULATOR_US + 50_000
        );
        let err = load_replay_from_str(&raw).expect_err("step above cap");
        assert!(err.contains("fixed_dt_us must be <="), "{err}");

        let raw = format!(
            r#"{{ "fixed_dt_us": {MAX_ACCUMULATOR_US}, "frames": [{{ "repeat": 6 }}] }}"#
        );
        let replay = load_replay_from_str(&raw).expect("step at cap is allowed");
        let mut time = TimeState::with_fixed_dt(replay.fixed_dt_us);
        for _ in replay.expanded_inputs() {
            time.begin_frame(replay.fixed_dt_us);
            assert!(time.should_step());
            assert!(!time.should_step());
        }
        assert_eq!(time.fixed_step_count, 6);
    }

    #[test]
    fn missing_replay_file_is_io_error() {
        let err = load_replay_from_path(&temp_file_path("missing")).expect_err("no file");
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn replay_run_is_deterministic() {
        let replay = load_replay_from_str(
            r#"{
              "frames": [
                { "controls": ["move_right"], "repeat": 60 },
                { "controls": ["move_right", "move_down", "boost"], "repeat": 90 },
                { "stick": [-0.5, 0.75], "repeat": 120 },
                { "controls": ["move_left"], "repeat": 45 }
              ]
            }"#,
        )
        .expect("replay should load");
        let arena = Arena::new(Rect::new(80.0, 80.0, 1120.0, 560.0), 16, 9, Vec2::splat(80.0))
            .expect("arena");
        let engine = MotionEngine::new(arena, MotionConfig::default());

        let run = |seed: u64| {
            let mut rng = seeded(seed);
            let mut input = InputState::new();
            let mut slime = Body::new(Vec2::new(640.0, 320.0), Vec2::splat(80.0));
            let mut bat = Body::new(Vec2::new(80.0, 80.0), Vec2::splat(80.0));
            bat.velocity = engine.spawn_velocity(&mut rng);
            let mut events = 0;
            for snapshot in replay.expanded_inputs() {
                input.apply_snapshot(&snapshot.controls, snapshot.stick);
                let intent = MoveIntent::from_input(&input);
                events += engine
                    .step(&mut slime, intent, &mut bat, &mut rng)
                    .len();
                input.end_frame();
            }
            (slime.position, bat.position, bat.velocity, events)
        };

        let a = run(7);
        let b = run(7);
        assert_eq!(a.0, b.0);
        assert_eq!(a.1, b.1);
        assert_eq!(a.2, b.2);
        assert_eq!(a.3, b.3);
    }
}
