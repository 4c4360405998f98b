//! Periodic gait generator.
//!
//! All clips start from the same standing pose (hips, shoulders and ankles
//! placed, every other joint at the origin). Gaits swing the ankles in
//! anti-phase and bob the whole body at twice the swing frequency.

use crate::prototype::LabeledExamples;
use crate::skeleton::{
    SkeletonFrame, SkeletonSequence, COORDS, LEFT_ANKLE, LEFT_HIP, LEFT_SHOULDER, NUM_JOINTS,
    RIGHT_ANKLE, RIGHT_HIP, RIGHT_SHOULDER,
};
use crate::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Kind of synthetic motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    /// Large ankle swing with strong vertical bounce
    Run,
    /// Small ankle swing with slight bounce
    Walk,
    /// Static standing pose
    Idle,
    /// Standing pose with seeded uniform noise on every joint
    Jitter,
}

impl MotionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionKind::Run => "run",
            MotionKind::Walk => "walk",
            MotionKind::Idle => "idle",
            MotionKind::Jitter => "jitter",
        }
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MotionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "run" => Ok(MotionKind::Run),
            "walk" => Ok(MotionKind::Walk),
            "idle" => Ok(MotionKind::Idle),
            "jitter" => Ok(MotionKind::Jitter),
            other => Err(format!(
                "unknown motion kind '{}', expected run, walk, idle or jitter",
                other
            )),
        }
    }
}

/// Synthetic clip parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Frames per clip
    pub frames: usize,
    /// Run ankle swing amplitude
    pub run_amplitude: f64,
    /// Walk ankle swing amplitude
    pub walk_amplitude: f64,
    /// Run vertical bounce amplitude
    pub run_bounce: f64,
    /// Walk vertical bounce amplitude
    pub walk_bounce: f64,
    /// Jitter noise amplitude
    pub jitter_amplitude: f64,
    /// Seed for jitter noise
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 16,
            run_amplitude: 0.3,
            walk_amplitude: 0.15,
            run_bounce: 0.1,
            walk_bounce: 0.03,
            jitter_amplitude: 0.02,
            seed: 0,
        }
    }
}

impl DemoConfig {
    /// Validate demo parameters
    pub fn validate(&self) -> Result<()> {
        if self.frames == 0 {
            return Err(Error::Config("demo.frames must be > 0".to_string()));
        }
        let amplitudes = [
            ("run_amplitude", self.run_amplitude),
            ("walk_amplitude", self.walk_amplitude),
            ("run_bounce", self.run_bounce),
            ("walk_bounce", self.walk_bounce),
            ("jitter_amplitude", self.jitter_amplitude),
        ];
        for (name, value) in amplitudes {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "demo.{} must be finite and >= 0, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

fn base_pose() -> SkeletonFrame {
    let mut frame = [[0.0; COORDS]; NUM_JOINTS];
    frame[LEFT_HIP] = [-0.1, 0.0];
    frame[RIGHT_HIP] = [0.1, 0.0];
    frame[LEFT_SHOULDER] = [-0.15, 0.3];
    frame[RIGHT_SHOULDER] = [0.15, 0.3];
    frame[LEFT_ANKLE] = [-0.1, -0.7];
    frame[RIGHT_ANKLE] = [0.1, -0.7];
    frame
}

fn gait_frame(phase: f64, swing: f64, bounce: f64) -> SkeletonFrame {
    let mut frame = base_pose();
    let offset_y = bounce * (2.0 * phase).sin();
    for point in frame.iter_mut() {
        point[1] += offset_y;
    }
    frame[LEFT_ANKLE][0] += swing * phase.sin();
    frame[RIGHT_ANKLE][0] -= swing * phase.sin();
    frame
}

/// Build a synthetic clip of `frames` frames
pub fn make_sequence(frames: usize, kind: MotionKind, config: &DemoConfig) -> Result<SkeletonSequence> {
    let period = frames.saturating_sub(1).max(1) as f64;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let data = (0..frames)
        .map(|t| {
            let phase = 2.0 * PI * t as f64 / period;
            match kind {
                MotionKind::Run => gait_frame(phase, config.run_amplitude, config.run_bounce),
                MotionKind::Walk => gait_frame(phase, config.walk_amplitude, config.walk_bounce),
                MotionKind::Idle => base_pose(),
                MotionKind::Jitter => {
                    let mut frame = base_pose();
                    let a = config.jitter_amplitude;
                    for point in frame.iter_mut() {
                        for v in point.iter_mut() {
                            if a > 0.0 {
                                *v += rng.gen_range(-a..=a);
                            }
                        }
                    }
                    frame
                }
            }
        })
        .collect();

    SkeletonSequence::from_frames(data)
}

/// Example set used by the demo: run x2, walk, idle
pub fn demo_examples(config: &DemoConfig) -> Result<LabeledExamples> {
    let n = config.frames;
    let mut examples = LabeledExamples::new();
    examples.insert(
        MotionKind::Run.to_string(),
        vec![
            make_sequence(n, MotionKind::Run, config)?,
            make_sequence(n, MotionKind::Run, config)?,
        ],
    );
    examples.insert(MotionKind::Walk.to_string(), vec![make_sequence(n, MotionKind::Walk, config)?]);
    examples.insert(MotionKind::Idle.to_string(), vec![make_sequence(n, MotionKind::Idle, config)?]);
    Ok(examples)
}
