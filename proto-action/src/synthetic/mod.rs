//! Synthetic Keypoint Sequences
//!
//! Hand-shaped clips for demos, smoke tests and benchmarks when no real
//! pose-estimation output is at hand.

pub mod generator;

pub use generator::{demo_examples, make_sequence, DemoConfig, MotionKind};
