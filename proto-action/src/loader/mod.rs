//! Keypoint File Loading
//!
//! Reads per-frame pose-estimation JSON (mmpose layout) into skeleton
//! sequences, and labeled example trees into prototype inputs.

pub mod mmpose;
pub mod examples;

pub use mmpose::{
    load_frame_file, load_sequence_from_dir, FrameDetections, LoaderConfig, PersonDetection,
};
pub use examples::load_labeled_examples;
