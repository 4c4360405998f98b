//! # Proto Action
//!
//! Coarse action recognition ("run", "walk", "idle", ...) from short clips
//! of 2-D COCO-17 body keypoints, by nearest-prototype matching of motion
//! descriptors.
//!
//! ## Quick Start
//!
//! ```no_run
//! use proto_action::{ActionClassifier, PrototypeBuilder};
//! use proto_action::synthetic::{demo_examples, make_sequence, DemoConfig, MotionKind};
//!
//! let config = DemoConfig::default();
//! let bank = PrototypeBuilder::new().build(&demo_examples(&config)?);
//!
//! let query = make_sequence(16, MotionKind::Run, &config)?;
//! let result = ActionClassifier::new().classify(&query, &bank)?;
//!
//! println!("{} ({:.3})", result.label, result.best_score());
//! # Ok::<(), proto_action::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`skeleton`]: Joint layout and validated (T, 17, 2) sequences
//! - [`features`]: Normalization, motion descriptors, cosine similarity
//! - [`prototype`]: Labeled descriptor bank construction
//! - [`classifier`]: Max-similarity nearest-prototype classification
//! - [`loader`]: mmpose per-frame JSON directories and labeled example trees
//! - [`synthetic`]: Synthetic gait clips for demos and benchmarks
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  Raw clip   │───▶│ Normalizer  │───▶│  Extractor  │───▶ descriptor (136)
//! │ (T, 17, 2)  │    │ fill/center │    │ mean / std  │          │
//! └─────────────┘    │   /scale    │    │ pos / vel   │          ▼
//!                    └─────────────┘    └─────────────┘    ┌─────────────┐
//!                                                          │ Max cosine  │──▶ label
//!                                  prototype bank ────────▶│  per label  │
//!                                                          └─────────────┘
//! ```

pub mod skeleton;
pub mod features;
pub mod prototype;
pub mod classifier;
pub mod loader;
pub mod synthetic;
pub mod app;

// Re-export commonly used types
pub use skeleton::{NormalizedSequence, SkeletonFrame, SkeletonSequence};
pub use features::{
    cosine_similarity, FeaturePipeline, MotionFeatureExtractor, MotionFeatureVector,
    SequenceNormalizer, SimilarityScorer, Tolerances, FEATURE_DIM,
};
pub use prototype::{LabeledExamples, PrototypeBank, PrototypeBuilder};
pub use classifier::{ActionClassifier, Classification, ScoreMap};

use std::path::PathBuf;

/// Result type alias for the action recognizer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the action recognizer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Shape error: {0}")]
    Shape(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Empty prototype bank: at least one label with at least one prototype is required")]
    EmptyPrototypeBank,

    #[error("No input files found in directory: {}", .0.display())]
    NoInputFiles(PathBuf),

    #[error("No valid persons/keypoints found in directory: {}", .0.display())]
    NoValidDetections(PathBuf),

    #[error("Loader error: {0}")]
    Loader(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
