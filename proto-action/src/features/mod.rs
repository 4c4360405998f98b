//! Motion Feature Pipeline
//!
//! Turns a raw keypoint clip into a fixed-length, unit-norm descriptor:
//! - Gap filling, root centering and body-height scaling
//! - Position / velocity mean and standard deviation per joint axis
//! - Cosine similarity between descriptors

pub mod tolerances;
pub mod normalizer;
pub mod motion;
pub mod similarity;
pub mod pipeline;

pub use tolerances::Tolerances;
pub use normalizer::SequenceNormalizer;
pub use motion::{MotionFeatureExtractor, MotionFeatureVector, FEATURE_DIM};
pub use similarity::{cosine_similarity, SimilarityScorer};
pub use pipeline::FeaturePipeline;
