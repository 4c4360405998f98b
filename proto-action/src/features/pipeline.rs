//! Normalize-then-extract composition shared by prototype building and
//! query classification, so both sides of a comparison see identical
//! preprocessing.

use super::motion::{MotionFeatureExtractor, MotionFeatureVector};
use super::normalizer::SequenceNormalizer;
use super::tolerances::Tolerances;
use crate::skeleton::SkeletonSequence;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct FeaturePipeline {
    normalizer: SequenceNormalizer,
    extractor: MotionFeatureExtractor,
}

impl FeaturePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self {
            normalizer: SequenceNormalizer::with_tolerances(tolerances),
            extractor: MotionFeatureExtractor::with_tolerances(tolerances),
        }
    }

    pub fn normalizer(&self) -> &SequenceNormalizer {
        &self.normalizer
    }

    pub fn extractor(&self) -> &MotionFeatureExtractor {
        &self.extractor
    }

    /// Descriptor of a raw sequence
    pub fn describe(&self, seq: &SkeletonSequence) -> MotionFeatureVector {
        let normalized = self.normalizer.normalize(seq);
        let features = self.extractor.extract(&normalized);
        debug!(
            frames = seq.len(),
            scale = normalized.scale(),
            norm = features.norm(),
            "Extracted motion descriptor"
        );
        features
    }
}
