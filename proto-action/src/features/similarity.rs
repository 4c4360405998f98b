//! Cosine Similarity
//!
//! Bounded, scale-invariant similarity between two descriptors. A vector
//! whose norm is below the tolerance floor carries no direction, so any
//! comparison involving it scores 0.0.

use super::motion::l2_norm;
use super::tolerances::Tolerances;
use crate::{Error, Result};

/// Cosine similarity in [-1, 1].
///
/// Returns 0.0 when either norm is below `norm_epsilon`, and
/// `Error::DimensionMismatch` when the lengths differ.
pub fn cosine_similarity(a: &[f64], b: &[f64], norm_epsilon: f64) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let na = l2_norm(a);
    let nb = l2_norm(b);
    if na < norm_epsilon || nb < norm_epsilon {
        return Ok(0.0);
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    Ok((dot / (na * nb)).clamp(-1.0, 1.0))
}

/// Descriptor similarity scorer
#[derive(Debug, Clone, Default)]
pub struct SimilarityScorer {
    tolerances: Tolerances,
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    /// Cosine similarity of two equal-length vectors
    pub fn score(&self, a: impl AsRef<[f64]>, b: impl AsRef<[f64]>) -> Result<f64> {
        cosine_similarity(a.as_ref(), b.as_ref(), self.tolerances.norm_epsilon)
    }
}
