//! Sequence Normalization
//!
//! Makes clips comparable regardless of where the person stands in the
//! image and how large they appear:
//! 1. Gap filling (per joint axis: backfill the leading gap, then hold the
//!    previous value forward)
//! 2. Centering on the hip midpoint (root) of each frame
//! 3. Scaling by the mean shoulder-center to ankle-center distance

use super::tolerances::Tolerances;
use crate::skeleton::{
    NormalizedSequence, Point2, SkeletonFrame, SkeletonSequence, COORDS, LEFT_ANKLE, LEFT_HIP,
    LEFT_SHOULDER, NUM_JOINTS, RIGHT_ANKLE, RIGHT_HIP, RIGHT_SHOULDER,
};
use tracing::{debug, warn};

/// Root-centering, height-scaling normalizer
#[derive(Debug, Clone, Default)]
pub struct SequenceNormalizer {
    tolerances: Tolerances,
}

impl SequenceNormalizer {
    /// Create with default tolerances
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom tolerances
    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// Normalize a flat (T, 17, 2) buffer, validating its shape first
    pub fn normalize_array(&self, shape: &[usize], data: &[f64]) -> crate::Result<NormalizedSequence> {
        let seq = SkeletonSequence::from_flat(shape, data)?;
        Ok(self.normalize(&seq))
    }

    /// Normalize a sequence
    pub fn normalize(&self, seq: &SkeletonSequence) -> NormalizedSequence {
        let mut frames = seq.frames().to_vec();

        let filled = fill_gaps(&mut frames);
        if filled > 0 {
            debug!(filled, frames = frames.len(), "Filled missing keypoint coordinates");
        }

        center_on_root(&mut frames);

        let mut scale = estimate_scale(&frames);
        // Negated comparison so a NaN scale also takes the fallback
        if !(scale >= self.tolerances.scale_epsilon) {
            warn!(
                scale,
                fallback = self.tolerances.scale_fallback,
                "Degenerate body height, using fallback scale"
            );
            scale = self.tolerances.scale_fallback;
        }

        for frame in frames.iter_mut() {
            for point in frame.iter_mut() {
                point[0] /= scale;
                point[1] /= scale;
            }
        }

        debug!(frames = frames.len(), scale, "Normalized sequence");
        NormalizedSequence::new(frames, scale)
    }
}

/// Replace NaN coordinates in place, one (joint, axis) column at a time.
///
/// A column with no valid value becomes all zeros. Otherwise entries before
/// the first valid value take that value, and later gaps take the value of
/// the previous frame in a single left-to-right pass.
///
/// Returns the number of coordinates that were replaced.
pub fn fill_gaps(frames: &mut [SkeletonFrame]) -> usize {
    let mut filled = 0;

    for j in 0..NUM_JOINTS {
        for c in 0..COORDS {
            let first_valid = frames.iter().position(|f| !f[j][c].is_nan());

            let Some(first) = first_valid else {
                for frame in frames.iter_mut() {
                    frame[j][c] = 0.0;
                }
                filled += frames.len();
                continue;
            };

            let anchor = frames[first][j][c];
            for frame in frames[..first].iter_mut() {
                frame[j][c] = anchor;
            }
            filled += first;

            for t in (first + 1)..frames.len() {
                if frames[t][j][c].is_nan() {
                    frames[t][j][c] = frames[t - 1][j][c];
                    filled += 1;
                }
            }
        }
    }

    filled
}

fn midpoint(a: Point2, b: Point2) -> Point2 {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0]
}

/// Subtract the hip midpoint of each frame from all of its joints
fn center_on_root(frames: &mut [SkeletonFrame]) {
    for frame in frames.iter_mut() {
        let root = midpoint(frame[LEFT_HIP], frame[RIGHT_HIP]);
        for point in frame.iter_mut() {
            point[0] -= root[0];
            point[1] -= root[1];
        }
    }
}

/// Mean shoulder-center to ankle-center distance over all frames
fn estimate_scale(frames: &[SkeletonFrame]) -> f64 {
    if frames.is_empty() {
        return 0.0;
    }

    let total: f64 = frames
        .iter()
        .map(|frame| {
            let shoulder = midpoint(frame[LEFT_SHOULDER], frame[RIGHT_SHOULDER]);
            let ankle = midpoint(frame[LEFT_ANKLE], frame[RIGHT_ANKLE]);
            let dx = ankle[0] - shoulder[0];
            let dy = ankle[1] - shoulder[1];
            (dx * dx + dy * dy).sqrt()
        })
        .sum();

    total / frames.len() as f64
}
