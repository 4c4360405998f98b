//! Motion Feature Extraction
//!
//! Reduces a normalized clip of any length to a fixed 136-value descriptor:
//!
//! | block          | values | content                                   |
//! |----------------|--------|-------------------------------------------|
//! | position mean  | 34     | per joint, per axis mean over frames      |
//! | position std   | 34     | population standard deviation of position |
//! | velocity mean  | 34     | mean frame-to-frame difference            |
//! | velocity std   | 34     | population standard deviation of velocity |
//!
//! Each block is flattened joint-major, axis-minor. The concatenation is
//! scaled to unit L2 norm unless it is (numerically) the zero vector.

use super::tolerances::Tolerances;
use crate::skeleton::{NormalizedSequence, SkeletonFrame, COORDS, NUM_JOINTS};
use crate::{Error, Result};
use tracing::debug;

/// Number of statistic blocks in the descriptor
pub const FEATURE_BLOCKS: usize = 4;

/// Values per statistic block (17 joints x 2 axes)
pub const BLOCK_LEN: usize = NUM_JOINTS * COORDS;

/// Descriptor length (136)
pub const FEATURE_DIM: usize = BLOCK_LEN * FEATURE_BLOCKS;

/// Per joint, per axis statistic
type Block = [[f64; COORDS]; NUM_JOINTS];

/// Fixed-length motion descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct MotionFeatureVector {
    values: Vec<f64>,
}

impl MotionFeatureVector {
    /// Wrap precomputed values; the length must be `FEATURE_DIM`
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.len() != FEATURE_DIM {
            return Err(Error::DimensionMismatch {
                expected: FEATURE_DIM,
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        l2_norm(&self.values)
    }

    /// Position mean block (34 values)
    pub fn position_mean(&self) -> &[f64] {
        &self.values[..BLOCK_LEN]
    }

    /// Velocity standard deviation block (34 values)
    pub fn velocity_std(&self) -> &[f64] {
        &self.values[3 * BLOCK_LEN..]
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

impl AsRef<[f64]> for MotionFeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Motion descriptor extractor
#[derive(Debug, Clone, Default)]
pub struct MotionFeatureExtractor {
    tolerances: Tolerances,
}

impl MotionFeatureExtractor {
    /// Create with default tolerances
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom tolerances
    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    /// Extract the descriptor of a normalized sequence
    pub fn extract(&self, seq: &NormalizedSequence) -> MotionFeatureVector {
        let frames = seq.frames();

        let (pos_mean, pos_std) = mean_std(frames);

        // A single frame has no observable velocity: both blocks stay zero
        let velocities: Vec<SkeletonFrame> = frames.windows(2).map(|w| frame_delta(&w[0], &w[1])).collect();
        let (vel_mean, vel_std) = mean_std(&velocities);

        let mut values = Vec::with_capacity(FEATURE_DIM);
        for block in [&pos_mean, &pos_std, &vel_mean, &vel_std] {
            for joint in block.iter() {
                values.extend_from_slice(joint);
            }
        }

        let norm = l2_norm(&values);
        if norm >= self.tolerances.norm_epsilon {
            for v in values.iter_mut() {
                *v /= norm;
            }
        } else {
            debug!(norm, "Degenerate motion descriptor, left unnormalized");
        }

        MotionFeatureVector { values }
    }
}

/// Euclidean norm of a slice
pub(crate) fn l2_norm(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}

fn frame_delta(prev: &SkeletonFrame, next: &SkeletonFrame) -> SkeletonFrame {
    let mut delta = [[0.0; COORDS]; NUM_JOINTS];
    for j in 0..NUM_JOINTS {
        for c in 0..COORDS {
            delta[j][c] = next[j][c] - prev[j][c];
        }
    }
    delta
}

/// Per joint, per axis mean and population standard deviation.
/// An empty slice yields two zero blocks.
fn mean_std(frames: &[SkeletonFrame]) -> (Block, Block) {
    let mut mean = [[0.0; COORDS]; NUM_JOINTS];
    let mut std = [[0.0; COORDS]; NUM_JOINTS];
    if frames.is_empty() {
        return (mean, std);
    }

    let n = frames.len() as f64;
    for frame in frames {
        for j in 0..NUM_JOINTS {
            for c in 0..COORDS {
                mean[j][c] += frame[j][c];
            }
        }
    }
    for joint in mean.iter_mut() {
        for v in joint.iter_mut() {
            *v /= n;
        }
    }

    for frame in frames {
        for j in 0..NUM_JOINTS {
            for c in 0..COORDS {
                let d = frame[j][c] - mean[j][c];
                std[j][c] += d * d;
            }
        }
    }
    for joint in std.iter_mut() {
        for v in joint.iter_mut() {
            *v = (*v / n).sqrt();
        }
    }

    (mean, std)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::normalizer::SequenceNormalizer;
    use crate::skeleton::SkeletonSequence;

    fn normalized(frames: Vec<SkeletonFrame>, scale: f64) -> NormalizedSequence {
        NormalizedSequence::new(frames, scale)
    }

    #[test]
    fn test_feature_dimension() {
        assert_eq!(FEATURE_DIM, 136);
        let seq = normalized(vec![[[0.5, -0.25]; NUM_JOINTS]; 4], 1.0);
        let feat = MotionFeatureExtractor::new().extract(&seq);
        assert_eq!(feat.len(), FEATURE_DIM);
    }

    #[test]
    fn test_block_layout_and_statistics() {
        // Joint 3 x goes 0, 2, 4: mean 2, population std sqrt(8/3),
        // velocity 2, 2: mean 2, std 0
        let mut frames = vec![[[0.0; COORDS]; NUM_JOINTS]; 3];
        for (t, frame) in frames.iter_mut().enumerate() {
            frame[3][0] = 2.0 * t as f64;
        }
        let seq = normalized(frames, 1.0);

        let feat = MotionFeatureExtractor::new().extract(&seq);

        let pos_mean = 2.0;
        let pos_std = (8.0f64 / 3.0).sqrt();
        let vel_mean = 2.0;
        let norm = (pos_mean * pos_mean + pos_std * pos_std + vel_mean * vel_mean).sqrt();

        let v = feat.as_slice();
        let idx = 3 * COORDS; // joint 3, axis x
        assert!((v[idx] - pos_mean / norm).abs() < 1e-12);
        assert!((v[BLOCK_LEN + idx] - pos_std / norm).abs() < 1e-12);
        assert!((v[2 * BLOCK_LEN + idx] - vel_mean / norm).abs() < 1e-12);
        assert!(v[3 * BLOCK_LEN + idx].abs() < 1e-12);
        // y axis of the same joint never moves
        assert_eq!(v[idx + 1], 0.0);
    }

    #[test]
    fn test_single_frame_has_zero_velocity_blocks() {
        let mut frame = [[0.0; COORDS]; NUM_JOINTS];
        frame[0] = [0.1, 0.9];
        frame[16] = [-0.3, -0.7];
        let feat = MotionFeatureExtractor::new().extract(&normalized(vec![frame], 1.0));

        let v = feat.as_slice();
        assert!(v[2 * BLOCK_LEN..].iter().all(|x| *x == 0.0));
        // Position std of a single frame is zero too
        assert!(v[BLOCK_LEN..2 * BLOCK_LEN].iter().all(|x| *x == 0.0));
        assert!((feat.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_norm() {
        let frames: Vec<SkeletonFrame> = (0..10)
            .map(|t| {
                let mut f = [[0.0; COORDS]; NUM_JOINTS];
                for (j, p) in f.iter_mut().enumerate() {
                    p[0] = (t as f64 * 0.3 + j as f64).sin();
                    p[1] = (t as f64 * 0.2 - j as f64).cos();
                }
                f
            })
            .collect();

        let feat = MotionFeatureExtractor::new().extract(&normalized(frames, 1.0));
        assert!((feat.norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_input_gives_zero_vector() {
        let seq = normalized(vec![[[0.0; COORDS]; NUM_JOINTS]; 6], 1.0);
        let feat = MotionFeatureExtractor::new().extract(&seq);

        assert!(feat.as_slice().iter().all(|v| *v == 0.0));
        assert!(feat.as_slice().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_below_norm_epsilon_is_left_unnormalized() {
        let mut frame = [[0.0; COORDS]; NUM_JOINTS];
        frame[5][0] = 1e-10;
        let feat = MotionFeatureExtractor::new().extract(&normalized(vec![frame], 1.0));

        assert_eq!(feat.as_slice()[5 * COORDS], 1e-10);
        assert!(feat.norm() < 1e-8);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let mut frames = vec![[[0.0; COORDS]; NUM_JOINTS]; 8];
        for (t, frame) in frames.iter_mut().enumerate() {
            frame[15][0] = (t as f64 * 0.7).sin();
            frame[16][0] = -(t as f64 * 0.7).sin();
        }
        let seq = SkeletonSequence::from_frames(frames).unwrap();
        let norm = SequenceNormalizer::new().normalize(&seq);

        let extractor = MotionFeatureExtractor::new();
        let a = extractor.extract(&norm);
        let b = extractor.extract(&norm);
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_values_checks_length() {
        assert!(MotionFeatureVector::from_values(vec![0.0; FEATURE_DIM]).is_ok());
        let err = MotionFeatureVector::from_values(vec![0.0; 10]).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch { expected: 136, actual: 10 }
        ));
    }

    #[test]
    fn test_block_accessors() {
        let values: Vec<f64> = (0..FEATURE_DIM).map(|i| i as f64).collect();
        let feat = MotionFeatureVector::from_values(values).unwrap();
        assert_eq!(feat.position_mean().len(), BLOCK_LEN);
        assert_eq!(feat.position_mean()[0], 0.0);
        assert_eq!(feat.velocity_std()[0], (3 * BLOCK_LEN) as f64);
        assert_eq!(feat.velocity_std().len(), BLOCK_LEN);
    }
}
