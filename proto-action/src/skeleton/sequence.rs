//! Skeleton Sequences
//!
//! A `SkeletonSequence` is a (T, 17, 2) clip with T >= 1. Missing
//! coordinates are carried as `f64::NAN` until gap filling removes them.
//! Every constructor validates the shape, so a sequence value is always
//! well-formed once it exists.

use super::joints::NUM_JOINTS;
use crate::{Error, Result};

/// Coordinates per joint (x, y)
pub const COORDS: usize = 2;

/// A single 2-D keypoint
pub type Point2 = [f64; COORDS];

/// One frame: 17 keypoints in COCO order
pub type SkeletonFrame = [Point2; NUM_JOINTS];

/// Raw keypoint clip, possibly containing NaN gaps
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonSequence {
    frames: Vec<SkeletonFrame>,
}

impl SkeletonSequence {
    /// Build from already-shaped frames
    pub fn from_frames(frames: Vec<SkeletonFrame>) -> Result<Self> {
        if frames.is_empty() {
            return Err(Error::Shape(format!(
                "sequence must have at least one frame, expected (T>=1, {}, {})",
                NUM_JOINTS, COORDS
            )));
        }
        Ok(Self { frames })
    }

    /// Build from a flat row-major buffer plus its shape.
    ///
    /// The shape must be rank 3 with trailing dimensions (17, 2) and the
    /// buffer length must equal the product of the shape.
    pub fn from_flat(shape: &[usize], data: &[f64]) -> Result<Self> {
        if shape.len() != 3 {
            return Err(Error::Shape(format!(
                "expected rank-3 array (T, {}, {}), got rank {} {:?}",
                NUM_JOINTS,
                COORDS,
                shape.len(),
                shape
            )));
        }
        if shape[1] != NUM_JOINTS || shape[2] != COORDS {
            return Err(Error::Shape(format!(
                "seq shape must be (T, {}, {}), got {:?}",
                NUM_JOINTS, COORDS, shape
            )));
        }
        let expected = shape[0].checked_mul(NUM_JOINTS * COORDS).ok_or_else(|| {
            Error::Shape(format!("shape {:?} is too large to address", shape))
        })?;
        if data.len() != expected {
            return Err(Error::Shape(format!(
                "buffer holds {} values but shape {:?} needs {}",
                data.len(),
                shape,
                expected
            )));
        }

        let frames = data
            .chunks_exact(NUM_JOINTS * COORDS)
            .map(|chunk| {
                let mut frame = [[0.0; COORDS]; NUM_JOINTS];
                for (j, point) in frame.iter_mut().enumerate() {
                    point[0] = chunk[j * COORDS];
                    point[1] = chunk[j * COORDS + 1];
                }
                frame
            })
            .collect();

        Self::from_frames(frames)
    }

    /// Build from nested frame / joint / coordinate vectors
    pub fn from_nested(data: &[Vec<Vec<f64>>]) -> Result<Self> {
        let mut frames = Vec::with_capacity(data.len());

        for (t, joints) in data.iter().enumerate() {
            if joints.len() != NUM_JOINTS {
                return Err(Error::Shape(format!(
                    "frame {} has {} joints, expected {}",
                    t,
                    joints.len(),
                    NUM_JOINTS
                )));
            }
            let mut frame = [[0.0; COORDS]; NUM_JOINTS];
            for (j, coords) in joints.iter().enumerate() {
                if coords.len() != COORDS {
                    return Err(Error::Shape(format!(
                        "frame {} joint {} has {} coordinates, expected {}",
                        t,
                        j,
                        coords.len(),
                        COORDS
                    )));
                }
                frame[j] = [coords[0], coords[1]];
            }
            frames.push(frame);
        }

        Self::from_frames(frames)
    }

    /// Number of frames (T)
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false: a sequence holds at least one frame
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Array shape as (T, 17, 2)
    pub fn shape(&self) -> [usize; 3] {
        [self.frames.len(), NUM_JOINTS, COORDS]
    }

    pub fn frames(&self) -> &[SkeletonFrame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<SkeletonFrame> {
        self.frames
    }

    /// Count of NaN coordinates (missing detections)
    pub fn gap_count(&self) -> usize {
        self.frames
            .iter()
            .flat_map(|f| f.iter())
            .flat_map(|p| p.iter())
            .filter(|v| v.is_nan())
            .count()
    }
}

/// Root-centered, scale-normalized clip without gaps
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSequence {
    frames: Vec<SkeletonFrame>,
    scale: f64,
}

impl NormalizedSequence {
    pub(crate) fn new(frames: Vec<SkeletonFrame>, scale: f64) -> Self {
        Self { frames, scale }
    }

    pub fn frames(&self) -> &[SkeletonFrame] {
        &self.frames
    }

    /// Scale the raw coordinates were divided by
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
