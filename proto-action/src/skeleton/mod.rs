//! Skeleton Data Model
//!
//! COCO-17 joint layout and the validated sequence containers that flow
//! through the feature pipeline.

pub mod joints;
pub mod sequence;

pub use joints::{
    JOINT_NAMES, LEFT_ANKLE, LEFT_HIP, LEFT_SHOULDER, NUM_JOINTS, RIGHT_ANKLE, RIGHT_HIP,
    RIGHT_SHOULDER,
};
pub use sequence::{NormalizedSequence, Point2, SkeletonFrame, SkeletonSequence, COORDS};
